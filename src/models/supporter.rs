//! Supporter (pledge) model.

use serde::{Deserialize, Serialize};

use super::{TierId, UserId};

/// A user's pledge to one support tier of a petition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supporter {
    pub support_id: u32,
    pub support_tier_id: TierId,
    #[serde(default)]
    pub message: Option<String>,
    pub supporter_id: UserId,
    pub supporter_first_name: String,
    pub supporter_last_name: String,
    pub timestamp: String,
}

/// Request body for supporting a tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportRequest {
    pub support_tier_id: TierId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SupportRequest {
    /// Build a pledge; a blank message is omitted from the body.
    pub fn new(support_tier_id: TierId, message: &str) -> Self {
        let message = (!message.trim().is_empty()).then(|| message.to_string());
        Self {
            support_tier_id,
            message,
        }
    }
}

/// Ids of the tiers that have at least one supporter.
pub fn supported_tier_ids(supporters: &[Supporter]) -> std::collections::HashSet<TierId> {
    supporters.iter().map(|s| s.support_tier_id).collect()
}
