//! Support tier model.

use serde::{Deserialize, Serialize};

use super::TierId;

/// Upper bound on tiers per petition.
pub const MAX_TIERS: usize = 3;

/// A priced pledge level offered by a petition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTier {
    pub support_tier_id: TierId,
    pub title: String,
    pub description: String,
    pub cost: u32,
}

impl SupportTier {
    /// The request body that would recreate this tier.
    pub fn to_request(&self) -> TierRequest {
        TierRequest {
            title: self.title.clone(),
            description: self.description.clone(),
            cost: self.cost,
        }
    }
}

/// Request body for creating or updating a tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierRequest {
    pub title: String,
    pub description: String,
    pub cost: u32,
}
