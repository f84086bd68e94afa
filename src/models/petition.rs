//! Petition models as returned by the search and detail endpoints.

use serde::{Deserialize, Deserializer, Serialize};

use super::{CategoryId, PetitionId, SupportTier, TierRequest, UserId};

/// A petition as listed by the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Petition {
    pub petition_id: PetitionId,
    pub title: String,
    pub category_id: CategoryId,
    pub owner_id: UserId,
    pub owner_first_name: String,
    pub owner_last_name: String,
    pub number_of_supporters: u32,
    pub creation_date: String,
    /// Cost of the cheapest tier
    #[serde(default)]
    pub supporting_cost: u32,
}

/// Search endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetitionSearchResult {
    pub petitions: Vec<Petition>,
    pub count: u32,
}

/// A single petition with its description and tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetitionDetails {
    pub petition_id: PetitionId,
    pub title: String,
    pub category_id: CategoryId,
    pub owner_id: UserId,
    pub owner_first_name: String,
    pub owner_last_name: String,
    pub number_of_supporters: u32,
    pub creation_date: String,
    pub description: String,
    /// `null` until the first pledge; read as zero
    #[serde(default, deserialize_with = "null_as_zero")]
    pub money_raised: u64,
    pub support_tiers: Vec<SupportTier>,
}

impl PetitionDetails {
    pub fn tier(&self, id: u32) -> Option<&SupportTier> {
        self.support_tiers.iter().find(|t| t.support_tier_id == id)
    }

    /// The patch that restores this petition's metadata.
    pub fn metadata_patch(&self) -> PatchPetitionRequest {
        PatchPetitionRequest {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            category_id: Some(self.category_id),
        }
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}

/// Request body for creating a petition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetitionRequest {
    pub title: String,
    pub description: String,
    pub category_id: CategoryId,
    pub support_tiers: Vec<TierRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPetition {
    pub petition_id: PetitionId,
}

/// Request body for patching petition metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchPetitionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}
