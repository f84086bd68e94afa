//! Local petition form state.
//!
//! A draft is edited freely until it is submitted. Tiers that already have
//! supporters are locked: they can be neither edited nor removed.

use crate::errors::ValidationError;
use crate::models::{
    CategoryId, CreatePetitionRequest, PatchPetitionRequest, PetitionDetails, TierId, TierRequest,
    MAX_TIERS,
};
use crate::validation;

/// One tier row in the form. `cost` is kept as typed so that invalid input can
/// be reported instead of silently coerced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierDraft {
    /// Server id; `None` until the tier is created
    pub id: Option<TierId>,
    pub title: String,
    pub description: String,
    pub cost: String,
    pub has_support: bool,
}

/// Petition create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetitionDraft {
    pub title: String,
    pub description: String,
    pub category_id: Option<CategoryId>,
    tiers: Vec<TierDraft>,
}

impl Default for PetitionDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl PetitionDraft {
    /// An empty form with one blank tier.
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category_id: None,
            tiers: vec![TierDraft::default()],
        }
    }

    /// Prefill the form from an existing petition. Tiers whose id is in
    /// `supported` are locked.
    pub fn from_details(
        details: &PetitionDetails,
        supported: &std::collections::HashSet<TierId>,
    ) -> Self {
        let tiers = details
            .support_tiers
            .iter()
            .map(|t| TierDraft {
                id: Some(t.support_tier_id),
                title: t.title.clone(),
                description: t.description.clone(),
                cost: t.cost.to_string(),
                has_support: supported.contains(&t.support_tier_id),
            })
            .collect();
        Self {
            title: details.title.clone(),
            description: details.description.clone(),
            category_id: Some(details.category_id),
            tiers,
        }
    }

    pub fn tiers(&self) -> &[TierDraft] {
        &self.tiers
    }

    pub fn can_add_tier(&self) -> bool {
        self.tiers.len() < MAX_TIERS
    }

    /// Append a blank tier. Returns its index.
    pub fn add_tier(&mut self) -> Result<usize, ValidationError> {
        if !self.can_add_tier() {
            return Err(ValidationError::TooManyTiers);
        }
        self.tiers.push(TierDraft::default());
        Ok(self.tiers.len() - 1)
    }

    /// Remove a tier. The last remaining tier and supported tiers stay.
    pub fn remove_tier(&mut self, index: usize) -> Result<TierDraft, ValidationError> {
        self.unlocked(index)?;
        if self.tiers.len() <= 1 {
            return Err(ValidationError::NoTiers);
        }
        Ok(self.tiers.remove(index))
    }

    pub fn set_tier_title(&mut self, index: usize, title: &str) -> Result<(), ValidationError> {
        self.unlocked(index)?.title = title.to_string();
        Ok(())
    }

    pub fn set_tier_description(
        &mut self,
        index: usize,
        description: &str,
    ) -> Result<(), ValidationError> {
        self.unlocked(index)?.description = description.to_string();
        Ok(())
    }

    pub fn set_tier_cost(&mut self, index: usize, cost: &str) -> Result<(), ValidationError> {
        self.unlocked(index)?.cost = cost.to_string();
        Ok(())
    }

    fn unlocked(&mut self, index: usize) -> Result<&mut TierDraft, ValidationError> {
        let tier = self
            .tiers
            .get_mut(index)
            .ok_or(ValidationError::NoSuchTier(index + 1))?;
        if tier.has_support {
            return Err(ValidationError::TierLocked(index + 1));
        }
        Ok(tier)
    }

    /// Validate and build the create request body.
    pub fn to_create_request(&self) -> Result<CreatePetitionRequest, ValidationError> {
        validation::validate_petition(self)?;
        let support_tiers = self
            .tiers
            .iter()
            .map(validation::validate_tier)
            .collect::<Result<Vec<TierRequest>, _>>()?;
        Ok(CreatePetitionRequest {
            title: self.title.clone(),
            description: self.description.clone(),
            category_id: self.category_id.ok_or(ValidationError::CategoryRequired)?,
            support_tiers,
        })
    }

    /// Validate and build the metadata patch for an edit.
    pub fn to_patch_request(&self) -> Result<PatchPetitionRequest, ValidationError> {
        validation::validate_petition(self)?;
        Ok(PatchPetitionRequest {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            category_id: self.category_id,
        })
    }
}
