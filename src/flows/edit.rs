//! Edit-petition flow.

use std::collections::HashSet;

use super::{Compensation, FlowError, Saga, Step, StepOutcome, StepRecord, TierChange, TierPlan};
use crate::api::ApiClient;
use crate::draft::PetitionDraft;
use crate::models::{supported_tier_ids, Category, Image, PetitionDetails, PetitionId, TierId};
use crate::routes::Route;
use crate::session::Credentials;

/// State captured when the edit screen loads.
#[derive(Debug, Clone)]
pub struct EditSession {
    /// Snapshot the edits are diffed against
    pub original: PetitionDetails,
    pub supported: HashSet<TierId>,
    pub categories: Vec<Category>,
    pub existing_image: Option<Image>,
    pub draft: PetitionDraft,
}

/// A saved edit.
#[derive(Debug, Clone)]
pub struct PetitionEdited {
    pub petition_id: PetitionId,
    pub steps: Vec<StepRecord>,
}

impl PetitionEdited {
    pub fn next_route(&self) -> Route {
        Route::Petition(self.petition_id)
    }

    /// Whether the best-effort image upload failed.
    pub fn image_failed(&self) -> bool {
        self.steps
            .iter()
            .any(|r| r.step == Step::UploadImage && matches!(r.outcome, StepOutcome::Failed(_)))
    }
}

impl EditSession {
    /// Load a petition for editing by its owner.
    ///
    /// Redirects to the petition when logged out or not the owner, and to
    /// explore when the petition can not be loaded. Categories, supporters and
    /// the current image are optional.
    pub async fn load(
        api: &ApiClient,
        credentials: Option<&Credentials>,
        petition_id: PetitionId,
    ) -> Result<Self, Route> {
        let Some(credentials) = credentials else {
            return Err(Route::Petition(petition_id));
        };

        let original = match api.get_petition(petition_id).await {
            Ok(details) => details,
            Err(e) => {
                tracing::warn!("Could not load petition {} for editing: {}", petition_id, e);
                return Err(Route::Explore);
            }
        };

        if original.owner_id != credentials.user_id {
            return Err(Route::Petition(petition_id));
        }

        let categories = api.list_categories().await.unwrap_or_else(|e| {
            tracing::warn!("Failed to load categories: {}", e);
            Vec::new()
        });

        let supported = match api.list_supporters(petition_id).await {
            Ok(supporters) => supported_tier_ids(&supporters),
            Err(e) => {
                tracing::warn!("Failed to load supporters of petition {}: {}", petition_id, e);
                HashSet::new()
            }
        };

        let existing_image = api
            .get_petition_image(petition_id)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to load hero image of petition {}: {}", petition_id, e);
                None
            });

        let draft = PetitionDraft::from_details(&original, &supported);

        Ok(Self {
            original,
            supported,
            categories,
            existing_image,
            draft,
        })
    }

    pub fn petition_id(&self) -> PetitionId {
        self.original.petition_id
    }

    /// Tier ids as they were when the screen loaded.
    pub fn original_tier_ids(&self) -> Vec<TierId> {
        self.original
            .support_tiers
            .iter()
            .map(|t| t.support_tier_id)
            .collect()
    }

    /// Diff the current draft against the snapshot.
    pub fn plan(&self) -> Result<TierPlan, FlowError> {
        TierPlan::diff(&self.original.support_tiers, self.draft.tiers(), &self.supported)
            .map_err(FlowError::invalid)
    }

    /// Save the draft: image, then metadata, then tiers.
    ///
    /// The image upload is best-effort; its failure is recorded in the result
    /// and the save continues. A metadata or tier failure stops the save and
    /// undoes what was already applied, including a replaced image.
    pub async fn save(
        &self,
        api: &ApiClient,
        credentials: &Credentials,
        new_image: Option<&Image>,
    ) -> Result<PetitionEdited, FlowError> {
        let patch = self.draft.to_patch_request().map_err(FlowError::invalid)?;
        let plan = self.plan()?;
        let petition_id = self.petition_id();
        let token = credentials.token.as_str();

        let mut saga = Saga::new(api, token);

        match new_image {
            Some(image) => match api.put_petition_image(token, petition_id, image).await {
                Ok(()) => saga.completed(
                    Step::UploadImage,
                    self.existing_image
                        .clone()
                        .map(|old| Compensation::RestoreImage(petition_id, old)),
                ),
                Err(e) => {
                    tracing::warn!("Hero image update failed, continuing: {}", e);
                    saga.record(Step::UploadImage, StepOutcome::Failed(e.to_string()));
                }
            },
            None => saga.record(Step::UploadImage, StepOutcome::Skipped),
        }

        if let Err(e) = api.patch_petition(token, petition_id, &patch).await {
            return Err(saga.fail(Step::PatchPetition, e).await);
        }
        saga.completed(
            Step::PatchPetition,
            Some(Compensation::RestoreMetadata(
                petition_id,
                self.original.metadata_patch(),
            )),
        );

        for change in plan.ordered(&self.original.support_tiers) {
            let (step, result, undo) = match change {
                TierChange::Create(request) => {
                    let result = api.create_tier(token, petition_id, &request).await;
                    (
                        Step::CreateTier(request.title.clone()),
                        result,
                        Compensation::DeleteCreatedTier(petition_id, request.title),
                    )
                }
                // Plans only name ids from the snapshot.
                TierChange::Update { id, request } => {
                    let Some(before) = self.original.tier(id).cloned() else {
                        continue;
                    };
                    let result = api.update_tier(token, petition_id, id, &request).await;
                    (
                        Step::UpdateTier(id),
                        result,
                        Compensation::RestoreTier(petition_id, before),
                    )
                }
                TierChange::Delete(id) => {
                    let Some(before) = self.original.tier(id).cloned() else {
                        continue;
                    };
                    let result = api.delete_tier(token, petition_id, id).await;
                    (
                        Step::DeleteTier(id),
                        result,
                        Compensation::RecreateTier(petition_id, before),
                    )
                }
            };

            match result {
                Ok(()) => saga.completed(step, Some(undo)),
                Err(e) => return Err(saga.fail(step, e).await),
            }
        }

        tracing::info!("Petition {} saved", petition_id);
        Ok(PetitionEdited {
            petition_id,
            steps: saga.finish(),
        })
    }
}
