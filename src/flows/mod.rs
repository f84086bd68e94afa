//! Multi-step write sequences.
//!
//! Each flow runs its requests as a saga: every step records a typed outcome,
//! every completed step registers how to undo it, and a failing step runs the
//! registered compensations in reverse before the error is returned.

mod account;
mod create;
mod edit;
mod tiers;

pub use account::*;
pub use create::*;
pub use edit::*;
pub use tiers::*;

use std::fmt;

use thiserror::Error;

use crate::api::ApiClient;
use crate::errors::{user_message, ClientError, FormKind};
use crate::models::{Image, PatchPetitionRequest, PetitionId, SupportTier, TierId};

/// One step of a flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Validate,
    CreatePetition,
    UploadImage,
    PatchPetition,
    CreateTier(String),
    UpdateTier(TierId),
    DeleteTier(TierId),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Validate => write!(f, "validation"),
            Step::CreatePetition => write!(f, "create petition"),
            Step::UploadImage => write!(f, "upload hero image"),
            Step::PatchPetition => write!(f, "update petition"),
            Step::CreateTier(title) => write!(f, "create tier {:?}", title),
            Step::UpdateTier(id) => write!(f, "update tier {}", id),
            Step::DeleteTier(id) => write!(f, "delete tier {}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Done,
    Skipped,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub step: Step,
    pub outcome: StepOutcome,
}

/// What happened to the completed steps after a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rollback {
    /// Nothing had been written yet
    NotNeeded,
    /// Every completed step was undone
    Completed,
    /// Some compensations failed; server state is partially applied
    Incomplete(Vec<String>),
}

/// A flow that stopped at `step`.
#[derive(Debug, Error)]
#[error("{step} failed: {cause}")]
pub struct FlowError {
    pub step: Step,
    pub cause: ClientError,
    pub rollback: Rollback,
    pub steps: Vec<StepRecord>,
}

impl FlowError {
    fn invalid(cause: impl Into<ClientError>) -> Self {
        Self {
            step: Step::Validate,
            cause: cause.into(),
            rollback: Rollback::NotNeeded,
            steps: Vec::new(),
        }
    }

    /// Banner text for the form that started the flow.
    pub fn user_message(&self, form: FormKind) -> Option<String> {
        user_message(form, &self.cause)
    }
}

/// Undo action for a completed step.
#[derive(Debug, Clone)]
enum Compensation {
    DeletePetition(PetitionId),
    RestoreImage(PetitionId, Image),
    RestoreMetadata(PetitionId, PatchPetitionRequest),
    DeleteCreatedTier(PetitionId, String),
    RestoreTier(PetitionId, SupportTier),
    RecreateTier(PetitionId, SupportTier),
}

struct Saga<'a> {
    api: &'a ApiClient,
    token: &'a str,
    steps: Vec<StepRecord>,
    compensations: Vec<Compensation>,
}

impl<'a> Saga<'a> {
    fn new(api: &'a ApiClient, token: &'a str) -> Self {
        Self {
            api,
            token,
            steps: Vec::new(),
            compensations: Vec::new(),
        }
    }

    fn record(&mut self, step: Step, outcome: StepOutcome) {
        self.steps.push(StepRecord { step, outcome });
    }

    fn completed(&mut self, step: Step, undo: Option<Compensation>) {
        self.record(step, StepOutcome::Done);
        self.compensations.extend(undo);
    }

    /// Record the failed step, undo everything before it, and build the error.
    async fn fail(mut self, step: Step, cause: ClientError) -> FlowError {
        tracing::warn!("Step '{}' failed: {}", step, cause);
        self.record(step.clone(), StepOutcome::Failed(cause.to_string()));

        let rollback = if self.compensations.is_empty() {
            Rollback::NotNeeded
        } else {
            let mut failures = Vec::new();
            while let Some(undo) = self.compensations.pop() {
                if let Err(e) = compensate(self.api, self.token, &undo).await {
                    tracing::error!("Compensation {:?} failed: {}", undo, e);
                    failures.push(format!("{:?}: {}", undo, e));
                }
            }
            if failures.is_empty() {
                Rollback::Completed
            } else {
                Rollback::Incomplete(failures)
            }
        };

        FlowError {
            step,
            cause,
            rollback,
            steps: self.steps,
        }
    }

    fn finish(self) -> Vec<StepRecord> {
        self.steps
    }
}

async fn compensate(api: &ApiClient, token: &str, undo: &Compensation) -> Result<(), ClientError> {
    tracing::info!("Compensating: {:?}", undo);
    match undo {
        Compensation::DeletePetition(id) => api.delete_petition(token, *id).await,
        Compensation::RestoreImage(id, image) => api.put_petition_image(token, *id, image).await,
        Compensation::RestoreMetadata(id, patch) => api.patch_petition(token, *id, patch).await,
        Compensation::DeleteCreatedTier(id, title) => {
            // Creation does not return the tier id; titles are unique per petition.
            let details = api.get_petition(*id).await?;
            let wanted = title.to_lowercase();
            match details
                .support_tiers
                .iter()
                .find(|t| t.title.to_lowercase() == wanted)
            {
                Some(tier) => api.delete_tier(token, *id, tier.support_tier_id).await,
                None => {
                    tracing::warn!("Created tier {:?} not found on petition {}", title, id);
                    Ok(())
                }
            }
        }
        Compensation::RestoreTier(id, tier) => {
            api.update_tier(token, *id, tier.support_tier_id, &tier.to_request())
                .await
        }
        Compensation::RecreateTier(id, tier) => api.create_tier(token, *id, &tier.to_request()).await,
    }
}
