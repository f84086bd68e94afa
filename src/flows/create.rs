//! Create-petition flow.

use super::{Compensation, FlowError, Saga, Step, StepRecord};
use crate::api::ApiClient;
use crate::draft::PetitionDraft;
use crate::errors::ValidationError;
use crate::models::{Image, PetitionId};
use crate::routes::Route;
use crate::session::Credentials;

/// A petition that was created together with its hero image.
#[derive(Debug, Clone)]
pub struct PetitionCreated {
    pub petition_id: PetitionId,
    pub steps: Vec<StepRecord>,
}

impl PetitionCreated {
    pub fn next_route(&self) -> Route {
        Route::Petition(self.petition_id)
    }
}

/// Validate the draft, create the petition, then upload its hero image.
///
/// A petition without an image is invalid. The image check runs after the
/// create request so that metadata problems reported by the server surface
/// first; when the image is missing or its upload fails, the new petition is
/// deleted again.
pub async fn create_petition(
    api: &ApiClient,
    credentials: &Credentials,
    draft: &PetitionDraft,
    image: Option<&Image>,
) -> Result<PetitionCreated, FlowError> {
    let request = draft.to_create_request().map_err(FlowError::invalid)?;

    let mut saga = Saga::new(api, &credentials.token);

    let petition_id = match api.create_petition(&credentials.token, &request).await {
        Ok(id) => id,
        Err(e) => return Err(saga.fail(Step::CreatePetition, e).await),
    };
    saga.completed(
        Step::CreatePetition,
        Some(Compensation::DeletePetition(petition_id)),
    );

    let Some(image) = image else {
        return Err(saga
            .fail(Step::UploadImage, ValidationError::ImageRequired.into())
            .await);
    };

    if let Err(e) = api
        .put_petition_image(&credentials.token, petition_id, image)
        .await
    {
        return Err(saga.fail(Step::UploadImage, e).await);
    }
    saga.completed(Step::UploadImage, None);

    tracing::info!("Petition {} created with hero image", petition_id);
    Ok(PetitionCreated {
        petition_id,
        steps: saga.finish(),
    })
}
