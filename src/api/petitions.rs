//! Petition endpoints.

use super::{send_empty, send_json, ApiClient, Authorized};
use crate::errors::ClientError;
use crate::models::{
    Category, CreatePetitionRequest, CreatedPetition, PatchPetitionRequest, PetitionDetails,
    PetitionId, PetitionSearchResult,
};
use crate::search::PetitionQuery;

impl ApiClient {
    /// GET /petitions - Search petitions.
    pub async fn search_petitions(
        &self,
        query: &PetitionQuery,
    ) -> Result<PetitionSearchResult, ClientError> {
        send_json(self.get("/petitions").query(&query.to_pairs())).await
    }

    /// GET /petitions/:id - Get a petition with its tiers.
    pub async fn get_petition(&self, id: PetitionId) -> Result<PetitionDetails, ClientError> {
        send_json(self.get(&format!("/petitions/{}", id))).await
    }

    /// POST /petitions - Create a petition. Returns the new id.
    pub async fn create_petition(
        &self,
        token: &str,
        request: &CreatePetitionRequest,
    ) -> Result<PetitionId, ClientError> {
        let created: CreatedPetition =
            send_json(self.post("/petitions").authorized(token).json(request)).await?;
        tracing::info!("Created petition {}", created.petition_id);
        Ok(created.petition_id)
    }

    /// PATCH /petitions/:id - Update petition metadata.
    pub async fn patch_petition(
        &self,
        token: &str,
        id: PetitionId,
        request: &PatchPetitionRequest,
    ) -> Result<(), ClientError> {
        send_empty(
            self.patch(&format!("/petitions/{}", id))
                .authorized(token)
                .json(request),
        )
        .await
    }

    /// DELETE /petitions/:id - Delete a petition.
    pub async fn delete_petition(&self, token: &str, id: PetitionId) -> Result<(), ClientError> {
        send_empty(self.delete(&format!("/petitions/{}", id)).authorized(token)).await?;
        tracing::info!("Deleted petition {}", id);
        Ok(())
    }

    /// GET /petitions/categories - List categories.
    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        send_json(self.get("/petitions/categories")).await
    }
}
