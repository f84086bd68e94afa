//! Supporter endpoints.

use super::{send_empty, send_json, ApiClient, Authorized};
use crate::errors::ClientError;
use crate::models::{PetitionId, SupportRequest, Supporter};

impl ApiClient {
    /// GET /petitions/:id/supporters - List pledges, newest first.
    pub async fn list_supporters(
        &self,
        petition_id: PetitionId,
    ) -> Result<Vec<Supporter>, ClientError> {
        send_json(self.get(&format!("/petitions/{}/supporters", petition_id))).await
    }

    /// POST /petitions/:id/supporters - Support a tier.
    pub async fn support_petition(
        &self,
        token: &str,
        petition_id: PetitionId,
        request: &SupportRequest,
    ) -> Result<(), ClientError> {
        send_empty(
            self.post(&format!("/petitions/{}/supporters", petition_id))
                .authorized(token)
                .json(request),
        )
        .await
    }
}
