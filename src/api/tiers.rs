//! Support tier endpoints.

use super::{send_empty, ApiClient, Authorized};
use crate::errors::ClientError;
use crate::models::{PetitionId, TierId, TierRequest};

impl ApiClient {
    /// PUT /petitions/:id/supportTiers - Add a tier.
    pub async fn create_tier(
        &self,
        token: &str,
        petition_id: PetitionId,
        request: &TierRequest,
    ) -> Result<(), ClientError> {
        send_empty(
            self.put(&format!("/petitions/{}/supportTiers", petition_id))
                .authorized(token)
                .json(request),
        )
        .await
    }

    /// PATCH /petitions/:id/supportTiers/:tierId - Update a tier.
    pub async fn update_tier(
        &self,
        token: &str,
        petition_id: PetitionId,
        tier_id: TierId,
        request: &TierRequest,
    ) -> Result<(), ClientError> {
        send_empty(
            self.patch(&format!(
                "/petitions/{}/supportTiers/{}",
                petition_id, tier_id
            ))
            .authorized(token)
            .json(request),
        )
        .await
    }

    /// DELETE /petitions/:id/supportTiers/:tierId - Remove a tier.
    pub async fn delete_tier(
        &self,
        token: &str,
        petition_id: PetitionId,
        tier_id: TierId,
    ) -> Result<(), ClientError> {
        send_empty(
            self.delete(&format!(
                "/petitions/{}/supportTiers/{}",
                petition_id, tier_id
            ))
            .authorized(token),
        )
        .await
    }
}
