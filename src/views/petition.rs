//! Petition detail screen.

use super::Banner;
use crate::api::ApiClient;
use crate::errors::{user_message, ClientError, FormKind, ValidationError};
use crate::models::{
    category_name, Category, Petition, PetitionDetails, PetitionId, SupportRequest, Supporter,
    TierId,
};
use crate::pagination::Paginator;
use crate::routes::Route;
use crate::search::PetitionQuery;
use crate::session::Credentials;

#[derive(Debug, Clone)]
pub struct PetitionView {
    pub details: PetitionDetails,
    pub categories: Vec<Category>,
    pub supporters: Vec<Supporter>,
    /// The owner's other petitions
    pub by_owner: Paginator<Petition>,
    /// Other owners' petitions in the same category
    pub similar: Paginator<Petition>,
    pub banner: Banner,
}

impl PetitionView {
    /// Load a petition and everything shown around it.
    ///
    /// Only the petition itself is required; when it can not be loaded the
    /// caller is sent back to explore.
    pub async fn load(
        api: &ApiClient,
        petition_id: PetitionId,
        page_size: usize,
    ) -> Result<Self, Route> {
        let details = match api.get_petition(petition_id).await {
            Ok(details) => details,
            Err(e) => {
                tracing::warn!("Could not load petition {}: {}", petition_id, e);
                return Err(Route::Explore);
            }
        };

        let mut view = Self {
            details,
            categories: Vec::new(),
            supporters: Vec::new(),
            by_owner: Paginator::new(page_size),
            similar: Paginator::new(page_size),
            banner: Banner::default(),
        };

        match api.list_categories().await {
            Ok(categories) => view.categories = categories,
            Err(e) => tracing::warn!("Failed to load categories: {}", e),
        }
        view.refresh_supporters(api).await;
        view.load_related(api).await;

        Ok(view)
    }

    pub fn petition_id(&self) -> PetitionId {
        self.details.petition_id
    }

    pub fn category_name(&self) -> &str {
        category_name(&self.categories, self.details.category_id).unwrap_or("")
    }

    /// Number of supporters of one tier.
    pub fn tier_supporters(&self, tier_id: TierId) -> usize {
        self.supporters
            .iter()
            .filter(|s| s.support_tier_id == tier_id)
            .count()
    }

    pub fn is_owner(&self, credentials: Option<&Credentials>) -> bool {
        credentials.is_some_and(|c| c.user_id == self.details.owner_id)
    }

    /// Whether the user already supports `tier_id`.
    pub fn supports(&self, credentials: Option<&Credentials>, tier_id: TierId) -> bool {
        credentials.is_some_and(|c| {
            self.supporters
                .iter()
                .any(|s| s.supporter_id == c.user_id && s.support_tier_id == tier_id)
        })
    }

    /// Logged-in users other than the owner may support tiers they do not
    /// already support.
    pub fn can_support(&self, credentials: Option<&Credentials>, tier_id: TierId) -> bool {
        credentials.is_some()
            && !self.is_owner(credentials)
            && self.details.tier(tier_id).is_some()
            && !self.supports(credentials, tier_id)
    }

    /// Pledge support for a tier, then reload the petition and its supporters.
    pub async fn support(
        &mut self,
        api: &ApiClient,
        credentials: &Credentials,
        tier_id: TierId,
        message: &str,
    ) -> Result<(), ClientError> {
        let result = self.try_support(api, credentials, tier_id, message).await;
        match &result {
            Ok(()) => self.banner.clear(),
            Err(e) => self.banner.show(
                user_message(FormKind::Support, e).or_else(|| Some(e.to_string())),
            ),
        }
        result
    }

    async fn try_support(
        &mut self,
        api: &ApiClient,
        credentials: &Credentials,
        tier_id: TierId,
        message: &str,
    ) -> Result<(), ClientError> {
        if self.is_owner(Some(credentials)) {
            return Err(ValidationError::OwnPetition.into());
        }
        if self.supports(Some(credentials), tier_id) {
            return Err(ValidationError::AlreadySupporting.into());
        }

        let request = SupportRequest::new(tier_id, message.trim());
        api.support_petition(&credentials.token, self.petition_id(), &request)
            .await?;
        tracing::info!(
            "User {} supported tier {} of petition {}",
            credentials.user_id,
            tier_id,
            self.petition_id()
        );

        match api.get_petition(self.petition_id()).await {
            Ok(details) => self.details = details,
            Err(e) => tracing::warn!("Failed to reload petition {}: {}", self.petition_id(), e),
        }
        self.refresh_supporters(api).await;
        Ok(())
    }

    /// Only the owner may delete, and only while nobody supports the petition.
    pub fn can_delete(&self, credentials: Option<&Credentials>) -> bool {
        self.is_owner(credentials) && !self.has_supporters()
    }

    fn has_supporters(&self) -> bool {
        !self.supporters.is_empty() || self.details.number_of_supporters > 0
    }

    /// Delete the petition. Returns the screen to show next.
    pub async fn delete(
        &mut self,
        api: &ApiClient,
        credentials: &Credentials,
    ) -> Result<Route, ClientError> {
        if !self.is_owner(Some(credentials)) {
            return Err(ClientError::Forbidden(
                "Only the owner can delete a petition".to_string(),
            ));
        }
        if self.has_supporters() {
            return Err(ValidationError::PetitionHasSupporters.into());
        }

        api.delete_petition(&credentials.token, self.petition_id())
            .await?;
        tracing::info!("Petition {} deleted", self.petition_id());
        Ok(Route::MyPetitions)
    }

    async fn refresh_supporters(&mut self, api: &ApiClient) {
        match api.list_supporters(self.petition_id()).await {
            Ok(supporters) => self.supporters = supporters,
            Err(e) => tracing::warn!(
                "Failed to load supporters of petition {}: {}",
                self.petition_id(),
                e
            ),
        }
    }

    async fn load_related(&mut self, api: &ApiClient) {
        let id = self.petition_id();
        let owner = self.details.owner_id;

        match api.search_petitions(&PetitionQuery::owned_by(owner)).await {
            Ok(result) => self.by_owner.replace(
                result
                    .petitions
                    .into_iter()
                    .filter(|p| p.petition_id != id)
                    .collect(),
            ),
            Err(e) => tracing::warn!("Failed to load petitions by owner {}: {}", owner, e),
        }

        let category = self.details.category_id;
        match api
            .search_petitions(&PetitionQuery::in_category(category))
            .await
        {
            Ok(result) => self.similar.replace(
                result
                    .petitions
                    .into_iter()
                    .filter(|p| p.petition_id != id && p.owner_id != owner)
                    .collect(),
            ),
            Err(e) => tracing::warn!("Failed to load petitions in category {}: {}", category, e),
        }
    }
}
