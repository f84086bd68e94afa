//! My petitions screen: petitions the user owns and petitions they support.

use super::Banner;
use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::Petition;
use crate::pagination::Paginator;
use crate::search::PetitionQuery;
use crate::session::Credentials;

#[derive(Debug, Clone)]
pub struct MyPetitionsView {
    pub owned: Paginator<Petition>,
    pub supported: Paginator<Petition>,
    pub banner: Banner,
}

impl MyPetitionsView {
    pub fn new(page_size: usize) -> Self {
        Self {
            owned: Paginator::new(page_size),
            supported: Paginator::new(page_size),
            banner: Banner::default(),
        }
    }

    /// Load both lists for the logged-in user.
    pub async fn load(
        api: &ApiClient,
        credentials: Option<&Credentials>,
        page_size: usize,
    ) -> Result<Self, ClientError> {
        let credentials = credentials.ok_or(ClientError::Unauthenticated)?;
        let mut view = Self::new(page_size);
        view.refresh(api, credentials).await;
        Ok(view)
    }

    /// Fetch both lists again. A failed list keeps its previous items.
    pub async fn refresh(&mut self, api: &ApiClient, credentials: &Credentials) {
        let user_id = credentials.user_id;
        self.banner.clear();

        match api.search_petitions(&PetitionQuery::owned_by(user_id)).await {
            Ok(result) => self.owned.replace(result.petitions),
            Err(e) => {
                tracing::warn!("Failed to load petitions owned by {}: {}", user_id, e);
                self.banner.set(e.to_string());
            }
        }

        match api
            .search_petitions(&PetitionQuery::supported_by(user_id))
            .await
        {
            Ok(result) => self.supported.replace(result.petitions),
            Err(e) => {
                tracing::warn!("Failed to load petitions supported by {}: {}", user_id, e);
                self.banner.set(e.to_string());
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.owned.is_empty() && self.supported.is_empty()
    }
}
