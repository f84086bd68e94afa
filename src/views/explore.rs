//! Explore screen: search, filter, sort and page through petitions.

use super::Banner;
use crate::api::ApiClient;
use crate::errors::{user_message, ClientError, FormKind};
use crate::models::{category_name, Category, CategoryId, Petition};
use crate::pagination::Paginator;
use crate::search::{SearchFilters, SortKey, SortOrder};

#[derive(Debug, Clone)]
pub struct ExploreView {
    pub filters: SearchFilters,
    pub sort: SortOrder,
    pub petitions: Paginator<Petition>,
    pub categories: Vec<Category>,
    pub banner: Banner,
}

impl ExploreView {
    pub fn new(page_size: usize) -> Self {
        Self {
            filters: SearchFilters::default(),
            sort: SortOrder::default(),
            petitions: Paginator::new(page_size),
            categories: Vec::new(),
            banner: Banner::default(),
        }
    }

    /// Load categories, then run the initial search.
    pub async fn load(&mut self, api: &ApiClient) {
        match api.list_categories().await {
            Ok(categories) => self.categories = categories,
            Err(e) => tracing::warn!("Failed to load categories: {}", e),
        }
        self.search(api).await;
    }

    /// Search with the current filters and sort. Results replace the list and
    /// go back to page 1; a failure shows the server's status text.
    pub async fn search(&mut self, api: &ApiClient) {
        let query = match self.filters.to_query(self.sort) {
            Ok(query) => query,
            Err(e) => {
                self.banner.set(e.to_string());
                return;
            }
        };

        match api.search_petitions(&query).await {
            Ok(result) => {
                tracing::debug!("Search returned {} petitions", result.count);
                self.petitions.replace(result.petitions);
                self.banner.clear();
            }
            Err(e) => self.show_error(&e),
        }
    }

    /// Sort by `key` (toggling direction when it is already the key) and search again.
    pub async fn select_sort(&mut self, api: &ApiClient, key: SortKey) {
        self.sort.select(key);
        self.search(api).await;
    }

    /// Reset the filter form and search again.
    pub async fn clear_filters(&mut self, api: &ApiClient) {
        self.filters.clear();
        self.search(api).await;
    }

    pub fn toggle_category(&mut self, category_id: CategoryId) {
        let selected = &mut self.filters.categories;
        if let Some(pos) = selected.iter().position(|c| c.category_id == category_id) {
            selected.remove(pos);
        } else if let Some(category) = self.categories.iter().find(|c| c.category_id == category_id)
        {
            selected.push(category.clone());
        }
    }

    pub fn category_name(&self, category_id: CategoryId) -> &str {
        category_name(&self.categories, category_id).unwrap_or("")
    }

    fn show_error(&mut self, error: &ClientError) {
        let message = user_message(FormKind::Explore, error).unwrap_or_else(|| error.to_string());
        self.banner.set(message);
    }
}
