//! Petition search parameters.
//!
//! Filtering and ordering happen server-side; this module only builds the
//! query string for `GET /petitions` and tracks the sort toggle state.

use crate::errors::ValidationError;
use crate::models::{Category, CategoryId, UserId};
use crate::validation;

/// Field to order results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Created,
    Alphabetical,
    Cost,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Created => "CREATED",
            SortKey::Alphabetical => "ALPHABETICAL",
            SortKey::Cost => "COST",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Sort key plus direction, sent as `sortBy=KEY_DIR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Pick a sort key the way the toggle buttons do: the active key flips
    /// direction, a different key becomes active in ascending order.
    pub fn select(&mut self, key: SortKey) {
        if key == self.key {
            self.direction = self.direction.reversed();
        } else {
            self.key = key;
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn to_param(&self) -> String {
        format!("{}_{}", self.key.as_str(), self.direction.as_str())
    }
}

/// Query parameters for the petition search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetitionQuery {
    pub q: Option<String>,
    pub category_ids: Vec<CategoryId>,
    /// Only petitions with a tier at or below this cost
    pub supporting_cost: Option<u32>,
    pub owner_id: Option<UserId>,
    pub supporter_id: Option<UserId>,
    pub sort: Option<SortOrder>,
    pub start_index: Option<u32>,
    pub count: Option<u32>,
}

impl PetitionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owned_by(owner_id: UserId) -> Self {
        Self {
            owner_id: Some(owner_id),
            ..Self::default()
        }
    }

    pub fn supported_by(supporter_id: UserId) -> Self {
        Self {
            supporter_id: Some(supporter_id),
            ..Self::default()
        }
    }

    pub fn in_category(category_id: CategoryId) -> Self {
        Self {
            category_ids: vec![category_id],
            ..Self::default()
        }
    }

    /// Key/value pairs in a stable order. Category ids repeat the key.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(start) = self.start_index {
            pairs.push(("startIndex", start.to_string()));
        }
        if let Some(count) = self.count {
            pairs.push(("count", count.to_string()));
        }
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        for id in &self.category_ids {
            pairs.push(("categoryIds", id.to_string()));
        }
        if let Some(cost) = self.supporting_cost {
            pairs.push(("supportingCost", cost.to_string()));
        }
        if let Some(owner) = self.owner_id {
            pairs.push(("ownerId", owner.to_string()));
        }
        if let Some(supporter) = self.supporter_id {
            pairs.push(("supporterId", supporter.to_string()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sortBy", sort.to_param()));
        }
        pairs
    }
}

/// The explore screen's filter form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub query: String,
    pub max_cost: String,
    pub categories: Vec<Category>,
}

impl SearchFilters {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Build the search query. Blank text fields are left out.
    pub fn to_query(&self, sort: SortOrder) -> Result<PetitionQuery, ValidationError> {
        let q = self.query.trim();
        Ok(PetitionQuery {
            q: (!q.is_empty()).then(|| q.to_string()),
            category_ids: self.categories.iter().map(|c| c.category_id).collect(),
            supporting_cost: validation::parse_max_cost(&self.max_cost)?,
            sort: Some(sort),
            ..PetitionQuery::default()
        })
    }
}
