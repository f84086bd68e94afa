//! Category model.

use serde::{Deserialize, Serialize};

use super::CategoryId;

/// A petition category from the flat reference list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_id: CategoryId,
    pub name: String,
}

/// Look up a category name by id.
pub fn category_name(categories: &[Category], id: CategoryId) -> Option<&str> {
    categories
        .iter()
        .find(|c| c.category_id == id)
        .map(|c| c.name.as_str())
}
