use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::new_id;
use crate::models::RecipeDetail;

/// A named snapshot of a calculated result set.
///
/// `data` is owned, so later changes to the live session never reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedReport {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub data: Vec<RecipeDetail>,
}

impl SavedReport {
    pub fn new(title: &str, data: &[RecipeDetail]) -> Self {
        Self {
            id: new_id(),
            title: title.to_string(),
            created_at: Utc::now(),
            data: data.to_vec(),
        }
    }

    /// Number of meals in the snapshot.
    pub fn meal_count(&self) -> usize {
        self.data.len()
    }
}
