//! Fashion trend "pins" shown on the trends screen

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendItem {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl TrendItem {
    /// Tags are stored lowercase; the category is lowercased before comparing.
    #[must_use]
    pub fn has_tag(&self, category: &str) -> bool {
        let category = category.to_lowercase();
        self.tags.iter().any(|tag| *tag == category)
    }
}
