//! Clothing items uploaded by the user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored wardrobe record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClothingItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    /// Public URL of the stored image
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Fields needed to insert a new record
#[derive(Debug, Clone)]
pub struct NewClothingItem {
    pub name: String,
    pub category: String,
    pub image_url: String,
}

/// Offset pagination for listing items
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

pub const MAX_PAGE_SIZE: u32 = 100;

fn default_limit() -> u32 {
    MAX_PAGE_SIZE
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

impl Page {
    /// Limit clamped to `1..=MAX_PAGE_SIZE`
    #[must_use]
    pub fn effective_limit(&self) -> u32 {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }
}
