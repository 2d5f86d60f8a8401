//! Wardrobe storage: uploaded images on disk plus their records in SQLite

pub mod items;
pub mod uploads;

pub use items::ItemRepository;
pub use uploads::{StoredFile, UploadStore};

use tracing::info;

use crate::config::StorageConfig;
use crate::models::{ClothingItem, NewClothingItem, Page};
use crate::{ClosetMuseError, Result};

/// A clothing item as received from the upload form
#[derive(Debug, Clone, Default)]
pub struct ItemUpload {
    pub name: String,
    pub category: String,
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct Wardrobe {
    items: ItemRepository,
    uploads: UploadStore,
}

impl Wardrobe {
    pub fn new(items: ItemRepository, uploads: UploadStore) -> Self {
        Self { items, uploads }
    }

    /// Open the database and make sure the upload directory exists
    pub async fn open(config: &StorageConfig) -> Result<Self> {
        let items = ItemRepository::open(&config.database_path)?;
        let uploads = UploadStore::new(&config.upload_dir, &config.public_url_prefix);
        uploads.init().await?;
        info!(
            "Wardrobe store ready (db: {}, uploads: {})",
            config.database_path, config.upload_dir
        );
        Ok(Self::new(items, uploads))
    }

    #[must_use]
    pub fn uploads(&self) -> &UploadStore {
        &self.uploads
    }

    /// Persist the image, then record it. The file is removed if the insert fails.
    pub async fn add_item(&self, upload: ItemUpload) -> Result<ClothingItem> {
        let name = upload.name.trim();
        let category = upload.category.trim();
        if name.is_empty() {
            return Err(ClosetMuseError::validation("name must not be empty"));
        }
        if category.is_empty() {
            return Err(ClosetMuseError::validation("category must not be empty"));
        }

        let stored = self
            .uploads
            .save(upload.file_name.as_deref(), &upload.bytes)
            .await?;

        let record = NewClothingItem {
            name: name.to_string(),
            category: category.to_string(),
            image_url: stored.url.clone(),
        };
        match self.items.insert(record).await {
            Ok(item) => {
                info!("Added clothing item {} ({})", item.id, item.name);
                Ok(item)
            }
            Err(e) => {
                self.uploads.remove(&stored).await;
                Err(e)
            }
        }
    }

    pub async fn list_items(&self, page: Page) -> Result<Vec<ClothingItem>> {
        self.items.list(page).await
    }
}
