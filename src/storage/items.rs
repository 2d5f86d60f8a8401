//! SQLite table of wardrobe items

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{Connection, params};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::task;

use crate::models::{ClothingItem, NewClothingItem, Page};
use crate::{ClosetMuseError, Result};

/// Repository for the `clothing_items` table
#[derive(Clone)]
pub struct ItemRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ItemRepository {
    /// Open (and migrate) the database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS clothing_items (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                category TEXT NOT NULL,
                image_url TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_clothing_items_name ON clothing_items(name);
            CREATE INDEX IF NOT EXISTS idx_clothing_items_category ON clothing_items(category);
            "#,
        )?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a closure against the connection on the blocking pool.
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let conn = self.conn.clone();
        task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| ClosetMuseError::storage("database lock poisoned"))?;
            f(&guard)
        })
        .await
        .map_err(|e| ClosetMuseError::storage(format!("database task failed: {e}")))?
    }

    #[tracing::instrument(name = "insert_item", level = "debug", skip(self))]
    pub async fn insert(&self, item: NewClothingItem) -> Result<ClothingItem> {
        self.with_conn(move |conn| {
            // stored with microsecond precision
            let created_at = Utc::now().trunc_subsecs(6);
            conn.execute(
                "INSERT INTO clothing_items (name, category, image_url, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![
                    item.name,
                    item.category,
                    item.image_url,
                    created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
                ],
            )?;
            Ok(ClothingItem {
                id: conn.last_insert_rowid(),
                name: item.name,
                category: item.category,
                image_url: item.image_url,
                created_at,
            })
        })
        .await
    }

    #[tracing::instrument(name = "list_items", level = "debug", skip(self))]
    pub async fn list(&self, page: Page) -> Result<Vec<ClothingItem>> {
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, category, image_url, created_at FROM clothing_items ORDER BY id LIMIT ?1 OFFSET ?2",
            )?;
            let rows = stmt.query_map(params![page.effective_limit(), page.skip], row_to_item)?;
            Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
        })
        .await
    }

    /// Drop the table so the next statement fails
    #[cfg(test)]
    pub(crate) async fn drop_table(&self) -> Result<()> {
        self.with_conn(|conn| Ok(conn.execute_batch("DROP TABLE clothing_items")?))
            .await
    }
}

fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<ClothingItem> {
    let created_at: String = row.get(4)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
        })?;
    Ok(ClothingItem {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        image_url: row.get(3)?,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_item(name: &str) -> NewClothingItem {
        NewClothingItem {
            name: name.to_string(),
            category: "tops".to_string(),
            image_url: format!("/uploads/{name}.jpg"),
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let repo = ItemRepository::in_memory().unwrap();
        let first = repo.insert(new_item("tee")).await.unwrap();
        let second = repo.insert(new_item("hoodie")).await.unwrap();
        assert!(second.id > first.id);
        assert_eq!(first.category, "tops");
        assert_eq!(first.image_url, "/uploads/tee.jpg");
    }

    #[tokio::test]
    async fn stored_item_round_trips_through_list() {
        let repo = ItemRepository::in_memory().unwrap();
        let inserted = repo.insert(new_item("scarf")).await.unwrap();
        let listed = repo.list(Page::default()).await.unwrap();
        assert_eq!(listed, vec![inserted]);
    }

    #[tokio::test]
    async fn insert_fails_without_table() {
        let repo = ItemRepository::in_memory().unwrap();
        repo.drop_table().await.unwrap();
        let err = repo.insert(new_item("tee")).await.unwrap_err();
        assert!(matches!(err, ClosetMuseError::Database { .. }));
    }

    #[tokio::test]
    async fn list_paginates_in_id_order() {
        let repo = ItemRepository::in_memory().unwrap();
        for i in 0..5 {
            repo.insert(new_item(&format!("item{i}"))).await.unwrap();
        }

        let page = repo.list(Page { skip: 1, limit: 2 }).await.unwrap();
        let names: Vec<&str> = page.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["item1", "item2"]);

        let all = repo.list(Page::default()).await.unwrap();
        assert_eq!(all.len(), 5);

        let past_end = repo.list(Page { skip: 10, limit: 10 }).await.unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn reopening_file_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("closet.db");
        {
            let repo = ItemRepository::open(&path).unwrap();
            repo.insert(new_item("boots")).await.unwrap();
        }
        let repo = ItemRepository::open(&path).unwrap();
        assert_eq!(repo.list(Page::default()).await.unwrap().len(), 1);
    }
}
