use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::Json,
};

use super::AppState;
use crate::{
    ClosetMuseError, Result,
    models::{ClothingItem, Page},
    storage::ItemUpload,
};

pub async fn list_items(
    State(state): State<AppState>,
    Query(page): Query<Page>,
) -> Result<Json<Vec<ClothingItem>>> {
    Ok(Json(state.wardrobe.list_items(page).await?))
}

/// Multipart form with `name`, `category` and `file`
pub async fn create_item(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ClothingItem>)> {
    let upload = read_upload(multipart).await?;
    let item = state.wardrobe.add_item(upload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn read_upload(mut multipart: Multipart) -> Result<ItemUpload> {
    let mut name = None;
    let mut category = None;
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ClosetMuseError::validation(format!("malformed upload: {e}")))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("name") => name = Some(field_text(field).await?),
            Some("category") => category = Some(field_text(field).await?),
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ClosetMuseError::validation(format!("unreadable file: {e}")))?;
                file = Some((file_name, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (file_name, bytes) = file.ok_or_else(|| ClosetMuseError::validation("missing field 'file'"))?;
    Ok(ItemUpload {
        name: name.ok_or_else(|| ClosetMuseError::validation("missing field 'name'"))?,
        category: category.ok_or_else(|| ClosetMuseError::validation("missing field 'category'"))?,
        file_name,
        bytes,
    })
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| ClosetMuseError::validation(format!("unreadable form field: {e}")))
}
