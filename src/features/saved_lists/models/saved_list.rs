use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::saved_lists::dtos::SavedListResponseDto;

pub const SAVED_LIST_COLUMNS: &str = "id, brand_id, name, model_ids, created_at, updated_at";

#[derive(Debug, Clone, FromRow)]
pub struct SavedList {
    pub id: Uuid,
    pub brand_id: Uuid,
    pub name: String,
    pub model_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SavedList> for SavedListResponseDto {
    fn from(l: SavedList) -> Self {
        Self {
            id: l.id,
            name: l.name,
            model_count: l.model_ids.len(),
            model_ids: l.model_ids,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}
