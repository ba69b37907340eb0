use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::shared::validation::validate_not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SavedListResponseDto {
    pub id: Uuid,
    pub name: String,
    /// In the order they were added
    pub model_ids: Vec<Uuid>,
    pub model_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSavedListDto {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = validate_not_blank)
    )]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500))]
    pub model_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RenameSavedListDto {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = validate_not_blank)
    )]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddModelsDto {
    #[validate(length(min = 1, max = 500, message = "Provide 1-500 model ids"))]
    pub model_ids: Vec<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_only_names_are_rejected() {
        let create = CreateSavedListDto {
            name: "   ".to_string(),
            model_ids: vec![],
        };
        assert!(create.validate().is_err());

        let rename = RenameSavedListDto {
            name: "\t ".to_string(),
        };
        assert!(rename.validate().is_err());

        let rename = RenameSavedListDto {
            name: " Runway shortlist ".to_string(),
        };
        assert!(rename.validate().is_ok());
    }
}
