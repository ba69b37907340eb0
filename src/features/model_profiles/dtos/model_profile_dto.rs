use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::shared::constants::MAX_PAGE_SIZE;
use crate::shared::types::{default_page, default_page_size};
use crate::shared::validation::{INSTAGRAM_HANDLE_REGEX, PHONE_REGEX};
use crate::shared::verification::VerificationStatus;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModelProfileResponseDto {
    pub id: Uuid,
    pub full_name: String,
    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub height_cm: Option<i32>,
    pub weight_kg: Option<i32>,
    pub eye_color: Option<String>,
    pub hair_color: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub experience_level: Option<String>,
    pub instagram_handle: Option<String>,
    pub phone: Option<String>,
    pub profile_image_url: Option<String>,
    /// Ordered as uploaded
    pub portfolio_image_urls: Vec<String>,
    pub verification_status: VerificationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateModelProfileDto {
    #[validate(length(min = 1, max = 200, message = "Full name must be 1-200 characters"))]
    pub full_name: Option<String>,

    #[validate(length(max = 50))]
    pub gender: Option<String>,

    #[validate(custom(function = validate_date_of_birth))]
    pub date_of_birth: Option<NaiveDate>,

    #[validate(range(min = 50, max = 260, message = "Height must be 50-260 cm"))]
    pub height_cm: Option<i32>,

    #[validate(range(min = 20, max = 300, message = "Weight must be 20-300 kg"))]
    pub weight_kg: Option<i32>,

    #[validate(length(max = 50))]
    pub eye_color: Option<String>,

    #[validate(length(max = 50))]
    pub hair_color: Option<String>,

    #[validate(length(max = 200))]
    pub location: Option<String>,

    #[validate(length(max = 2000, message = "Bio must not exceed 2000 characters"))]
    pub bio: Option<String>,

    #[validate(length(max = 50))]
    pub experience_level: Option<String>,

    /// Without the leading `@`
    #[validate(regex(path = *INSTAGRAM_HANDLE_REGEX, message = "Invalid Instagram handle"))]
    pub instagram_handle: Option<String>,

    #[validate(regex(path = *PHONE_REGEX, message = "Invalid phone number"))]
    pub phone: Option<String>,
}

pub(crate) fn validate_date_of_birth(date: &NaiveDate) -> Result<(), ValidationError> {
    let today = Utc::now().date_naive();
    if *date > today {
        return Err(ValidationError::new("date_of_birth_in_future")
            .with_message("Date of birth cannot be in the future".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ModelProfileQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    pub verification_status: Option<VerificationStatus>,

    /// Case-insensitive substring match
    pub location: Option<String>,

    pub gender: Option<String>,

    /// Search in full name
    pub search: Option<String>,
}

impl ModelProfileQueryParams {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }

    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}
