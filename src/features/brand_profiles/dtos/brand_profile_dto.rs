use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::shared::constants::MAX_PAGE_SIZE;
use crate::shared::types::{default_page, default_page_size};
use crate::shared::validation::PHONE_REGEX;
use crate::shared::verification::VerificationStatus;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BrandProfileResponseDto {
    pub id: Uuid,
    pub company_name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub logo_url: Option<String>,
    pub verification_status: VerificationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBrandProfileDto {
    #[validate(length(min = 1, max = 200, message = "Company name must be 1-200 characters"))]
    pub company_name: Option<String>,

    #[validate(length(max = 100))]
    pub industry: Option<String>,

    #[validate(url(message = "Website must be a valid URL"))]
    pub website: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(length(max = 200))]
    pub location: Option<String>,

    #[validate(length(max = 200))]
    pub contact_name: Option<String>,

    #[validate(regex(path = *PHONE_REGEX, message = "Invalid phone number"))]
    pub contact_phone: Option<String>,
}

/// Admin listing filter
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct BrandProfileQueryParams {
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    pub verification_status: Option<VerificationStatus>,

    /// Search in company name
    pub search: Option<String>,
}

impl BrandProfileQueryParams {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }

    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_website_must_be_url() {
        let dto = UpdateBrandProfileDto {
            website: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(dto.validate().is_err());

        let dto = UpdateBrandProfileDto {
            website: Some("https://acme.example.com".to_string()),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
    }
}
