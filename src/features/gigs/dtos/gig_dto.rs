use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::gigs::models::{
    ExperienceLevel, GenderPreference, Gig, GigStatus, PaymentType,
};
use crate::shared::constants::MAX_PAGE_SIZE;
use crate::shared::types::{default_page, default_page_size};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GigResponseDto {
    pub id: Uuid,
    pub brand_id: Uuid,
    /// Brand name at the time the gig was posted
    pub brand_name: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub gig_date: Option<NaiveDate>,
    pub timing: Option<String>,
    pub age_min: Option<i32>,
    pub age_max: Option<i32>,
    pub height_min_cm: Option<i32>,
    pub height_max_cm: Option<i32>,
    pub experience_level: ExperienceLevel,
    pub gender_preference: GenderPreference,
    pub payment_type: PaymentType,
    pub budget_min: Option<Decimal>,
    pub budget_max: Option<Decimal>,
    pub status: GigStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Range and payment fields that must agree with each other
#[derive(Debug, Clone, PartialEq)]
pub struct GigRequirements {
    pub age_min: Option<i32>,
    pub age_max: Option<i32>,
    pub height_min_cm: Option<i32>,
    pub height_max_cm: Option<i32>,
    pub payment_type: PaymentType,
    pub budget_min: Option<Decimal>,
    pub budget_max: Option<Decimal>,
}

impl GigRequirements {
    pub fn check(&self) -> Result<(), ValidationError> {
        if let (Some(min), Some(max)) = (self.budget_min, self.budget_max) {
            if max < min {
                return Err(range_error(
                    "budget_range",
                    "Maximum budget must not be lower than minimum budget",
                ));
            }
        }
        if let (Some(min), Some(max)) = (self.age_min, self.age_max) {
            if max < min {
                return Err(range_error(
                    "age_range",
                    "Maximum age must not be lower than minimum age",
                ));
            }
        }
        if let (Some(min), Some(max)) = (self.height_min_cm, self.height_max_cm) {
            if max < min {
                return Err(range_error(
                    "height_range",
                    "Maximum height must not be lower than minimum height",
                ));
            }
        }
        if self.payment_type == PaymentType::Paid && self.budget_min.is_none() {
            return Err(range_error(
                "paid_budget",
                "Paid gigs require a minimum budget",
            ));
        }
        Ok(())
    }

    /// Stored requirements with a patch applied on top
    pub fn patched(gig: &Gig, patch: &UpdateGigDto) -> Self {
        Self {
            age_min: patch.age_min.or(gig.age_min),
            age_max: patch.age_max.or(gig.age_max),
            height_min_cm: patch.height_min_cm.or(gig.height_min_cm),
            height_max_cm: patch.height_max_cm.or(gig.height_max_cm),
            payment_type: patch.payment_type.unwrap_or(gig.payment_type),
            budget_min: patch.budget_min.or(gig.budget_min),
            budget_max: patch.budget_max.or(gig.budget_max),
        }
    }
}

fn range_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Budgets are stored as `NUMERIC(12, 2)`
const MAX_BUDGET_EXCLUSIVE: i64 = 10_000_000_000;
const BUDGET_SCALE: u32 = 2;

fn validate_budget(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        return Err(range_error("budget_negative", "Budget cannot be negative"));
    }
    if *value >= Decimal::from(MAX_BUDGET_EXCLUSIVE) {
        return Err(range_error(
            "budget_too_large",
            "Budget must be below 10,000,000,000",
        ));
    }
    if value.normalize().scale() > BUDGET_SCALE {
        return Err(range_error(
            "budget_precision",
            "Budget cannot have more than 2 decimal places",
        ));
    }
    Ok(())
}

fn validate_create_gig(dto: &CreateGigDto) -> Result<(), ValidationError> {
    dto.requirements().check()
}

fn validate_update_gig(dto: &UpdateGigDto) -> Result<(), ValidationError> {
    // Only pairs present in the patch are checked here; the service re-checks
    // against the stored gig.
    let partial = GigRequirements {
        age_min: dto.age_min,
        age_max: dto.age_max,
        height_min_cm: dto.height_min_cm,
        height_max_cm: dto.height_max_cm,
        payment_type: PaymentType::Unpaid,
        budget_min: dto.budget_min,
        budget_max: dto.budget_max,
    };
    partial.check()
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = validate_create_gig))]
pub struct CreateGigDto {
    #[validate(length(min = 3, max = 200, message = "Title must be 3-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 5000, message = "Description must be 1-5000 characters"))]
    pub description: String,

    #[validate(length(min = 1, max = 200, message = "Location must be 1-200 characters"))]
    pub location: String,

    pub gig_date: Option<NaiveDate>,

    #[validate(length(max = 200))]
    pub timing: Option<String>,

    #[validate(range(min = 0, max = 120))]
    pub age_min: Option<i32>,

    #[validate(range(min = 0, max = 120))]
    pub age_max: Option<i32>,

    #[validate(range(min = 50, max = 260))]
    pub height_min_cm: Option<i32>,

    #[validate(range(min = 50, max = 260))]
    pub height_max_cm: Option<i32>,

    #[serde(default)]
    pub experience_level: ExperienceLevel,

    #[serde(default)]
    pub gender_preference: GenderPreference,

    pub payment_type: PaymentType,

    #[validate(custom(function = validate_budget))]
    pub budget_min: Option<Decimal>,

    #[validate(custom(function = validate_budget))]
    pub budget_max: Option<Decimal>,
}

impl CreateGigDto {
    pub fn requirements(&self) -> GigRequirements {
        GigRequirements {
            age_min: self.age_min,
            age_max: self.age_max,
            height_min_cm: self.height_min_cm,
            height_max_cm: self.height_max_cm,
            payment_type: self.payment_type,
            budget_min: self.budget_min,
            budget_max: self.budget_max,
        }
    }
}

/// Content patch; status is changed only through moderation
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = validate_update_gig))]
pub struct UpdateGigDto {
    #[validate(length(min = 3, max = 200, message = "Title must be 3-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 5000))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,

    pub gig_date: Option<NaiveDate>,

    #[validate(length(max = 200))]
    pub timing: Option<String>,

    #[validate(range(min = 0, max = 120))]
    pub age_min: Option<i32>,

    #[validate(range(min = 0, max = 120))]
    pub age_max: Option<i32>,

    #[validate(range(min = 50, max = 260))]
    pub height_min_cm: Option<i32>,

    #[validate(range(min = 50, max = 260))]
    pub height_max_cm: Option<i32>,

    pub experience_level: Option<ExperienceLevel>,

    pub gender_preference: Option<GenderPreference>,

    pub payment_type: Option<PaymentType>,

    #[validate(custom(function = validate_budget))]
    pub budget_min: Option<Decimal>,

    #[validate(custom(function = validate_budget))]
    pub budget_max: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ModerateGigDto {
    /// `verified` or `rejected`
    pub status: GigStatus,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct GigQueryParams {
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    /// Narrow within what the caller may see
    pub status: Option<GigStatus>,

    /// Brands only: restrict to the caller's own gigs
    #[serde(default)]
    pub mine: bool,

    pub payment_type: Option<PaymentType>,

    /// Case-insensitive substring match
    pub location: Option<String>,

    /// Search in title and description
    pub search: Option<String>,
}

impl GigQueryParams {
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
    use rust_decimal::Decimal;

    fn paid_gig(min: Option<i64>, max: Option<i64>) -> CreateGigDto {
        CreateGigDto {
            title: "Summer lookbook".to_string(),
            description: "Outdoor shoot".to_string(),
            location: "Jakarta".to_string(),
            gig_date: None,
            timing: None,
            age_min: None,
            age_max: None,
            height_min_cm: None,
            height_max_cm: None,
            experience_level: ExperienceLevel::Any,
            gender_preference: GenderPreference::Any,
            payment_type: PaymentType::Paid,
            budget_min: min.map(Decimal::from),
            budget_max: max.map(Decimal::from),
        }
    }

    #[test]
    fn test_valid_paid_gig() {
        assert!(paid_gig(Some(500), Some(1500)).validate().is_ok());
        assert!(paid_gig(Some(500), Some(500)).validate().is_ok());
    }

    #[test]
    fn test_budget_max_below_min_is_rejected() {
        assert!(paid_gig(Some(1500), Some(500)).validate().is_err());
    }

    #[test]
    fn test_paid_gig_needs_budget_min() {
        assert!(paid_gig(None, Some(500)).validate().is_err());

        let mut unpaid = paid_gig(None, None);
        unpaid.payment_type = PaymentType::Unpaid;
        assert!(unpaid.validate().is_ok());
    }

    #[test]
    fn test_inverted_age_and_height_ranges_are_rejected() {
        let mut dto = paid_gig(Some(100), None);
        dto.age_min = Some(30);
        dto.age_max = Some(18);
        assert!(dto.validate().is_err());

        let mut dto = paid_gig(Some(100), None);
        dto.height_min_cm = Some(180);
        dto.height_max_cm = Some(160);
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_negative_budget_is_rejected() {
        assert!(paid_gig(Some(-1), None).validate().is_err());
    }

    #[test]
    fn test_budget_must_fit_the_stored_precision() {
        assert!(paid_gig(Some(500), Some(9_999_999_999)).validate().is_ok());
        assert!(paid_gig(Some(500), Some(10_000_000_000)).validate().is_err());
        assert!(paid_gig(Some(500), Some(100_000_000_000)).validate().is_err());

        let mut dto = paid_gig(None, None);
        dto.budget_min = Some(Decimal::new(50025, 2));
        assert!(dto.validate().is_ok());
        dto.budget_min = Some(Decimal::new(500255, 3));
        assert!(dto.validate().is_err());
        // Trailing zeros do not count as precision
        dto.budget_min = Some(Decimal::new(500250, 3));
        assert!(dto.validate().is_ok());

        let patch = UpdateGigDto {
            budget_max: Some(Decimal::from(10_000_000_000i64)),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn test_update_patch_checks_present_pairs_only() {
        let dto = UpdateGigDto {
            budget_max: Some(Decimal::from(10)),
            ..Default::default()
        };
        assert!(dto.validate().is_ok());

        let dto = UpdateGigDto {
            age_min: Some(40),
            age_max: Some(20),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }
}
