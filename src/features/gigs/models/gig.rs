use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::features::gigs::dtos::GigResponseDto;

/// Moderation state of a gig
///
/// ```text
/// Pending ──(admin)──▶ Verified
///    └─────(admin)──▶ Rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "gig_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GigStatus {
    Pending,
    Verified,
    Rejected,
}

impl GigStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GigStatus::Pending => "pending",
            GigStatus::Verified => "verified",
            GigStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, GigStatus::Pending)
    }

    pub fn can_transition(self, target: GigStatus) -> bool {
        matches!(
            (self, target),
            (GigStatus::Pending, GigStatus::Verified) | (GigStatus::Pending, GigStatus::Rejected)
        )
    }

    pub fn transition(self, target: GigStatus) -> Result<GigStatus, AppError> {
        if self.can_transition(target) {
            Ok(target)
        } else {
            Err(AppError::Conflict(format!(
                "Gig status cannot change from '{}' to '{}'",
                self.as_str(),
                target.as_str()
            )))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "experience_level", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    #[default]
    Any,
    Beginner,
    Intermediate,
    Professional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "gender_preference", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GenderPreference {
    #[default]
    Any,
    Female,
    Male,
    NonBinary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "payment_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Paid,
    Unpaid,
    Barter,
}

pub const GIG_COLUMNS: &str = r#"
    g.id, g.brand_id, g.brand_name, g.title, g.description, g.location,
    g.gig_date, g.timing, g.age_min, g.age_max, g.height_min_cm, g.height_max_cm,
    g.experience_level, g.gender_preference, g.payment_type,
    g.budget_min, g.budget_max, g.status, g.created_at, g.updated_at
"#;

#[derive(Debug, Clone, FromRow)]
pub struct Gig {
    pub id: Uuid,
    pub brand_id: Uuid,
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

impl From<Gig> for GigResponseDto {
    fn from(g: Gig) -> Self {
        Self {
            id: g.id,
            brand_id: g.brand_id,
            brand_name: g.brand_name,
            title: g.title,
            description: g.description,
            location: g.location,
            gig_date: g.gig_date,
            timing: g.timing,
            age_min: g.age_min,
            age_max: g.age_max,
            height_min_cm: g.height_min_cm,
            height_max_cm: g.height_max_cm,
            experience_level: g.experience_level,
            gender_preference: g.gender_preference,
            payment_type: g.payment_type,
            budget_min: g.budget_min,
            budget_max: g.budget_max,
            status: g.status,
            created_at: g.created_at,
            updated_at: g.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GigStatus::*;
    use super::*;

    #[test]
    fn test_only_pending_gigs_move() {
        assert!(Pending.can_transition(Verified));
        assert!(Pending.can_transition(Rejected));

        for terminal in [Verified, Rejected] {
            assert!(terminal.is_terminal());
            for target in [Pending, Verified, Rejected] {
                assert!(!terminal.can_transition(target));
            }
        }
        assert!(!Pending.can_transition(Pending));
    }

    #[test]
    fn test_refused_transition_is_conflict() {
        assert!(matches!(
            Verified.transition(Rejected),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&GenderPreference::NonBinary).unwrap(),
            "\"non_binary\""
        );
        let paid: PaymentType = serde_json::from_str("\"paid\"").unwrap();
        assert_eq!(paid, PaymentType::Paid);
    }
}
