use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::AppError;
use crate::features::gigs::models::GigStatus;
use crate::shared::verification::VerificationStatus;

/// Review stage of an application
///
/// ```text
/// Applied → L1Approved → L2Approved → DirectorApproved → Selected
///    └───────────┴────────────┴──────────────┴──────────→ Rejected
/// ```
///
/// Forward moves may skip stages. Selected and Rejected are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "application_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Applied,
    L1Approved,
    L2Approved,
    DirectorApproved,
    Selected,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::L1Approved => "l1_approved",
            ApplicationStatus::L2Approved => "l2_approved",
            ApplicationStatus::DirectorApproved => "director_approved",
            ApplicationStatus::Selected => "selected",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Position in the approval pipeline; Rejected sits outside it
    fn stage(&self) -> Option<u8> {
        match self {
            ApplicationStatus::Applied => Some(0),
            ApplicationStatus::L1Approved => Some(1),
            ApplicationStatus::L2Approved => Some(2),
            ApplicationStatus::DirectorApproved => Some(3),
            ApplicationStatus::Selected => Some(4),
            ApplicationStatus::Rejected => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ApplicationStatus::Selected | ApplicationStatus::Rejected
        )
    }

    pub fn can_transition(self, target: ApplicationStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match (self.stage(), target.stage()) {
            (_, None) => true,
            (Some(from), Some(to)) => to > from,
            (None, Some(_)) => false,
        }
    }

    pub fn transition(self, target: ApplicationStatus) -> Result<ApplicationStatus, AppError> {
        if self.can_transition(target) {
            Ok(target)
        } else {
            Err(AppError::Conflict(format!(
                "Application cannot move from '{}' to '{}'",
                self.as_str(),
                target.as_str()
            )))
        }
    }
}

pub const APPLICATION_COLUMNS: &str = "a.id, a.gig_id, a.model_id, a.status, a.applied_at, a.updated_at";

#[derive(Debug, Clone, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub gig_id: Uuid,
    pub model_id: Uuid,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Application joined with the applying model's card
#[derive(Debug, Clone, FromRow)]
pub struct Applicant {
    pub id: Uuid,
    pub gig_id: Uuid,
    pub model_id: Uuid,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub full_name: String,
    pub location: Option<String>,
    pub height_cm: Option<i32>,
    pub profile_image_url: Option<String>,
    pub verification_status: VerificationStatus,
}

/// Application joined with the gig it targets
#[derive(Debug, Clone, FromRow)]
pub struct ModelApplication {
    pub id: Uuid,
    pub gig_id: Uuid,
    pub model_id: Uuid,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub gig_title: String,
    pub brand_name: String,
    pub gig_location: String,
    pub gig_date: Option<NaiveDate>,
    pub gig_status: GigStatus,
}
