//! Verification status shared by model and brand profiles.
//!
//! ```text
//!  NotVerified ──(owner request)──▶ Pending ──(admin approve)──▶ Verified
//!       ▲                             │                            │
//!       └────────(admin reject)───────┘                            │
//!       └───────────────────(admin revoke)─────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;

use crate::core::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema, Default)]
#[sqlx(type_name = "verification_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    #[default]
    NotVerified,
    Pending,
    Verified,
}

/// Who is asking for a verification change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationActor {
    Owner,
    Admin,
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::NotVerified => "not_verified",
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
        }
    }

    /// Whether `actor` may move a profile from `self` to `target`
    pub fn can_transition(self, target: VerificationStatus, actor: VerificationActor) -> bool {
        use VerificationActor::*;
        use VerificationStatus::*;

        matches!(
            (self, target, actor),
            (NotVerified, Pending, Owner)
                | (Pending, Verified, Admin)
                | (Pending, NotVerified, Admin)
                | (Verified, NotVerified, Admin)
        )
    }

    /// Check a transition and turn a refusal into a `Conflict`
    pub fn transition(
        self,
        target: VerificationStatus,
        actor: VerificationActor,
    ) -> Result<VerificationStatus, AppError> {
        if self.can_transition(target, actor) {
            Ok(target)
        } else {
            Err(AppError::Conflict(format!(
                "Verification status cannot change from '{}' to '{}'",
                self, target
            )))
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
