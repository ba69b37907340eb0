use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::applications::models::{
    Applicant, Application, ApplicationStatus, ModelApplication,
};
use crate::features::gigs::models::GigStatus;
use crate::shared::verification::VerificationStatus;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationResponseDto {
    pub id: Uuid,
    pub gig_id: Uuid,
    pub model_id: Uuid,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Application> for ApplicationResponseDto {
    fn from(a: Application) -> Self {
        Self {
            id: a.id,
            gig_id: a.gig_id,
            model_id: a.model_id,
            status: a.status,
            applied_at: a.applied_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateApplicationStatusDto {
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicantModelDto {
    pub id: Uuid,
    pub full_name: String,
    pub location: Option<String>,
    pub height_cm: Option<i32>,
    pub profile_image_url: Option<String>,
    pub verification_status: VerificationStatus,
}

/// One applicant as the posting brand sees it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicantDto {
    pub application_id: Uuid,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub model: ApplicantModelDto,
}

impl From<Applicant> for ApplicantDto {
    fn from(a: Applicant) -> Self {
        Self {
            application_id: a.id,
            status: a.status,
            applied_at: a.applied_at,
            updated_at: a.updated_at,
            model: ApplicantModelDto {
                id: a.model_id,
                full_name: a.full_name,
                location: a.location,
                height_cm: a.height_cm,
                profile_image_url: a.profile_image_url,
                verification_status: a.verification_status,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationGigDto {
    pub id: Uuid,
    pub title: String,
    pub brand_name: String,
    pub location: String,
    pub gig_date: Option<NaiveDate>,
    pub status: GigStatus,
}

/// One of the caller's own applications
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ModelApplicationDto {
    pub application_id: Uuid,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub gig: ApplicationGigDto,
}

impl From<ModelApplication> for ModelApplicationDto {
    fn from(a: ModelApplication) -> Self {
        Self {
            application_id: a.id,
            status: a.status,
            applied_at: a.applied_at,
            updated_at: a.updated_at,
            gig: ApplicationGigDto {
                id: a.gig_id,
                title: a.gig_title,
                brand_name: a.brand_name,
                location: a.gig_location,
                gig_date: a.gig_date,
                status: a.gig_status,
            },
        }
    }
}
