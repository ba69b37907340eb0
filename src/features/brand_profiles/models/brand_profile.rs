use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::brand_profiles::dtos::BrandProfileResponseDto;
use crate::shared::verification::VerificationStatus;

pub const BRAND_PROFILE_COLUMNS: &str = r#"
    id, user_id, company_name, industry, website, description, location,
    contact_name, contact_phone, logo_url, verification_status,
    created_at, updated_at
"#;

#[derive(Debug, Clone, FromRow)]
pub struct BrandProfile {
    pub id: Uuid,
    pub user_id: Uuid,
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

impl From<BrandProfile> for BrandProfileResponseDto {
    fn from(b: BrandProfile) -> Self {
        Self {
            id: b.id,
            company_name: b.company_name,
            industry: b.industry,
            website: b.website,
            description: b.description,
            location: b.location,
            contact_name: b.contact_name,
            contact_phone: b.contact_phone,
            logo_url: b.logo_url,
            verification_status: b.verification_status,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}
