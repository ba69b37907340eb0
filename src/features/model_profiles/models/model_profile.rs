use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::model_profiles::dtos::ModelProfileResponseDto;
use crate::shared::verification::VerificationStatus;

pub const MODEL_PROFILE_COLUMNS: &str = r#"
    id, user_id, full_name, gender, date_of_birth, height_cm, weight_kg,
    eye_color, hair_color, location, bio, experience_level, instagram_handle,
    phone, profile_image_url, portfolio_image_urls, verification_status,
    created_at, updated_at
"#;

#[derive(Debug, Clone, FromRow)]
pub struct ModelProfile {
    pub id: Uuid,
    pub user_id: Uuid,
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
    pub portfolio_image_urls: Vec<String>,
    pub verification_status: VerificationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ModelProfile> for ModelProfileResponseDto {
    fn from(m: ModelProfile) -> Self {
        Self {
            id: m.id,
            full_name: m.full_name,
            gender: m.gender,
            date_of_birth: m.date_of_birth,
            height_cm: m.height_cm,
            weight_kg: m.weight_kg,
            eye_color: m.eye_color,
            hair_color: m.hair_color,
            location: m.location,
            bio: m.bio,
            experience_level: m.experience_level,
            instagram_handle: m.instagram_handle,
            phone: m.phone,
            profile_image_url: m.profile_image_url,
            portfolio_image_urls: m.portfolio_image_urls,
            verification_status: m.verification_status,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
