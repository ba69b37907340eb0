use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::accounts::{dtos as accounts_dtos, handlers as accounts_handlers};
use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::applications::{
    dtos as applications_dtos, handlers as applications_handlers, models as applications_models,
};
use crate::features::auth;
use crate::features::brand_profiles::{
    dtos as brand_profiles_dtos, handlers as brand_profiles_handlers,
};
use crate::features::gigs::{dtos as gigs_dtos, handlers as gigs_handlers, models as gigs_models};
use crate::features::legacy_import::{dtos as import_dtos, handlers as import_handlers};
use crate::features::model_profiles::{
    dtos as model_profiles_dtos, handlers as model_profiles_handlers,
};
use crate::features::password_resets::{
    dtos as password_resets_dtos, handlers as password_resets_handlers,
    models as password_resets_models,
};
use crate::features::saved_lists::{dtos as saved_lists_dtos, handlers as saved_lists_handlers};
use crate::features::uploads::{
    dtos as uploads_dtos, handlers as uploads_handlers, models as uploads_models,
};
use crate::shared::types::{ApiResponse, Meta};
use crate::shared::verification::VerificationStatus;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::get_me,
        // Accounts
        accounts_handlers::onboard,
        accounts_handlers::get_my_account,
        // Model profiles
        model_profiles_handlers::get_my_profile,
        model_profiles_handlers::update_my_profile,
        model_profiles_handlers::request_verification,
        model_profiles_handlers::list_profiles,
        model_profiles_handlers::get_profile,
        // Brand profiles
        brand_profiles_handlers::get_my_brand,
        brand_profiles_handlers::update_my_brand,
        brand_profiles_handlers::request_brand_verification,
        brand_profiles_handlers::get_brand,
        // Gigs
        gigs_handlers::create_gig,
        gigs_handlers::list_gigs,
        gigs_handlers::get_gig,
        gigs_handlers::update_gig,
        gigs_handlers::delete_gig,
        // Applications
        applications_handlers::apply_for_gig,
        applications_handlers::list_applicants,
        applications_handlers::update_application_status,
        applications_handlers::list_my_applications,
        // Saved lists
        saved_lists_handlers::create_list,
        saved_lists_handlers::list_lists,
        saved_lists_handlers::get_list,
        saved_lists_handlers::rename_list,
        saved_lists_handlers::delete_list,
        saved_lists_handlers::add_models,
        saved_lists_handlers::remove_model,
        // Uploads
        uploads_handlers::upload_profile_image,
        uploads_handlers::replace_portfolio,
        uploads_handlers::upload_brand_logo,
        // Password resets (public)
        password_resets_handlers::create_request,
        // Admin
        admin_handlers::get_overview,
        admin_handlers::list_gigs,
        admin_handlers::moderate_gig,
        admin_handlers::list_models,
        admin_handlers::set_model_verification,
        admin_handlers::list_brands,
        admin_handlers::set_brand_verification,
        password_resets_handlers::list_requests,
        password_resets_handlers::resolve_request,
        import_handlers::import_legacy_csv,
    ),
    components(
        schemas(
            // Shared
            Meta,
            VerificationStatus,
            // Auth
            auth::dtos::MeResponseDto,
            auth::model::AuthenticatedUser,
            ApiResponse<auth::dtos::MeResponseDto>,
            // Accounts
            accounts_dtos::OnboardDto,
            accounts_dtos::AccountResponseDto,
            ApiResponse<accounts_dtos::AccountResponseDto>,
            // Model profiles
            model_profiles_dtos::ModelProfileResponseDto,
            model_profiles_dtos::UpdateModelProfileDto,
            ApiResponse<model_profiles_dtos::ModelProfileResponseDto>,
            ApiResponse<Vec<model_profiles_dtos::ModelProfileResponseDto>>,
            // Brand profiles
            brand_profiles_dtos::BrandProfileResponseDto,
            brand_profiles_dtos::UpdateBrandProfileDto,
            ApiResponse<brand_profiles_dtos::BrandProfileResponseDto>,
            ApiResponse<Vec<brand_profiles_dtos::BrandProfileResponseDto>>,
            // Gigs
            gigs_models::GigStatus,
            gigs_models::PaymentType,
            gigs_models::ExperienceLevel,
            gigs_models::GenderPreference,
            gigs_dtos::GigResponseDto,
            gigs_dtos::CreateGigDto,
            gigs_dtos::UpdateGigDto,
            gigs_dtos::ModerateGigDto,
            ApiResponse<gigs_dtos::GigResponseDto>,
            ApiResponse<Vec<gigs_dtos::GigResponseDto>>,
            // Applications
            applications_models::ApplicationStatus,
            applications_dtos::ApplicationResponseDto,
            applications_dtos::UpdateApplicationStatusDto,
            applications_dtos::ApplicantModelDto,
            applications_dtos::ApplicantDto,
            applications_dtos::ApplicationGigDto,
            applications_dtos::ModelApplicationDto,
            ApiResponse<applications_dtos::ApplicationResponseDto>,
            ApiResponse<Vec<applications_dtos::ApplicantDto>>,
            ApiResponse<Vec<applications_dtos::ModelApplicationDto>>,
            // Saved lists
            saved_lists_dtos::SavedListResponseDto,
            saved_lists_dtos::CreateSavedListDto,
            saved_lists_dtos::RenameSavedListDto,
            saved_lists_dtos::AddModelsDto,
            ApiResponse<saved_lists_dtos::SavedListResponseDto>,
            ApiResponse<Vec<saved_lists_dtos::SavedListResponseDto>>,
            // Uploads
            uploads_models::UploadStatus,
            uploads_dtos::ImageUploadForm,
            uploads_dtos::UploadedFileDto,
            uploads_dtos::UploadReportDto,
            ApiResponse<uploads_dtos::UploadReportDto>,
            // Password resets
            password_resets_models::ResetRequestStatus,
            password_resets_dtos::CreatePasswordResetDto,
            password_resets_dtos::PasswordResetResponseDto,
            ApiResponse<password_resets_dtos::PasswordResetResponseDto>,
            ApiResponse<Vec<password_resets_dtos::PasswordResetResponseDto>>,
            // Admin
            admin_dtos::SetVerificationDto,
            admin_dtos::GigCountsDto,
            admin_dtos::ApplicationCountsDto,
            admin_dtos::PendingVerificationsDto,
            admin_dtos::AdminOverviewDto,
            ApiResponse<admin_dtos::AdminOverviewDto>,
            // Legacy import
            import_dtos::LegacyImportForm,
            import_dtos::ImportCountsDto,
            import_dtos::ImportRowErrorDto,
            import_dtos::ImportReportDto,
            ApiResponse<import_dtos::ImportReportDto>,
        )
    ),
    tags(
        (name = "auth", description = "Token introspection"),
        (name = "accounts", description = "First-login onboarding and account lookup"),
        (name = "models", description = "Model profiles"),
        (name = "brands", description = "Brand profiles"),
        (name = "gigs", description = "Gig postings and their moderation lifecycle"),
        (name = "applications", description = "Model applications and the brand review funnel"),
        (name = "saved-lists", description = "Brand-curated lists of models"),
        (name = "uploads", description = "Profile images, portfolios and logos"),
        (name = "password-resets", description = "Manual password reset requests"),
        (name = "admin", description = "Moderation, verification and legacy import (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Gigboard API",
        version = "0.1.0",
        description = "API documentation for the Gigboard marketplace",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Overrides the generated info block with configured values
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
