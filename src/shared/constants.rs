/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Admin role - moderates gigs, verifies profiles, handles password resets
pub const ROLE_ADMIN: &str = "admin";

/// Brand role - posts gigs, reviews applicants, curates saved lists
pub const ROLE_BRAND: &str = "brand";

/// Model role - maintains a profile and applies for verified gigs
pub const ROLE_MODEL: &str = "model";

// =============================================================================
// UPLOADS
// =============================================================================

/// MIME types accepted for profile and portfolio images
pub const ALLOWED_IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Multipart part-name prefix carrying the client-assigned file id (`file:<id>`)
pub const UPLOAD_PART_PREFIX: &str = "file:";
