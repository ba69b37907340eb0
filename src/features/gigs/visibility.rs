//! Who may see which gigs.
//!
//! Models see Verified gigs only. Brands see their own gigs in any status
//! plus Verified gigs of other brands. Admins see everything. A gig outside
//! the caller's view reads as not found.

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::gigs::models::GigStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Model,
    Brand(Uuid),
    Admin,
}

/// Predicate over `gigs g` bound as (`$1` = sees everything, `$2` = own brand id)
pub const VISIBILITY_PREDICATE: &str =
    "($1::boolean OR g.status = 'verified'::gig_status OR g.brand_id = $2::uuid)";

impl Viewer {
    /// Strongest role wins; the brand id is only looked up when needed
    pub async fn resolve<F, Fut>(user: &AuthenticatedUser, brand_lookup: F) -> Result<Viewer>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<Uuid>>,
    {
        if user.is_admin() {
            Ok(Viewer::Admin)
        } else if user.is_brand() {
            Ok(Viewer::Brand(brand_lookup().await?))
        } else if user.is_model() {
            Ok(Viewer::Model)
        } else {
            Err(AppError::Forbidden(
                "A marketplace role is required to view gigs".to_string(),
            ))
        }
    }

    pub fn can_see(&self, gig_brand_id: Uuid, status: GigStatus) -> bool {
        match self {
            Viewer::Admin => true,
            Viewer::Brand(own) => status == GigStatus::Verified || *own == gig_brand_id,
            Viewer::Model => status == GigStatus::Verified,
        }
    }

    /// Bind values for [`VISIBILITY_PREDICATE`]
    pub fn binds(&self) -> (bool, Option<Uuid>) {
        match self {
            Viewer::Admin => (true, None),
            Viewer::Brand(own) => (false, Some(*own)),
            Viewer::Model => (false, None),
        }
    }

    pub fn brand_id(&self) -> Option<Uuid> {
        match self {
            Viewer::Brand(own) => Some(*own),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_admin_user, create_brand_user, create_model_user};
    use fake::{Fake, Faker};

    const STATUSES: [GigStatus; 3] = [GigStatus::Pending, GigStatus::Verified, GigStatus::Rejected];

    fn random_gigs(brands: &[Uuid], count: usize) -> Vec<(Uuid, GigStatus)> {
        (0..count)
            .map(|_| {
                let brand = brands[(0..brands.len()).fake::<usize>()];
                let status = STATUSES[(0..STATUSES.len()).fake::<usize>()];
                (brand, status)
            })
            .collect()
    }

    #[test]
    fn test_model_sees_exactly_verified_gigs() {
        let brands: Vec<Uuid> = (0..4).map(|_| Faker.fake()).collect();
        let gigs = random_gigs(&brands, 200);

        let visible: Vec<_> = gigs
            .iter()
            .filter(|(brand, status)| Viewer::Model.can_see(*brand, *status))
            .collect();
        let verified: Vec<_> = gigs
            .iter()
            .filter(|(_, status)| *status == GigStatus::Verified)
            .collect();

        assert_eq!(visible, verified);
    }

    #[test]
    fn test_brand_sees_own_gigs_in_any_status() {
        let brands: Vec<Uuid> = (0..3).map(|_| Faker.fake()).collect();
        let viewer = Viewer::Brand(brands[0]);

        for (brand, status) in random_gigs(&brands, 200) {
            let expected = brand == brands[0] || status == GigStatus::Verified;
            assert_eq!(viewer.can_see(brand, status), expected);
        }
    }

    #[test]
    fn test_admin_sees_everything() {
        let brand: Uuid = Faker.fake();
        for status in STATUSES {
            assert!(Viewer::Admin.can_see(brand, status));
        }
    }

    #[test]
    fn test_resolve_prefers_admin_and_requires_a_role() {
        let mut both = create_brand_user();
        both.roles.push("admin".to_string());

        let viewer = tokio_test::block_on(Viewer::resolve(&both, || async {
            Err(AppError::Internal("brand lookup should not run".to_string()))
        }))
        .unwrap();
        assert_eq!(viewer, Viewer::Admin);

        let brand_id: Uuid = Faker.fake();
        let viewer = tokio_test::block_on(Viewer::resolve(&create_brand_user(), || async move {
            Ok(brand_id)
        }))
        .unwrap();
        assert_eq!(viewer, Viewer::Brand(brand_id));

        let viewer = tokio_test::block_on(Viewer::resolve(&create_model_user(), || async {
            Ok(Uuid::nil())
        }))
        .unwrap();
        assert_eq!(viewer, Viewer::Model);

        let mut nobody = create_admin_user();
        nobody.roles.clear();
        let result = tokio_test::block_on(Viewer::resolve(&nobody, || async { Ok(Uuid::nil()) }));
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_binds_match_can_see() {
        let own: Uuid = Faker.fake();
        let other: Uuid = Faker.fake();

        for viewer in [Viewer::Model, Viewer::Brand(own), Viewer::Admin] {
            let (sees_all, bound_brand) = viewer.binds();
            for brand in [own, other] {
                for status in STATUSES {
                    // Mirrors VISIBILITY_PREDICATE
                    let sql_result =
                        sees_all || status == GigStatus::Verified || bound_brand == Some(brand);
                    assert_eq!(sql_result, viewer.can_see(brand, status));
                }
            }
        }
    }
}
