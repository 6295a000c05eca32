//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use wisteria_app::auth::AdminUser;

const ADMIN_USER_DEPOT_KEY: &str = "admin_user";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_admin_user(&mut self, admin: AdminUser);

    /// The admin resolved by the auth gate.
    fn admin_user_or_401(&self) -> Result<&AdminUser, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_admin_user(&mut self, admin: AdminUser) {
        self.insert(ADMIN_USER_DEPOT_KEY, admin);
    }

    fn admin_user_or_401(&self) -> Result<&AdminUser, StatusError> {
        self.get::<AdminUser>(ADMIN_USER_DEPOT_KEY)
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
