//! Admin provisioning.

use tokio::task::spawn_blocking;
use tracing::info;

use crate::{
    auth::{
        AdminUser, AdminUserUuid, AuthServiceError, hash_password, models::NewAdminUser,
        repository::PgAdminUsersRepository, validate_credentials,
    },
    database::Db,
};

/// Creates and looks up admins. Used by the CLI; the HTTP surface never
/// provisions admins.
#[derive(Debug, Clone)]
pub struct PgAdminUsersService {
    repository: PgAdminUsersRepository,
}

impl PgAdminUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            repository: PgAdminUsersRepository::new(db.pool().clone()),
        }
    }

    /// Create a new admin with a freshly hashed password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::AlreadyExists`] when the email is taken
    /// (case-insensitively), or a validation error for implausible input.
    pub async fn create_admin(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AdminUser, AuthServiceError> {
        validate_credentials(email, password)?;

        let password = password.to_owned();
        let password_hash = spawn_blocking(move || hash_password(&password)).await??;

        let admin = self
            .repository
            .create_admin(&NewAdminUser {
                uuid: AdminUserUuid::new(),
                email: email.to_owned(),
                password_hash,
            })
            .await?;

        info!(admin = %admin.uuid, "created admin user");

        Ok(admin)
    }

    /// Look up an admin by email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_admin_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AdminUser>, AuthServiceError> {
        Ok(self
            .repository
            .find_admin_by_email(email)
            .await?
            .map(|credentials| credentials.admin))
    }
}
