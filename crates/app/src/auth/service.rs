//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use tokio::task::spawn_blocking;

use crate::{
    auth::{
        AccessToken, AdminUser, AdminUserUuid, AuthServiceError, TokenError, TokenSigner,
        password::UNMATCHABLE_HASH, repository::PgAdminUsersRepository, validate_credentials,
        verify_password,
    },
    database::Db,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAdminUsersRepository,
    signer: TokenSigner,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, signer: TokenSigner) -> Self {
        Self {
            repository: PgAdminUsersRepository::new(db.pool().clone()),
            signer,
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, AuthServiceError> {
        validate_credentials(email, password)?;

        let credentials = self.repository.find_admin_by_email(email).await?;

        // Unknown emails still pay for a full verification.
        let password = password.to_owned();
        let hash = credentials.as_ref().map_or_else(
            || UNMATCHABLE_HASH.to_owned(),
            |found| found.password_hash.clone(),
        );

        let verified = spawn_blocking(move || verify_password(&password, &hash)).await?;

        let Some(credentials) = credentials.filter(|_| verified) else {
            return Err(AuthServiceError::InvalidCredentials);
        };

        let token = self
            .signer
            .issue(&credentials.admin.uuid.to_string())
            .map_err(AuthServiceError::Token)?;

        Ok(AccessToken::bearer(token))
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<AdminUser, AuthServiceError> {
        let claims = self
            .signer
            .verify(bearer_token)
            .map_err(AuthServiceError::Unauthenticated)?;

        let Ok(admin) = claims.sub.parse::<AdminUserUuid>() else {
            return Err(AuthServiceError::Unauthenticated(TokenError::UnknownSubject));
        };

        self.repository
            .find_admin_by_uuid(admin)
            .await?
            .ok_or(AuthServiceError::Unauthenticated(TokenError::UnknownSubject))
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange admin credentials for a bearer token.
    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, AuthServiceError>;

    /// Resolve a bearer token to the admin it was issued for.
    async fn authenticate_bearer(&self, bearer_token: &str)
    -> Result<AdminUser, AuthServiceError>;
}
