//! Auth data models.

use std::fmt;

use jiff::Timestamp;

use crate::{
    uuids::TypedUuid,
    validation::{self, ValidationErrors},
};

/// Admin UUID
pub type AdminUserUuid = TypedUuid<AdminUser>;

/// Token type reported alongside every issued access token.
pub const BEARER_TOKEN_TYPE: &str = "bearer";

/// An administrator allowed to manage the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminUser {
    pub uuid: AdminUserUuid,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Stored admin row, including the password hash.
#[derive(Debug, Clone)]
pub(crate) struct AdminCredentials {
    pub admin: AdminUser,
    pub password_hash: String,
}

/// New admin persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewAdminUser {
    pub uuid: AdminUserUuid,
    pub email: String,
    pub password_hash: String,
}

/// A freshly issued access token.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: &'static str,
}

impl AccessToken {
    #[must_use]
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: BEARER_TOKEN_TYPE,
        }
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"**redacted**")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Check login or provisioning input before touching storage.
///
/// # Errors
///
/// Returns field errors for an implausible email or an empty password.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    errors.check("email", validation::email(email));

    if password.is_empty() {
        errors.add("password", "must be at least 1 characters");
    }

    errors.into_result()
}
