//! Auth Config

use std::num::NonZeroU32;

use clap::Args;
use jiff::SignedDuration;

/// Token signing and login settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Symmetric key used to sign access tokens
    #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Lifetime of issued access tokens, in minutes
    #[arg(long, env = "ACCESS_TOKEN_EXPIRE_MINUTES", default_value_t = 1440)]
    pub access_token_expire_minutes: u32,

    /// Login attempts allowed per client address each minute
    #[arg(long, env = "LOGIN_ATTEMPTS_PER_MINUTE", default_value = "5")]
    pub login_attempts_per_minute: NonZeroU32,
}

impl AuthConfig {
    #[must_use]
    pub fn token_ttl(&self) -> SignedDuration {
        SignedDuration::from_mins(i64::from(self.access_token_expire_minutes))
    }
}
