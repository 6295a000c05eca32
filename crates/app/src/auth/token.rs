//! Signed bearer tokens.
//!
//! Tokens are compact HS256 JWTs carrying `{"sub": <subject>, "exp": <unix seconds>}`.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroizing;

/// Default token lifetime: 24 hours.
pub const DEFAULT_TOKEN_TTL: SignedDuration = SignedDuration::from_hours(24);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    BadSignature,

    #[error("token subject is unknown")]
    UnknownSubject,

    #[error("signing key must not be empty")]
    EmptyKey,

    #[error("token could not be signed")]
    Signing,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        match error.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::BadSignature,
            _ => Self::Malformed,
        }
    }
}

/// Verified token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
}

/// Issues and verifies tokens with a single symmetric key.
#[derive(Clone)]
pub struct TokenSigner {
    key: Zeroizing<Vec<u8>>,
    ttl: SignedDuration,
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("key", &"**redacted**")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenSigner {
    /// # Errors
    ///
    /// Returns [`TokenError::EmptyKey`] when `secret` is empty.
    pub fn new(secret: &[u8], ttl: SignedDuration) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptyKey);
        }

        Ok(Self {
            key: Zeroizing::new(secret.to_vec()),
            ttl,
        })
    }

    #[must_use]
    pub const fn ttl(&self) -> SignedDuration {
        self.ttl
    }

    /// Issue a token for `subject` using the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] if the claims cannot be encoded.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.issue_with_ttl(subject, self.ttl)
    }

    /// Issue a token for `subject` expiring `ttl` from now. A negative `ttl`
    /// yields a token that is already expired.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Signing`] if the claims cannot be encoded.
    pub fn issue_with_ttl(&self, subject: &str, ttl: SignedDuration) -> Result<String, TokenError> {
        let claims = Claims {
            sub: subject.to_owned(),
            exp: Timestamp::now().as_second().saturating_add(ttl.as_secs()),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.key),
        )
        .map_err(|_ignored| TokenError::Signing)
    }

    /// Verify `token` against the current time, with no clock leeway.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Malformed`], [`TokenError::BadSignature`] or
    /// [`TokenError::Expired`].
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);

        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &DecodingKey::from_secret(&self.key), &validation)?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(b"test-secret-key", DEFAULT_TOKEN_TTL).expect("static key is non-empty")
    }

    #[test]
    fn issued_token_verifies() -> TestResult {
        let signer = signer();
        let token = signer.issue("admin-1")?;

        let claims = signer.verify(&token)?;

        assert_eq!(claims.sub, "admin-1");
        assert!(claims.exp > Timestamp::now().as_second());

        Ok(())
    }

    #[test]
    fn token_has_three_segments() -> TestResult {
        let token = signer().issue("admin-1")?;

        assert_eq!(token.split('.').count(), 3);

        Ok(())
    }

    #[test]
    fn negative_ttl_is_expired() -> TestResult {
        let signer = signer();
        let token = signer.issue_with_ttl("admin-1", SignedDuration::from_hours(-1))?;

        assert_eq!(signer.verify(&token), Err(TokenError::Expired));

        Ok(())
    }

    #[test]
    fn expiry_allows_no_leeway() -> TestResult {
        let signer = signer();
        let token = signer.issue_with_ttl("admin-1", SignedDuration::from_secs(-2))?;

        assert_eq!(signer.verify(&token), Err(TokenError::Expired));

        Ok(())
    }

    #[test]
    fn other_algorithm_is_malformed() -> TestResult {
        let signer = signer();
        let token = encode(
            &Header::new(Algorithm::HS384),
            &Claims {
                sub: "admin-1".to_string(),
                exp: Timestamp::now().as_second() + 60,
            },
            &EncodingKey::from_secret(b"test-secret-key"),
        )?;

        assert_eq!(signer.verify(&token), Err(TokenError::Malformed));

        Ok(())
    }

    #[test]
    fn missing_subject_is_malformed() -> TestResult {
        #[derive(Serialize)]
        struct ExpiryOnly {
            exp: i64,
        }

        let signer = signer();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &ExpiryOnly {
                exp: Timestamp::now().as_second() + 60,
            },
            &EncodingKey::from_secret(b"test-secret-key"),
        )?;

        assert_eq!(signer.verify(&token), Err(TokenError::Malformed));

        Ok(())
    }

    #[test]
    fn swapped_claims_fail_signature() -> TestResult {
        let signer = signer();
        let alice = signer.issue("alice")?;
        let bob = signer.issue("bob")?;

        let alice_parts: Vec<&str> = alice.split('.').collect();
        let bob_parts: Vec<&str> = bob.split('.').collect();

        let forged = format!("{}.{}.{}", alice_parts[0], bob_parts[1], alice_parts[2]);

        assert_eq!(signer.verify(&forged), Err(TokenError::BadSignature));

        Ok(())
    }

    #[test]
    fn other_key_fails_signature() -> TestResult {
        let token = signer().issue("admin-1")?;
        let other = TokenSigner::new(b"another-key", DEFAULT_TOKEN_TTL)?;

        assert_eq!(other.verify(&token), Err(TokenError::BadSignature));

        Ok(())
    }

    #[test]
    fn garbage_is_malformed() {
        let signer = signer();

        for token in ["", "abc", "a.b", "a.b.c.d", "!!.??.**"] {
            assert_eq!(
                signer.verify(token),
                Err(TokenError::Malformed),
                "{token:?} should be malformed"
            );
        }
    }

    #[test]
    fn unsigned_algorithm_is_malformed() -> TestResult {
        let signer = signer();
        let token = signer.issue("admin-1")?;
        let mut parts = token.split('.').skip(1);
        let claims = parts.next().unwrap_or_default();

        // {"alg":"none","typ":"JWT"}
        let header = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0";

        assert_eq!(
            signer.verify(&format!("{header}.{claims}.")),
            Err(TokenError::Malformed)
        );

        Ok(())
    }

    #[test]
    fn empty_key_is_rejected() {
        assert_eq!(
            TokenSigner::new(b"", DEFAULT_TOKEN_TTL).err(),
            Some(TokenError::EmptyKey)
        );
    }

    #[test]
    fn debug_output_redacts_key() {
        let rendered = format!("{:?}", signer());

        assert!(!rendered.contains("test-secret-key"));
        assert!(rendered.contains("redacted"));
    }
}
