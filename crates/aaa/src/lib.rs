//! Authentication, Authorization, Accounting: issues and verifies the
//! Gateway's bearer tokens for admin operations.
//!
//! Single admin user, loaded from the environment at construction. Credential
//! comparison is constant-time (`subtle`) so a wrong password doesn't leak a
//! prefix-match timing signal, an upgrade over the original's plain `!=`,
//! in the same spirit.

use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::error;

/// Token subject identifying the single administrator. Any other subject is
/// an invalid token, even if otherwise well-formed and unexpired.
const ADMIN_SUBJECT: &str = "superuser";

/// Signing key for issued tokens. Process-local: tokens don't need to
/// survive a restart, so there's no need to externalize this as config.
const SECRET_KEY: &[u8] = b"comics-search-internal-signing-key";

#[derive(Debug, thiserror::Error)]
pub enum AaaError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("token signing failed: {0}")]
    Sign(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

pub struct Aaa {
    admin_user: String,
    admin_password: String,
    token_ttl: std::time::Duration,
}

impl Aaa {
    pub fn new(admin_user: String, admin_password: String, token_ttl: std::time::Duration) -> Self {
        Self {
            admin_user,
            admin_password,
            token_ttl,
        }
    }

    /// Constant-time compare against the single configured credential. On
    /// match, mints a bearer token with subject `"superuser"` and expiry
    /// `now + token_ttl`.
    pub fn login(&self, name: &str, password: &str) -> Result<String, AaaError> {
        let user_matches: bool = self.admin_user.as_bytes().ct_eq(name.as_bytes()).into();
        let password_matches: bool = self
            .admin_password
            .as_bytes()
            .ct_eq(password.as_bytes())
            .into();

        if !user_matches || !password_matches {
            return Err(AaaError::InvalidCredentials);
        }

        let ttl = ChronoDuration::from_std(self.token_ttl).unwrap_or(ChronoDuration::zero());
        let claims = Claims {
            sub: ADMIN_SUBJECT.to_string(),
            exp: (Utc::now() + ttl).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET_KEY),
        )
        .map_err(|e| {
            error!(error = %e, "failed to generate token");
            AaaError::Sign(e.to_string())
        })
    }

    /// Verifies signature, expiry, and that the subject is `"superuser"`.
    pub fn verify(&self, token: &str) -> Result<(), AaaError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(SECRET_KEY),
            &Validation::default(),
        )
        .map_err(|e| {
            error!(error = %e, "failed to parse token");
            AaaError::InvalidToken
        })?;

        if data.claims.sub != ADMIN_SUBJECT {
            return Err(AaaError::InvalidToken);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn aaa() -> Aaa {
        Aaa::new("admin".into(), "password".into(), Duration::from_secs(3600))
    }

    #[test]
    fn login_then_verify_round_trips() {
        let aaa = aaa();
        let token = aaa.login("admin", "password").expect("login ok");
        assert!(aaa.verify(&token).is_ok());
    }

    #[test]
    fn wrong_password_is_unauthorized() {
        let aaa = aaa();
        assert!(matches!(
            aaa.login("admin", "wrong"),
            Err(AaaError::InvalidCredentials)
        ));
    }

    #[test]
    fn expired_token_fails_verification() {
        let aaa = Aaa::new("admin".into(), "password".into(), Duration::from_secs(0));
        let token = aaa.login("admin", "password").expect("login ok");
        std::thread::sleep(Duration::from_millis(1100));
        assert!(aaa.verify(&token).is_err());
    }

    #[test]
    fn token_with_wrong_subject_is_invalid() {
        let aaa = aaa();
        let ttl = ChronoDuration::from_std(Duration::from_secs(3600)).unwrap();
        let claims = Claims {
            sub: "not-superuser".to_string(),
            exp: (Utc::now() + ttl).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET_KEY),
        )
        .unwrap();
        assert!(aaa.verify(&token).is_err());
    }
}
