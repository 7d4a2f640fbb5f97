//! Admin session service.
//!
//! Single-password back-office login issuing signed session tokens. There
//! are no user accounts; a valid token carries an `admin` claim and nothing
//! else identity-related.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use realty_common::config::AuthConfig;
use realty_common::{AppError, AppResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    admin: bool,
    iat: i64,
    exp: i64,
}

/// Issues and verifies admin session tokens.
#[derive(Clone)]
pub struct SessionService {
    auth: AuthConfig,
}

impl SessionService {
    /// Create a new session service.
    #[must_use]
    pub const fn new(auth: AuthConfig) -> Self {
        Self { auth }
    }

    /// Session validity window in hours. Also the cookie lifetime.
    #[must_use]
    pub const fn session_ttl_hours(&self) -> i64 {
        self.auth.session_ttl_hours
    }

    /// Exchange the admin password for a signed session token.
    ///
    /// A wrong password is [`AppError::Unauthorized`]; missing password or
    /// signing secret configuration is [`AppError::Config`] so operators can
    /// tell a misconfigured deployment from a failed login attempt.
    pub fn login(&self, password: &str) -> AppResult<String> {
        let expected = self
            .auth
            .admin_password
            .as_deref()
            .ok_or_else(|| AppError::Config("Admin password not configured".to_string()))?;

        if !constant_time_eq(password.as_bytes(), expected.as_bytes()) {
            return Err(AppError::Unauthorized);
        }

        self.issue_token()
    }

    fn issue_token(&self) -> AppResult<String> {
        let secret = self
            .auth
            .jwt_secret
            .as_deref()
            .ok_or_else(|| AppError::Config("Session signing secret not configured".to_string()))?;

        let now = Utc::now();
        let claims = Claims {
            admin: true,
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.auth.session_ttl_hours)).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(e.to_string()))
    }

    /// Check a session token.
    ///
    /// Never errors: an expired, tampered, malformed or non-admin token is
    /// simply not a session. Expiry is validated against the embedded claim.
    #[must_use]
    pub fn verify(&self, token: &str) -> bool {
        let Some(secret) = self.auth.jwt_secret.as_deref() else {
            return false;
        };

        let mut validation = Validation::new(Algorithm::HS256);
        // No clock tolerance: a token past its exp is not a session.
        validation.leeway = 0;
        match decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        ) {
            Ok(data) => data.claims.admin,
            Err(_) => false,
        }
    }
}

/// Byte-wise comparison without early exit, so timing does not leak how
/// much of the password matched.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
