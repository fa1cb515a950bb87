//! User accounts and authentication types.
//!
//! ## Authentication Flow
//!
//! 1. **Registration**: email + password + username create a user and
//!    its paired profile row in one transaction, then sign the user in
//! 2. **Login**: credentials are verified against the stored argon2
//!    hash, returning an access token and a refresh token
//! 3. **Token Refresh**: access tokens (15 min) are rotated via stored
//!    refresh tokens (30 days)
//! 4. **Logout**: the caller's refresh tokens are revoked
//!
//! Credential failures collapse into a single [`AuthError::InvalidCredentials`]
//! so responses never reveal which of email or password was wrong.

pub mod value_objects;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cinelog_model::UserId;

use value_objects::{
    Email, EmailError, Password, PasswordError, Username, UsernameError,
};

/// A registered account.
///
/// The password hash lives in its own storage table and is never part
/// of this type, so it cannot be serialized by accident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Access-token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Owning user id.
    pub sub: Uuid,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Token id.
    pub jti: String,
}

/// Authentication failures, worded for direct display.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password. Please try again.")]
    InvalidCredentials,

    #[error("This email is already registered. Try signing in instead.")]
    EmailTaken,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Internal error")]
    InternalError,
}

/// Field-level validation failures for the register form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error(transparent)]
    Email(#[from] EmailError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Username(#[from] UsernameError),
}

/// Raw registration payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

/// Registration payload after field validation.
#[derive(Debug, Clone)]
pub struct ValidatedRegistration {
    pub email: Email,
    pub password: Password,
    pub username: Username,
}

impl RegisterRequest {
    /// Validate every field, normalizing email and username.
    pub fn validate(self) -> Result<ValidatedRegistration, ValidationError> {
        Ok(ValidatedRegistration {
            email: Email::new(&self.email)?,
            password: Password::new(self.password)?,
            username: Username::new(&self.username)?,
        })
    }
}

/// Raw login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str, username: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            username: username.to_string(),
        }
    }

    #[test]
    fn valid_registration_normalizes_fields() {
        let validated = request(" You@Example.com ", "secret1", "MovieFan")
            .validate()
            .unwrap();
        assert_eq!(validated.email.as_str(), "you@example.com");
        assert_eq!(validated.username.as_str(), "moviefan");
    }

    #[test]
    fn each_field_is_checked() {
        assert!(matches!(
            request("nope", "secret1", "moviefan").validate(),
            Err(ValidationError::Email(_))
        ));
        assert!(matches!(
            request("you@example.com", "short", "moviefan").validate(),
            Err(ValidationError::Password(_))
        ));
        assert!(matches!(
            request("you@example.com", "secret1", "ab").validate(),
            Err(ValidationError::Username(_))
        ));
    }
}
