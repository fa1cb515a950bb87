use serde::{Deserialize, Serialize};
use std::fmt;

/// Username value object with validation
///
/// Represents a validated username that follows the business rules:
/// - 3-30 characters in length
/// - Alphanumeric characters and underscores only
/// - Normalized to lowercase for consistency
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Create a new username with validation
    pub fn new(username: impl AsRef<str>) -> Result<Self, UsernameError> {
        let username = username.as_ref().trim().to_lowercase();

        if username.chars().count() < 3 {
            return Err(UsernameError::TooShort);
        }

        if username.chars().count() > 30 {
            return Err(UsernameError::TooLong);
        }

        if !username.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(UsernameError::InvalidCharacters);
        }

        Ok(Self(username))
    }

    /// Get the username as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the username as a String
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors that can occur when creating a username
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsernameError {
    #[error("Username must be at least 3 characters")]
    TooShort,

    #[error("Username must be less than 30 characters")]
    TooLong,

    #[error("Username may only contain letters, numbers, and underscores")]
    InvalidCharacters,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_usernames() {
        assert!(Username::new("moviefan123").is_ok());
        assert!(Username::new("abc").is_ok());
        assert!(Username::new("user_name").is_ok());
        assert!(Username::new("a".repeat(30)).is_ok());
    }

    #[test]
    fn invalid_usernames() {
        assert_eq!(Username::new("ab"), Err(UsernameError::TooShort));
        assert_eq!(
            Username::new("a".repeat(31)),
            Err(UsernameError::TooLong)
        );
        assert_eq!(
            Username::new("alice@bob"),
            Err(UsernameError::InvalidCharacters)
        );
        assert_eq!(
            Username::new("has space"),
            Err(UsernameError::InvalidCharacters)
        );
    }

    #[test]
    fn normalization() {
        let username = Username::new("  MovieFan  ").unwrap();
        assert_eq!(username.as_str(), "moviefan");
    }
}
