use serde::{Deserialize, Serialize};
use std::fmt;

/// Email address value object with validation
///
/// Deliberately light-weight: one `@`, a non-empty local part, and a
/// dotted domain. Deliverability is the mail system's problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create a new email address with validation
    pub fn new(email: impl AsRef<str>) -> Result<Self, EmailError> {
        let email = email.as_ref().trim().to_lowercase();

        if email.is_empty() {
            return Err(EmailError::Empty);
        }

        if email.chars().count() > 254 {
            return Err(EmailError::TooLong);
        }

        if email.chars().any(char::is_whitespace) {
            return Err(EmailError::InvalidFormat);
        }

        let Some((local, domain)) = email.split_once('@') else {
            return Err(EmailError::InvalidFormat);
        };

        if local.is_empty()
            || domain.is_empty()
            || domain.contains('@')
            || !domain.contains('.')
            || domain.starts_with('.')
            || domain.ends_with('.')
        {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(email))
    }

    /// Get the address as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the address as a String
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors that can occur when creating an email address
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailError {
    #[error("Email is required")]
    Empty,

    #[error("Email is too long")]
    TooLong,

    #[error("Please enter a valid email")]
    InvalidFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_emails() {
        assert!(Email::new("you@example.com").is_ok());
        assert!(Email::new("a.b+c@mail.example.org").is_ok());
    }

    #[test]
    fn invalid_emails() {
        assert_eq!(Email::new("   "), Err(EmailError::Empty));
        assert_eq!(Email::new("no-at-sign"), Err(EmailError::InvalidFormat));
        assert_eq!(Email::new("@example.com"), Err(EmailError::InvalidFormat));
        assert_eq!(Email::new("you@"), Err(EmailError::InvalidFormat));
        assert_eq!(Email::new("you@example"), Err(EmailError::InvalidFormat));
        assert_eq!(Email::new("you@.com"), Err(EmailError::InvalidFormat));
        assert_eq!(Email::new("a b@example.com"), Err(EmailError::InvalidFormat));
    }

    #[test]
    fn normalization() {
        let email = Email::new("  You@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "you@example.com");
    }
}
