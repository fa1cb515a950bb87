use std::fmt;

/// Plain-text password value object, validated but never logged.
///
/// Exists only between request deserialization and hashing; the Debug
/// impl redacts the contents and no serialization is derived.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Create a new password with validation
    pub fn new(password: impl Into<String>) -> Result<Self, PasswordError> {
        let password = password.into();

        if password.chars().count() < 6 {
            return Err(PasswordError::TooShort);
        }

        if password.chars().count() > 128 {
            return Err(PasswordError::TooLong);
        }

        Ok(Self(password))
    }

    /// Get the password as a string slice for hashing
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Errors that can occur when creating a password
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordError {
    #[error("Password must be at least 6 characters")]
    TooShort,

    #[error("Password must be less than 128 characters")]
    TooLong,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_boundaries() {
        assert_eq!(Password::new("12345"), Err(PasswordError::TooShort));
        assert!(Password::new("123456").is_ok());
        assert!(Password::new("x".repeat(128)).is_ok());
        assert_eq!(
            Password::new("x".repeat(129)),
            Err(PasswordError::TooLong)
        );
    }

    #[test]
    fn debug_redacts_contents() {
        let password = Password::new("hunter2hunter2").unwrap();
        assert_eq!(format!("{password:?}"), "Password(<redacted>)");
    }
}
