use std::fmt;

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use uuid::Uuid;

use cinelog_core::users::Claims;

/// Access token lifetime in seconds (15 minutes).
pub const ACCESS_TOKEN_TTL_SECS: i64 = 900;
/// Refresh token lifetime in days.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 30;

/// HS256 key pair derived from the configured secret.
///
/// Lives in `AppState` and is passed to whoever needs it; there is no
/// process-global key registry.
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtKeys").finish_non_exhaustive()
    }
}

impl JwtKeys {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    pub fn generate_access_token(
        &self,
        user_id: Uuid,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let exp = now + Duration::seconds(ACCESS_TOKEN_TTL_SECS);

        let claims = Claims {
            sub: user_id,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    pub fn validate_token(
        &self,
        token: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
    }
}

/// Refresh tokens are opaque; a v4 uuid carries enough entropy.
pub fn generate_refresh_token() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> JwtKeys {
        JwtKeys::new(b"test-secret-test-secret-test-secret!")
    }

    #[test]
    fn generate_and_validate_token() {
        let user_id = Uuid::new_v4();
        let token = keys()
            .generate_access_token(user_id)
            .expect("Failed to generate token");

        let claims = keys().validate_token(&token).expect("Failed to validate token");
        assert_eq!(claims.sub, user_id);
    }

    #[test]
    fn expired_token_is_rejected() {
        let user_id = Uuid::new_v4();
        let now = Utc::now();

        let claims = Claims {
            sub: user_id,
            exp: (now - Duration::seconds(100)).timestamp(),
            iat: (now - Duration::seconds(1000)).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let keys = keys();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret-test-secret-test-secret!"),
        )
        .unwrap();

        assert!(keys.validate_token(&token).is_err());
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let token = JwtKeys::new(b"a completely different signing key!!")
            .generate_access_token(Uuid::new_v4())
            .unwrap();

        assert!(keys().validate_token(&token).is_err());
    }

    #[test]
    fn refresh_tokens_are_unique() {
        assert_ne!(generate_refresh_token(), generate_refresh_token());
    }
}
