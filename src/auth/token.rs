use crate::error::AppError;
use crate::models::User;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// The user's unique identifier.
    pub id: Uuid,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// The process-wide signing secret, built once from configuration.
///
/// Signing and verification both go through this value, so there is exactly one
/// secret in play. Tokens are HS256 and live for `ttl_secs` seconds.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Issues a token embedding the user's id and profile fields.
    ///
    /// # Returns
    /// The encoded JWT, or `AppError::InternalServerError` if the expiry overflows
    /// or encoding fails.
    pub fn generate_token(&self, user: &User) -> Result<String, AppError> {
        let now = chrono::Utc::now();
        let expiration = chrono::Duration::try_seconds(self.ttl_secs)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AppError::InternalServerError("Token expiry overflow".into()))?;

        let claims = Claims {
            id: user.id,
            username: user.username.clone(),
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies signature and expiry and returns the decoded claims.
    ///
    /// Every failure is `AppError::Forbidden("Token verification failed!")`.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewUser;

    fn test_user() -> User {
        User::new(NewUser {
            username: "tokenuser".to_string(),
            password_hash: "unused".to_string(),
            firstname: "Token".to_string(),
            lastname: "User".to_string(),
        })
    }

    fn assert_forbidden(result: Result<Claims, AppError>) {
        match result {
            Err(AppError::Forbidden(msg)) => assert_eq!(msg, "Token verification failed!"),
            Ok(_) => panic!("Token should have been rejected"),
            Err(e) => panic!("Unexpected error type: {:?}", e),
        }
    }

    #[test]
    fn test_token_generation_and_verification() {
        let keys = JwtKeys::new("test_secret_for_gen_verify", 3600);
        let user = test_user();

        let token = keys.generate_token(&user).unwrap();
        let claims = keys.verify_token(&token).unwrap();

        assert_eq!(claims.id, user.id);
        assert_eq!(claims.username, "tokenuser");
        assert_eq!(claims.firstname, "Token");
        assert_eq!(claims.lastname, "User");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_token_expiration() {
        let keys = JwtKeys::new("test_secret_for_expiration", 3600);
        let user = test_user();

        let issued = chrono::Utc::now()
            .checked_sub_signed(chrono::Duration::hours(3))
            .expect("valid timestamp");
        let expired = Claims {
            id: user.id,
            username: user.username.clone(),
            firstname: user.firstname.clone(),
            lastname: user.lastname.clone(),
            iat: issued.timestamp() as usize,
            exp: (issued + chrono::Duration::hours(1)).timestamp() as usize,
        };
        let expired_token = encode(
            &Header::default(),
            &expired,
            &EncodingKey::from_secret("test_secret_for_expiration".as_bytes()),
        )
        .unwrap();

        assert_forbidden(keys.verify_token(&expired_token));
    }

    #[test]
    fn test_invalid_token_signature() {
        let issuer = JwtKeys::new("the_signing_secret", 3600);
        let verifier = JwtKeys::new("a_completely_different_secret", 3600);

        let token = issuer.generate_token(&test_user()).unwrap();
        assert_forbidden(verifier.verify_token(&token));
    }

    #[test]
    fn test_overflowing_ttl_is_an_error() {
        let keys = JwtKeys::new("secret", i64::MAX);

        match keys.generate_token(&test_user()) {
            Err(AppError::InternalServerError(msg)) => assert!(msg.contains("overflow")),
            other => panic!("Expected an internal error, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_token() {
        let keys = JwtKeys::new("secret", 3600);
        assert_forbidden(keys.verify_token("garbage"));
        assert_forbidden(keys.verify_token(""));
    }
}
