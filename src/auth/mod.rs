pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password_blocking, verify_password_blocking};
pub use token::{Claims, JwtKeys};

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Must be at least 3 characters long.
    #[validate(length(min = 3))]
    pub username: String,
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
    pub firstname: String,
    pub lastname: String,
}

/// Represents the payload for a user login request.
///
/// Only presence of both fields is checked; wrong values fall through to the
/// credential check so every failure looks the same.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response structure after successful signup or login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    /// The JWT for session authentication.
    pub token: String,
}
