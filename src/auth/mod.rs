pub mod extractors;
pub mod middleware;
mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::User;

// Re-export necessary items
pub use middleware::AuthMiddleware;
pub use token::CredentialStore;

/// Represents the payload for a sign-in request.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SignInRequest {
    /// Registered email address.
    #[validate(length(min = 1))]
    pub email: String,
    /// Plaintext password, checked against the stored credential.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SignUpRequest {
    /// Display name, between 1 and 100 characters.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Email address for the new account. Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// Password for the new account. Must not be empty.
    #[validate(length(min = 1))]
    pub password: String,
    /// Optional avatar reference (usually a URL).
    #[validate(length(max = 2048))]
    pub avatar: Option<String>,
}

/// Response after successful sign-up or sign-in: the user and a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    /// Signed session token to present on later requests.
    pub token: String,
}
