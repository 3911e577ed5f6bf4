mod crypto;
mod session;

pub use crypto::{decode_basic_credentials, generate_token, hash_password};
pub use session::SessionStore;

use thiserror::Error;

/// Credential and token failures. All of these surface to the API as 401.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing credentials")]
    MissingCredentials,
    #[error("Malformed credentials")]
    MalformedCredentials,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Invalid or expired token")]
    InvalidToken,
}
