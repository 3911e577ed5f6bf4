use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use super::AuthError;

/// Hash a password for storage and comparison.
///
/// Unsalted, fixed-function hex digest. Stored user records already hold
/// hashes in this form, so the function cannot change without invalidating
/// every credential in the user directory.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generate an unguessable session token.
///
/// 256 bits of OS randomness as url-safe base64.
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode a Basic authorization header into `(email, password)`.
///
/// Rejects missing scheme, undecodable payloads, and empty fields.
pub fn decode_basic_credentials(header: &str) -> Result<(String, String), AuthError> {
    let encoded = header
        .strip_prefix("Basic ")
        .ok_or(AuthError::MissingCredentials)?;

    let decoded = STANDARD
        .decode(encoded)
        .map_err(|_| AuthError::MalformedCredentials)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthError::MalformedCredentials)?;

    let (email, password) = decoded
        .split_once(':')
        .ok_or(AuthError::MalformedCredentials)?;
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::MalformedCredentials);
    }

    Ok((email.to_string(), password.to_string()))
}
