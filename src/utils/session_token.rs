//! Opaque bearer tokens for signed-in sessions.
//!
//! Tokens are random bytes encoded as URL-safe base64. Only their HMAC-SHA256
//! digest, keyed by the server signing secret, is ever stored.

use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Number of random bytes in a session token.
const TOKEN_BYTES: usize = 32;

/// Generates a new random session token.
///
/// # Errors
///
/// Returns an error if the operating system RNG is unavailable.
pub fn generate_token() -> Result<String, getrandom::Error> {
    let mut buffer = [0u8; TOKEN_BYTES];
    getrandom::fill(&mut buffer)?;
    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Computes the stored digest of `token`.
///
/// Returns a 64-character lowercase hex-encoded MAC.
pub fn hash_token(secret: &str, token: &str) -> String {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
