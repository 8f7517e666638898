//! Time-based one-time passwords (RFC 6238).
//!
//! Entries store their TOTP seed as base32 text in the
//! [`TOTP_SECRET_FIELD`] field. Codes use HMAC-SHA1, a 30 second step and six
//! digits, the parameters authenticator apps assume by default.

use std::time::{SystemTime, UNIX_EPOCH};

use data_encoding::BASE32_NOPAD;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use thiserror::Error;

/// Field holding the base32 TOTP seed.
pub const TOTP_SECRET_FIELD: &str = "TimeOtp-Secret-Base32";

const PERIOD: u64 = 30;
const DIGITS: u32 = 6;

type HmacSha1 = Hmac<Sha1>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TotpError {
    #[error("invalid base32 secret: {0}")]
    InvalidSecret(String),
    #[error("system clock is before the unix epoch")]
    Clock,
}

/// Decodes a base32 seed. Whitespace and `=` padding are ignored, as is case.
pub fn decode_secret(secret: &str) -> Result<Vec<u8>, TotpError> {
    let normalized: String = secret
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '=')
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if normalized.is_empty() {
        return Err(TotpError::InvalidSecret("secret is empty".to_string()));
    }
    BASE32_NOPAD
        .decode(normalized.as_bytes())
        .map_err(|e| TotpError::InvalidSecret(e.to_string()))
}

/// Generates the code valid at `unix_time` (seconds since the epoch).
///
/// # Example
///
/// ```
/// use kpfind::totp::generate;
///
/// // RFC 6238 test seed "12345678901234567890"
/// let code = generate("GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ", 59).unwrap();
/// assert_eq!(code, "287082");
/// ```
pub fn generate(secret: &str, unix_time: u64) -> Result<String, TotpError> {
    let key = decode_secret(secret)?;
    let counter = unix_time / PERIOD;

    let mut mac = HmacSha1::new_from_slice(&key)
        .map_err(|e| TotpError::InvalidSecret(e.to_string()))?;
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    // dynamic truncation, RFC 4226 section 5.3
    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let binary = u32::from_be_bytes([
        digest[offset] & 0x7f,
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ]);
    let code = binary % 10u32.pow(DIGITS);
    Ok(format!("{:0width$}", code, width = DIGITS as usize))
}

/// Generates the code for the current system time.
pub fn generate_now(secret: &str) -> Result<String, TotpError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| TotpError::Clock)?;
    generate(secret, now.as_secs())
}
