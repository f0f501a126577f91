//! Secret masking for logs and CLI output

use crate::utils::hashing::key_fingerprint;

const MASK: &str = "****";
const MIN_PARTIAL_LEN: usize = 8;

/// Mask a secret, keeping two characters on each side when it is long enough
/// for that to reveal little.
///
/// Secrets of eight characters or fewer are replaced entirely.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= MIN_PARTIAL_LEN {
        return MASK.to_string();
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{head}{MASK}{tail}")
}

/// Masked form plus fingerprint, e.g. `ab****yz (sha256:0123456789ab)`.
pub fn describe_secret(secret: &str) -> String {
    format!("{} (sha256:{})", mask_secret(secret), key_fingerprint(secret))
}
