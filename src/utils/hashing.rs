//! Stable fingerprints for secrets

use sha2::{Digest, Sha256};

const FINGERPRINT_LEN: usize = 12;

/// Short SHA-256 fingerprint of an API key, safe to log.
///
/// Lets operators correlate which key a process booted with without the key
/// itself ever reaching the logs.
pub fn key_fingerprint(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)[..FINGERPRINT_LEN].to_string()
}
