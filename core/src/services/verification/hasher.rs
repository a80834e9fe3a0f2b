//! Keyed hashing of verification codes.
//!
//! Codes are stored as HMAC-SHA256 over `binding_key ":" code`, base64
//! encoded. The binding key scopes a code to its target (e.g. the new
//! email address in an email change), so a code issued for one address can
//! never be replayed against another. The HMAC secret is process-wide
//! configuration injected at construction; rotating it invalidates every
//! outstanding code, which is the documented operational consequence.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Hashes verification codes with a server-held secret
#[derive(Clone)]
pub struct CodeHasher {
    secret: Vec<u8>,
}

impl CodeHasher {
    /// Creates a hasher from the server-side secret
    ///
    /// Validating that the secret is present (and non-empty) is the
    /// responsibility of configuration loading at startup.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Computes the keyed hash of a code bound to `binding_key`
    ///
    /// The binding key is lowercased so that email-cased submissions hash
    /// identically.
    pub fn hash(&self, binding_key: &str, code: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC accepts keys of any length");
        mac.update(binding_key.to_lowercase().as_bytes());
        mac.update(b":");
        mac.update(code.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }

    /// Checks a submitted code against a stored hash in constant time
    ///
    /// The comparison runs over the encoded hash bytes, never the raw
    /// code, so timing reveals nothing about where the digits differ.
    pub fn verify(&self, binding_key: &str, code: &str, stored_hash: &str) -> bool {
        let computed = self.hash(binding_key, code);
        constant_time_eq(computed.as_bytes(), stored_hash.as_bytes())
    }
}

impl std::fmt::Debug for CodeHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the secret through Debug output
        f.debug_struct("CodeHasher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-hmac-secret-at-least-32-bytes";

    #[test]
    fn test_hash_is_deterministic() {
        let hasher = CodeHasher::new(SECRET);
        let a = hasher.hash("user@example.com", "123456");
        let b = hasher.hash("user@example.com", "123456");
        assert_eq!(a, b);
    }

    #[test]
    fn test_hash_binds_the_key() {
        let hasher = CodeHasher::new(SECRET);
        let a = hasher.hash("a@example.com", "123456");
        let b = hasher.hash("b@example.com", "123456");
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_is_case_insensitive_over_binding_key() {
        let hasher = CodeHasher::new(SECRET);
        let lower = hasher.hash("user@example.com", "123456");
        let upper = hasher.hash("User@Example.COM", "123456");
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_changing_secret_invalidates_codes() {
        let hasher = CodeHasher::new(SECRET);
        let stored = hasher.hash("user@example.com", "123456");

        let rotated = CodeHasher::new(b"another-secret-of-sufficient-len".to_vec());
        assert!(!rotated.verify("user@example.com", "123456", &stored));
        assert!(hasher.verify("user@example.com", "123456", &stored));
    }

    #[test]
    fn test_verify_rejects_wrong_code() {
        let hasher = CodeHasher::new(SECRET);
        let stored = hasher.hash("user@example.com", "123456");
        assert!(!hasher.verify("user@example.com", "123457", &stored));
    }

    #[test]
    fn test_debug_hides_secret() {
        let hasher = CodeHasher::new(SECRET);
        let rendered = format!("{:?}", hasher);
        assert!(!rendered.contains("test-hmac-secret"));
    }
}
