//! One-Way Hashing Utility
//!
//! Deterministic SHA-256 digests for anonymizing identifiers before they
//! enter the shared ledger. Pure functions, no side effects.
//!
//! The ledger never stores raw device, account or pattern data - only
//! these digests. Digests are not reversible to the original values.

use sha2::{Digest, Sha256};

/// Compute the hex digest of an arbitrary string.
///
/// Same input always produces the same 64-char lowercase hex output.
pub fn digest(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compute the hex digest of a composite value.
///
/// The value is serialized canonically first (serde_json orders object keys,
/// so two structurally-equal composites hash identically).
pub fn digest_canonical(value: &serde_json::Value) -> String {
    digest(&value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_digest_is_deterministic() {
        let a = digest("session-123");
        let b = digest("session-123");
        assert_eq!(a, b);

        // SHA256 hex = 64 characters
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_digest_differs_per_input() {
        assert_ne!(digest("user-1"), digest("user-2"));
    }

    #[test]
    fn test_canonical_digest_ignores_key_insertion_order() {
        let a = json!({ "amount": 500.0, "type": "wire" });
        let b = json!({ "type": "wire", "amount": 500.0 });
        assert_eq!(digest_canonical(&a), digest_canonical(&b));
    }
}
