//! Configuration digest: RFC 8785 JSON canonicalization followed by
//! SHA-256, mirroring this lineage's transaction-ref pattern. Used for
//! the Structured Report's `configuration_digest` field (spec §6).

use crate::config::Config;
use sha2::{Digest, Sha256};

pub fn compute_digest(config: &Config) -> String {
    let value = serde_json::to_value(config).expect("Config always serializes");
    let canonical = serde_jcs::to_string(&value).expect("canonicalization of a plain value cannot fail");
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_stable_across_field_reordering_in_source() {
        let a = compute_digest(&Config::default());
        let mut cfg = Config::default();
        cfg.mode.enabled = true; // no-op write, same logical value
        let b = compute_digest(&cfg);
        assert_eq!(a, b);
    }

    #[test]
    fn digest_changes_when_policy_changes() {
        let a = compute_digest(&Config::default());
        let mut cfg = Config::default();
        cfg.mode.strict_mode = true;
        let b = compute_digest(&cfg);
        assert_ne!(a, b);
    }

    #[test]
    fn digest_is_hex_sha256_length() {
        let digest = compute_digest(&Config::default());
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
