//! Custom Resource Definitions for the PXC operator
//!
//! This module contains the cluster CRD and the Kubernetes primitive types
//! embedded in it.

mod backup;
mod cluster;
mod types;

pub use backup::{BackupSpec, BackupStorageSpec, PitrSpec, S3StorageConfig};
pub use cluster::{PerconaXtraDBCluster, PerconaXtraDBClusterSpec, PxcSpec};
pub use types::{
    Affinity, Capabilities, LocalObjectReference, PodSecurityContext, ResourceQuantity,
    ResourceRequirements, SecurityContext, Toleration,
};

// =============================================================================

/// Validate a DNS-style identifier (lowercase alphanumeric with hyphens).
///
/// Rules:
/// - Must not be empty
/// - Must start with a lowercase letter
/// - May contain lowercase letters, digits, and hyphens
/// - Must not end with a hyphen
///
/// Used for storage backend names and other user-supplied identifiers that
/// end up in resource names.
pub(crate) fn validate_dns_identifier(s: &str) -> Result<(), String> {
    if s.is_empty() {
        return Err("identifier cannot be empty".to_string());
    }

    let mut chars = s.chars();

    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => {
            return Err(format!(
                "identifier must start with lowercase letter: {}",
                s
            ))
        }
    }

    for c in chars {
        if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' {
            return Err(format!(
                "identifier must be lowercase alphanumeric with hyphens: {}",
                s
            ));
        }
    }

    if s.ends_with('-') {
        return Err(format!("identifier cannot end with hyphen: {}", s));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_dns_identifier;

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_dns_identifier("s3-us-west").is_ok());
        assert!(validate_dns_identifier("minio").is_ok());
        assert!(validate_dns_identifier("backup2").is_ok());
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(validate_dns_identifier("").is_err());
        assert!(validate_dns_identifier("S3").is_err());
        assert!(validate_dns_identifier("2fast").is_err());
        assert!(validate_dns_identifier("trailing-").is_err());
        assert!(validate_dns_identifier("under_score").is_err());
    }
}
