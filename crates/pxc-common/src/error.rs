//! Error types for the PXC operator
//!
//! Errors are structured with fields to aid debugging in production.
//! Each variant carries contextual information like the cluster name and
//! the offending field path.

use thiserror::Error;

/// Default context value when no specific context is available
pub const UNKNOWN_CONTEXT: &str = "unknown";

/// Main error type for PXC operator operations
#[derive(Debug, Error)]
pub enum Error {
    /// Validation error for CRD specs
    #[error("validation error for {cluster}: {message}")]
    Validation {
        /// Name of the cluster with invalid configuration
        cluster: String,
        /// Description of what's invalid
        message: String,
        /// The invalid field path (e.g., "spec.backup.pitr.storageName")
        field: Option<String>,
    },
}

impl Error {
    /// Create a validation error with the given message
    ///
    /// For simple validation errors without cluster context.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            cluster: UNKNOWN_CONTEXT.to_string(),
            message: msg.into(),
            field: None,
        }
    }

    /// Create a validation error with cluster context
    pub fn validation_for(cluster: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Validation {
            cluster: cluster.into(),
            message: msg.into(),
            field: None,
        }
    }

    /// Create a validation error with cluster context and field path
    pub fn validation_for_field(
        cluster: impl Into<String>,
        field: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self::Validation {
            cluster: cluster.into(),
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Get the cluster name if this error is associated with a specific cluster
    pub fn cluster(&self) -> Option<&str> {
        match self {
            Error::Validation { cluster, .. } => Some(cluster),
        }
    }

    /// Get the offending field path if one was recorded
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::Validation { field, .. } => field.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Story: spec validation catches misconfigurations before synthesis
    ///
    /// When a user creates a cluster with an invalid backup configuration,
    /// the validation layer reports it with a clear message instead of
    /// letting the synthesis silently produce a broken collector.
    #[test]
    fn story_validation_prevents_broken_collector() {
        let err = Error::validation("pitr storage 'missing' is not defined");
        assert!(err.to_string().contains("validation error"));
        assert!(err.to_string().contains("not defined"));

        match Error::validation("any message") {
            Error::Validation { message, .. } => assert_eq!(message, "any message"),
        }
    }

    /// Story: structured errors include cluster context for debugging
    #[test]
    fn story_errors_carry_cluster_context() {
        let err = Error::validation_for("prod-cluster", "secretsName cannot be empty");
        assert!(err.to_string().contains("prod-cluster"));
        assert_eq!(err.cluster(), Some("prod-cluster"));
        assert_eq!(err.field(), None);

        let err = Error::validation_for_field(
            "test-cluster",
            "spec.backup.pitr.storageName",
            "storage not defined",
        );
        assert_eq!(err.field(), Some("spec.backup.pitr.storageName"));
        assert_eq!(err.cluster(), Some("test-cluster"));
    }

    /// Story: error constructors accept both String and &str
    #[test]
    fn story_error_construction_ergonomics() {
        let dynamic_msg = format!("storage {} not found", "s3-us-west");
        let err = Error::validation(dynamic_msg);
        assert!(err.to_string().contains("s3-us-west"));

        let err = Error::validation("static message");
        assert!(err.to_string().contains("static message"));
    }

    #[test]
    fn test_unknown_context_default() {
        let err = Error::validation("test");
        assert_eq!(err.cluster(), Some(UNKNOWN_CONTEXT));
    }
}
