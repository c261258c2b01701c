//! Error types for manifest synthesis

use thiserror::Error;

use crate::resources::QuantityParseError;

/// Errors raised while synthesizing a collector deployment.
///
/// Storage lookup, label merging, and environment assembly are total
/// functions over the cluster spec; the only failure path is translating
/// the PITR resource-quantity specification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SynthesisError {
    /// The PITR resource specification holds a malformed quantity
    #[error("create resources: {source}")]
    Resources {
        /// The underlying quantity parse failure
        #[from]
        source: QuantityParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resources_error_carries_context() {
        let err = SynthesisError::from(QuantityParseError {
            field: "requests",
            resource: "cpu",
            quantity: "not-a-cpu".to_string(),
            expected: "'100m', '1', '0.5'",
        });

        let message = err.to_string();
        assert!(message.starts_with("create resources: "));
        assert!(message.contains("requests.cpu"));
        assert!(message.contains("not-a-cpu"));
    }
}
