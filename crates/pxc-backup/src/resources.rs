//! Resource requirements translation
//!
//! Converts the quantity strings of a PITR resource specification into the
//! concrete requirements object attached to the collector container. Every
//! supplied quantity is validated; one malformed value aborts the whole
//! synthesis.

use pxc_common::crd;
use thiserror::Error;

use crate::k8s::ResourceRequirements;

/// A resource quantity string that does not parse
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{field}.{resource}: invalid quantity '{quantity}' (expected e.g., {expected})")]
pub struct QuantityParseError {
    /// Which block the quantity came from ("requests" or "limits")
    pub field: &'static str,
    /// Which resource the quantity sizes ("cpu" or "memory")
    pub resource: &'static str,
    /// The rejected value
    pub quantity: String,
    /// Example of an accepted form
    pub expected: &'static str,
}

/// Translate an abstract requests/limits spec into container requirements.
///
/// Absent blocks and absent quantities stay absent; a fully empty spec
/// produces the empty requirements object.
pub fn create_resources(
    spec: &crd::ResourceRequirements,
) -> Result<ResourceRequirements, QuantityParseError> {
    validate_block("requests", spec.requests.as_ref())?;
    validate_block("limits", spec.limits.as_ref())?;
    Ok(ResourceRequirements::from(spec))
}

fn validate_block(
    field: &'static str,
    quantities: Option<&crd::ResourceQuantity>,
) -> Result<(), QuantityParseError> {
    let Some(quantities) = quantities else {
        return Ok(());
    };

    if let Some(cpu) = &quantities.cpu {
        if !is_valid_cpu_quantity(cpu) {
            return Err(QuantityParseError {
                field,
                resource: "cpu",
                quantity: cpu.clone(),
                expected: "'100m', '1', '0.5'",
            });
        }
    }

    if let Some(memory) = &quantities.memory {
        if !is_valid_memory_quantity(memory) {
            return Err(QuantityParseError {
                field,
                resource: "memory",
                quantity: memory.clone(),
                expected: "'128Mi', '1Gi'",
            });
        }
    }

    Ok(())
}

/// CPU quantities are millicores ("100m") or a decimal core count ("1", "0.5").
fn is_valid_cpu_quantity(qty: &str) -> bool {
    match qty.strip_suffix('m') {
        Some(millis) => millis.parse::<u64>().is_ok(),
        None => qty.parse::<f64>().is_ok(),
    }
}

/// Binary (Ki..Ei) and decimal (k..E) suffixes accepted for memory quantities
const MEMORY_SUFFIXES: &[&str] = &[
    "Ki", "Mi", "Gi", "Ti", "Pi", "Ei", "k", "M", "G", "T", "P", "E",
];

/// Memory quantities are a number with a known suffix, or bare bytes.
fn is_valid_memory_quantity(qty: &str) -> bool {
    match MEMORY_SUFFIXES.iter().find(|s| qty.ends_with(*s)) {
        Some(suffix) => {
            let prefix = &qty[..qty.len() - suffix.len()];
            prefix.parse::<u64>().is_ok() || prefix.parse::<f64>().is_ok()
        }
        None => qty.parse::<u64>().is_ok(),
    }
}
