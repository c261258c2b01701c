//! Environment assembly for the collector container
//!
//! Builds the fixed, ordered list of environment variables injected into
//! the binlog collector. Secret material is only referenced by
//! (secret, key) name; nothing is read or resolved here. The kubelet
//! resolves the references at pod start.

use serde::{Deserialize, Serialize};

use crate::collector::CollectorInput;
use crate::k8s::EnvVar;

/// Database account the collector connects as
pub(crate) const PXC_USER: &str = "operator";

/// Value of a single collector environment variable
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EnvValue {
    /// Literal string injected as-is
    Literal(String),
    /// Reference to a key within a named secret, resolved at pod start
    SecretRef {
        /// Name of the Kubernetes secret
        secret: String,
        /// Key within the secret
        key: String,
    },
}

/// A named environment variable for the collector container
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvEntry {
    /// Variable name
    pub name: String,
    /// Literal value or secret reference
    pub value: EnvValue,
}

impl EnvEntry {
    fn literal(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: EnvValue::Literal(value.into()),
        }
    }

    fn secret_ref(name: &str, secret: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: EnvValue::SecretRef {
                secret: secret.into(),
                key: key.into(),
            },
        }
    }
}

impl From<EnvEntry> for EnvVar {
    fn from(entry: EnvEntry) -> Self {
        match entry.value {
            EnvValue::Literal(value) => EnvVar::literal(entry.name, value),
            EnvValue::SecretRef { secret, key } => EnvVar::from_secret(entry.name, secret, key),
        }
    }
}

/// Build the ordered environment for the collector container.
///
/// Exactly nine variables, fixed names, stable order across calls with
/// identical input.
pub fn collector_env(input: &CollectorInput<'_>) -> Vec<EnvEntry> {
    let s3 = &input.storage.s3;

    vec![
        EnvEntry::literal("ENDPOINT", strip_https_scheme(&s3.endpoint_url)),
        EnvEntry::secret_ref(
            "SECRET_ACCESS_KEY",
            &s3.credentials_secret,
            "AWS_SECRET_ACCESS_KEY",
        ),
        EnvEntry::secret_ref(
            "ACCESS_KEY_ID",
            &s3.credentials_secret,
            "AWS_ACCESS_KEY_ID",
        ),
        EnvEntry::literal("S3_BUCKET", &s3.bucket),
        EnvEntry::literal("PXC_SERVICE", format!("{}-pxc", input.cluster)),
        EnvEntry::literal("PXC_USER", PXC_USER),
        EnvEntry::secret_ref("MYSQL_ROOT_PASSWORD", input.secrets_name, "root"),
        EnvEntry::secret_ref("PXC_PASS", input.secrets_name, PXC_USER),
        EnvEntry::literal("SLEEP_SECONDS", &input.sleep_seconds),
    ]
}

/// Strip a leading `https://` scheme from an endpoint URL.
///
/// Only the exact `https://` prefix is removed; `http://` and any other
/// scheme pass through unchanged.
fn strip_https_scheme(endpoint: &str) -> &str {
    endpoint.strip_prefix("https://").unwrap_or(endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_https_scheme() {
        assert_eq!(strip_https_scheme("https://s3.example.com"), "s3.example.com");
        assert_eq!(strip_https_scheme("s3.example.com"), "s3.example.com");
        assert_eq!(
            strip_https_scheme("http://s3.example.com"),
            "http://s3.example.com"
        );
        assert_eq!(strip_https_scheme(""), "");
    }

    #[test]
    fn test_env_value_is_tagged() {
        let literal = serde_json::to_value(EnvValue::Literal("60".to_string())).unwrap();
        assert_eq!(literal["literal"], "60");

        let secret = serde_json::to_value(EnvValue::SecretRef {
            secret: "cluster-secrets".to_string(),
            key: "root".to_string(),
        })
        .unwrap();
        assert_eq!(secret["secretRef"]["secret"], "cluster-secrets");
        assert_eq!(secret["secretRef"]["key"], "root");
    }

    #[test]
    fn test_entry_converts_to_env_var() {
        let var = EnvVar::from(EnvEntry::literal("S3_BUCKET", "binlogs"));
        assert_eq!(var.value.as_deref(), Some("binlogs"));
        assert!(var.value_from.is_none());

        let var = EnvVar::from(EnvEntry::secret_ref("PXC_PASS", "secrets", PXC_USER));
        assert!(var.value.is_none());
        let selector = var.value_from.unwrap().secret_key_ref.unwrap();
        assert_eq!(selector.name, "secrets");
        assert_eq!(selector.key, "operator");
    }
}
