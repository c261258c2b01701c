//! PerconaXtraDBCluster Custom Resource Definition
//!
//! The PerconaXtraDBCluster CRD is the desired state of one database
//! cluster: the main PXC workload, its secrets bundle, and the backup/PITR
//! configuration. Controllers read it; synthesis code derives workload
//! descriptors from it without mutating it.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::backup::BackupSpec;
use super::types::SecurityContext;

/// Specification for a PerconaXtraDBCluster
#[derive(CustomResource, Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[kube(
    group = "pxc.percona.com",
    version = "v1",
    kind = "PerconaXtraDBCluster",
    plural = "perconaxtradbclusters",
    shortname = "pxc",
    namespaced,
    printcolumn = r#"{"name":"PITR","type":"boolean","jsonPath":".spec.backup.pitr.enabled"}"#,
    printcolumn = r#"{"name":"Age","type":"date","jsonPath":".metadata.creationTimestamp"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct PerconaXtraDBClusterSpec {
    /// Name of the secrets bundle holding system user passwords (root, operator, ...)
    #[serde(default)]
    pub secrets_name: String,

    /// Main database workload settings shared with derived sidecars
    #[serde(default)]
    pub pxc: PxcSpec,

    /// Backup and point-in-time-recovery configuration
    #[serde(default)]
    pub backup: BackupSpec,
}

impl PerconaXtraDBClusterSpec {
    /// Validate the cluster specification
    pub fn validate(&self, cluster: &str) -> crate::Result<()> {
        if self.secrets_name.is_empty() {
            return Err(crate::Error::validation_for_field(
                cluster,
                "spec.secretsName",
                "secretsName cannot be empty",
            ));
        }

        self.backup.validate(cluster)
    }
}

/// Main PXC workload settings that derived workloads inherit
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PxcSpec {
    /// Image pull policy applied to containers derived from this workload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<String>,

    /// Container-level security context shared with derived sidecars
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_security_context: Option<SecurityContext>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml::parse_yaml;

    fn parse_spec(yaml: &str) -> PerconaXtraDBClusterSpec {
        let value = parse_yaml(yaml).expect("parse yaml");
        serde_json::from_value(value).expect("parse spec")
    }

    #[test]
    fn test_cluster_spec_roundtrip() {
        let spec = parse_spec(
            r#"
secretsName: my-cluster-secrets
pxc:
  imagePullPolicy: Always
  containerSecurityContext:
    runAsNonRoot: true
backup:
  image: percona/pxc-backup:8.0
"#,
        );

        assert_eq!(spec.secrets_name, "my-cluster-secrets");
        assert_eq!(spec.pxc.image_pull_policy.as_deref(), Some("Always"));
        assert_eq!(
            spec.pxc
                .container_security_context
                .as_ref()
                .and_then(|c| c.run_as_non_root),
            Some(true)
        );
        assert_eq!(spec.backup.image, "percona/pxc-backup:8.0");
    }

    #[test]
    fn test_validate_requires_secrets_name() {
        let spec = parse_spec("backup:\n  image: backup:latest");
        let err = spec.validate("my-cluster").unwrap_err();
        assert_eq!(err.field(), Some("spec.secretsName"));
        assert_eq!(err.cluster(), Some("my-cluster"));
    }

    #[test]
    fn test_validate_delegates_to_backup() {
        let spec = parse_spec(
            r#"
secretsName: secrets
backup:
  pitr:
    enabled: true
    storageName: nowhere
"#,
        );
        let err = spec.validate("my-cluster").unwrap_err();
        assert_eq!(err.field(), Some("spec.backup.pitr.storageName"));
    }

    #[test]
    fn test_crd_metadata() {
        use kube::Resource;
        assert_eq!(PerconaXtraDBCluster::kind(&()), "PerconaXtraDBCluster");
        assert_eq!(PerconaXtraDBCluster::group(&()), "pxc.percona.com");
        assert_eq!(PerconaXtraDBCluster::version(&()), "v1");
    }
}
