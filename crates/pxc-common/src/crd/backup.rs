//! Backup and point-in-time-recovery configuration
//!
//! These types describe where backups and binlogs go (named storage
//! backends) and how the PITR binlog collector behaves. Each storage
//! backend carries its own scheduling hints so backup workloads can be
//! placed under different constraints than the database pods.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::types::{
    Affinity, LocalObjectReference, PodSecurityContext, ResourceRequirements, Toleration,
};

/// Backup configuration for a cluster
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackupSpec {
    /// Image used for backup jobs and the binlog collector
    #[serde(default)]
    pub image: String,

    /// Pull secrets for the backup image
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_pull_secrets: Vec<LocalObjectReference>,

    /// Service account backup pods run under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_name: Option<String>,

    /// Named storage backends available to backups and PITR
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub storages: BTreeMap<String, BackupStorageSpec>,

    /// Point-in-time-recovery configuration
    #[serde(default)]
    pub pitr: PitrSpec,
}

impl BackupSpec {
    /// Validate the backup configuration.
    ///
    /// Flags a PITR storage name that does not resolve to a configured
    /// backend. Manifest synthesis tolerates the dangling reference (the
    /// collector comes out with blank storage fields), so the mistake is
    /// surfaced here at admission time instead.
    pub fn validate(&self, cluster: &str) -> crate::Result<()> {
        for name in self.storages.keys() {
            super::validate_dns_identifier(name).map_err(|e| {
                crate::Error::validation_for_field(cluster, "spec.backup.storages", e)
            })?;
        }

        if self.pitr.enabled && !self.storages.contains_key(&self.pitr.storage_name) {
            return Err(crate::Error::validation_for_field(
                cluster,
                "spec.backup.pitr.storageName",
                format!(
                    "storage '{}' is not defined in spec.backup.storages",
                    self.pitr.storage_name
                ),
            ));
        }

        Ok(())
    }
}

/// One named storage backend for backups and binlogs
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BackupStorageSpec {
    /// S3 connection settings for this backend
    #[serde(default)]
    pub s3: S3StorageConfig,

    /// Extra labels applied to workloads using this backend
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    /// Scheduling affinity for workloads using this backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affinity: Option<Affinity>,

    /// Tolerations for workloads using this backend
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tolerations: Vec<Toleration>,

    /// Node selector for workloads using this backend
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub node_selector: BTreeMap<String, String>,

    /// Scheduler placing workloads that use this backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduler_name: Option<String>,

    /// Priority class for workloads using this backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_class_name: Option<String>,

    /// Pod-level security context for workloads using this backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_security_context: Option<PodSecurityContext>,
}

/// S3 connection settings for one storage backend
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct S3StorageConfig {
    /// Bucket objects are written to
    #[serde(default)]
    pub bucket: String,

    /// Name of the secret holding AWS-style credentials
    #[serde(default)]
    pub credentials_secret: String,

    /// Endpoint URL, with or without an `https://` scheme
    #[serde(default)]
    pub endpoint_url: String,

    /// Region of the bucket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Point-in-time-recovery configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PitrSpec {
    /// Whether binlog collection is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Name of the storage backend binlogs are uploaded to
    #[serde(default)]
    pub storage_name: String,

    /// Seconds between binlog uploads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_between_uploads: Option<i64>,

    /// Resource requirements for the collector container
    #[serde(default)]
    pub resources: ResourceRequirements,
}
