//! Binlog collector deployment synthesis
//!
//! Derives the collector's Deployment descriptor from a cluster's desired
//! state. The reconciliation controller invokes this whenever the spec may
//! have changed; each call is an independent, side-effect-free computation
//! over its argument, so identical input yields an identical descriptor.

use std::collections::BTreeMap;

use pxc_common::crd::{self, BackupStorageSpec, PerconaXtraDBCluster};
use pxc_common::{
    APP_NAME, LABEL_COMPONENT, LABEL_INSTANCE, LABEL_MANAGED_BY, LABEL_NAME, LABEL_PART_OF,
    MANAGED_BY,
};
use tracing::{debug, warn};

use crate::env::collector_env;
use crate::error::SynthesisError;
use crate::k8s::{
    Container, Deployment, DeploymentSpec, LabelSelector, ObjectMeta, PodSpec, PodTemplateSpec,
};
use crate::resources::create_resources;

/// Name suffix of the collector workload (full name is `<cluster>-bl-collector`)
pub const COLLECTOR_SUFFIX: &str = "bl-collector";

/// Name of the collector container
pub const COLLECTOR_CONTAINER: &str = "collector";

/// Entrypoint binary of the collector container
const COLLECTOR_COMMAND: &str = "binlog-collector";

/// Upload interval substituted when the configured one formats to nothing
const DEFAULT_SLEEP_SECONDS: &str = "60";

/// Everything the collector synthesis reads, resolved once from the cluster.
///
/// Flattens the nested backup configuration so the assembly steps depend on
/// one record instead of re-walking the spec.
pub struct CollectorInput<'a> {
    /// Cluster name
    pub cluster: &'a str,
    /// Cluster namespace
    pub namespace: &'a str,
    /// Workload name: `<cluster>-bl-collector`
    pub component: String,
    /// Resolved storage backend for binlog uploads. The zero value when the
    /// configured name has no entry in the storage map.
    pub storage: BackupStorageSpec,
    /// Upload interval as a base-10 string, `"60"` when unset
    pub sleep_seconds: String,
    /// Backup image the collector runs
    pub image: &'a str,
    /// Image pull policy inherited from the main workload
    pub image_pull_policy: Option<&'a str>,
    /// Pull secrets for the backup image
    pub image_pull_secrets: &'a [crd::LocalObjectReference],
    /// Service account the collector pod runs under
    pub service_account_name: Option<&'a str>,
    /// Root secrets bundle holding database credentials
    pub secrets_name: &'a str,
    /// Container security context inherited from the main workload
    pub container_security_context: Option<&'a crd::SecurityContext>,
    /// PITR resource specification, translated during assembly
    pub resources: &'a crd::ResourceRequirements,
}

impl<'a> CollectorInput<'a> {
    /// Resolve the synthesis input from a cluster's desired state.
    ///
    /// The storage lookup keeps the zero-value semantics of a map access: a
    /// PITR storage name with no matching entry yields an empty backend
    /// (blank endpoint, bucket, and credentials secret), not an error.
    pub fn resolve(cluster: &'a PerconaXtraDBCluster) -> Self {
        let name = cluster.metadata.name.as_deref().unwrap_or_default();
        let namespace = cluster.metadata.namespace.as_deref().unwrap_or_default();
        let spec = &cluster.spec;
        let pitr = &spec.backup.pitr;

        let storage = match spec.backup.storages.get(&pitr.storage_name) {
            Some(storage) => storage.clone(),
            None => {
                warn!(
                    cluster = %name,
                    storage = %pitr.storage_name,
                    "PITR storage not found in backup storages, collector gets an empty backend"
                );
                BackupStorageSpec::default()
            }
        };

        let mut sleep_seconds = pitr
            .time_between_uploads
            .map(|secs| secs.to_string())
            .unwrap_or_default();
        if sleep_seconds.is_empty() {
            sleep_seconds = DEFAULT_SLEEP_SECONDS.to_string();
        }

        Self {
            cluster: name,
            namespace,
            component: format!("{}-{}", name, COLLECTOR_SUFFIX),
            storage,
            sleep_seconds,
            image: &spec.backup.image,
            image_pull_policy: spec.pxc.image_pull_policy.as_deref(),
            image_pull_secrets: &spec.backup.image_pull_secrets,
            service_account_name: spec.backup.service_account_name.as_deref(),
            secrets_name: &spec.secrets_name,
            container_security_context: spec.pxc.container_security_context.as_ref(),
            resources: &pitr.resources,
        }
    }
}

/// Build the label set shared by the deployment selector and pod template.
///
/// Five identity labels first, then the storage backend's custom labels;
/// on key collision the custom value wins.
pub fn collector_labels(input: &CollectorInput<'_>) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();
    labels.insert(LABEL_NAME.to_string(), APP_NAME.to_string());
    labels.insert(LABEL_INSTANCE.to_string(), input.cluster.to_string());
    labels.insert(LABEL_COMPONENT.to_string(), input.component.clone());
    labels.insert(LABEL_MANAGED_BY.to_string(), MANAGED_BY.to_string());
    labels.insert(LABEL_PART_OF.to_string(), APP_NAME.to_string());

    for (key, value) in &input.storage.labels {
        labels.insert(key.clone(), value.clone());
    }

    labels
}

/// Synthesize the binlog collector Deployment for a cluster.
///
/// The only failure path is a malformed resource quantity in the PITR spec,
/// in which case no descriptor is returned.
pub fn binlog_collector_deployment(
    cluster: &PerconaXtraDBCluster,
) -> Result<Deployment, SynthesisError> {
    let input = CollectorInput::resolve(cluster);
    let labels = collector_labels(&input);
    let resources = create_resources(input.resources)?;

    let container = Container {
        name: COLLECTOR_CONTAINER.to_string(),
        image: input.image.to_string(),
        image_pull_policy: input.image_pull_policy.map(str::to_string),
        command: Some(vec![COLLECTOR_COMMAND.to_string()]),
        env: collector_env(&input).into_iter().map(Into::into).collect(),
        resources: Some(resources),
        security_context: input.container_security_context.cloned(),
    };

    debug!(
        cluster = %input.cluster,
        namespace = %input.namespace,
        "synthesized binlog collector deployment"
    );

    Ok(Deployment {
        api_version: "apps/v1".to_string(),
        kind: "Deployment".to_string(),
        metadata: ObjectMeta::new(&input.component, input.namespace),
        spec: DeploymentSpec {
            // at most one collector instance is meaningful per cluster
            replicas: 1,
            selector: LabelSelector {
                match_labels: labels.clone(),
            },
            template: PodTemplateSpec {
                metadata: ObjectMeta::new(&input.component, input.namespace).with_labels(labels),
                spec: PodSpec {
                    containers: vec![container],
                    image_pull_secrets: input.image_pull_secrets.to_vec(),
                    service_account_name: input.service_account_name.map(str::to_string),
                    security_context: input.storage.pod_security_context.clone(),
                    affinity: input.storage.affinity.clone(),
                    tolerations: input.storage.tolerations.clone(),
                    node_selector: input.storage.node_selector.clone(),
                    scheduler_name: input.storage.scheduler_name.clone(),
                    priority_class_name: input.storage.priority_class_name.clone(),
                },
            },
        },
    })
}
