//! Kubernetes descriptor types for synthesized workloads
//!
//! Hand-rolled serde models of the apps/v1 Deployment surface the collector
//! synthesis emits. A descriptor is plain data: callers serialize it and
//! apply it against a cluster API; nothing in this module talks to
//! Kubernetes. Pod-level primitives (tolerations, security contexts,
//! affinity) are shared with the CRD spec via `pxc_common::crd`.

use std::collections::BTreeMap;

use pxc_common::crd::{
    Affinity, LocalObjectReference, PodSecurityContext, SecurityContext, Toleration,
};
use serde::{Deserialize, Serialize};

// =============================================================================
// Metadata and selectors
// =============================================================================

/// Object metadata for synthesized resources
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Resource name
    pub name: String,
    /// Resource namespace
    pub namespace: String,
    /// Labels
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl ObjectMeta {
    /// Create metadata with the given name and namespace
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            labels: BTreeMap::new(),
        }
    }

    /// Attach a label set
    pub fn with_labels(mut self, labels: BTreeMap<String, String>) -> Self {
        self.labels = labels;
        self
    }
}

/// Label selector for deployments
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    /// Match labels
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub match_labels: BTreeMap<String, String>,
}

// =============================================================================
// Environment variables
// =============================================================================

/// Environment variable: either a literal value or a reference to a secret key
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnvVar {
    /// Variable name
    pub name: String,
    /// Literal value (mutually exclusive with `value_from`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Reference to a secret key (mutually exclusive with `value`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_from: Option<EnvVarSource>,
}

impl EnvVar {
    /// Create an env var with a literal value
    pub fn literal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            value_from: None,
        }
    }

    /// Create an env var that references a secret key
    pub fn from_secret(
        name: impl Into<String>,
        secret_name: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            value: None,
            value_from: Some(EnvVarSource {
                secret_key_ref: Some(SecretKeySelector {
                    name: secret_name.into(),
                    key: key.into(),
                }),
            }),
        }
    }
}

/// Source for an environment variable value
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnvVarSource {
    /// Reference to a specific key in a Kubernetes Secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key_ref: Option<SecretKeySelector>,
}

/// Selector for a key within a Kubernetes Secret
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SecretKeySelector {
    /// Name of the secret
    pub name: String,
    /// Key within the secret
    pub key: String,
}

// =============================================================================
// Resource requirements
// =============================================================================

/// Resource requirements attached to a container
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequirements {
    /// Requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests: Option<ResourceQuantity>,
    /// Limits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<ResourceQuantity>,
}

/// Resource quantity for CPU and memory
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceQuantity {
    /// CPU quantity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,
    /// Memory quantity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
}

impl From<&pxc_common::crd::ResourceQuantity> for ResourceQuantity {
    fn from(rq: &pxc_common::crd::ResourceQuantity) -> Self {
        Self {
            cpu: rq.cpu.clone(),
            memory: rq.memory.clone(),
        }
    }
}

impl From<&pxc_common::crd::ResourceRequirements> for ResourceRequirements {
    fn from(rr: &pxc_common::crd::ResourceRequirements) -> Self {
        Self {
            requests: rr.requests.as_ref().map(ResourceQuantity::from),
            limits: rr.limits.as_ref().map(ResourceQuantity::from),
        }
    }
}

// =============================================================================
// Container and pod
// =============================================================================

/// Container spec
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Container name
    pub name: String,
    /// Image
    pub image: String,
    /// Image pull policy (Always, IfNotPresent, Never)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<String>,
    /// Command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    /// Environment variables
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env: Vec<EnvVar>,
    /// Resource requirements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
    /// Security context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_context: Option<SecurityContext>,
}

/// Pod spec
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    /// Containers
    pub containers: Vec<Container>,
    /// Image pull secrets for private registries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_pull_secrets: Vec<LocalObjectReference>,
    /// Service account the pod runs under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_account_name: Option<String>,
    /// Pod-level security context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_context: Option<PodSecurityContext>,
    /// Scheduling affinity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affinity: Option<Affinity>,
    /// Tolerations for tainted nodes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tolerations: Vec<Toleration>,
    /// Node selector
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub node_selector: BTreeMap<String, String>,
    /// Scheduler name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduler_name: Option<String>,
    /// Priority class name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_class_name: Option<String>,
}

/// Pod template spec
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodTemplateSpec {
    /// Pod metadata
    pub metadata: ObjectMeta,
    /// Pod spec
    pub spec: PodSpec,
}

// =============================================================================
// Deployment
// =============================================================================

/// Deployment spec
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSpec {
    /// Number of replicas
    pub replicas: u32,
    /// Label selector
    pub selector: LabelSelector,
    /// Pod template
    pub template: PodTemplateSpec,
}

/// Kubernetes Deployment
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// API version
    pub api_version: String,
    /// Kind
    pub kind: String,
    /// Metadata
    pub metadata: ObjectMeta,
    /// Spec
    pub spec: DeploymentSpec,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_literal() {
        let var = EnvVar::literal("S3_BUCKET", "binlogs");
        assert_eq!(var.name, "S3_BUCKET");
        assert_eq!(var.value.as_deref(), Some("binlogs"));
        assert!(var.value_from.is_none());

        let json = serde_json::to_value(&var).unwrap();
        assert_eq!(json["value"], "binlogs");
        assert!(json.get("valueFrom").is_none());
    }

    #[test]
    fn test_env_var_from_secret() {
        let var = EnvVar::from_secret("PXC_PASS", "cluster-secrets", "operator");
        assert!(var.value.is_none());

        let json = serde_json::to_value(&var).unwrap();
        assert_eq!(json["valueFrom"]["secretKeyRef"]["name"], "cluster-secrets");
        assert_eq!(json["valueFrom"]["secretKeyRef"]["key"], "operator");
    }

    #[test]
    fn test_resource_requirements_from_crd() {
        let spec = pxc_common::crd::ResourceRequirements {
            requests: Some(pxc_common::crd::ResourceQuantity {
                cpu: Some("100m".to_string()),
                memory: None,
            }),
            limits: None,
        };

        let res = ResourceRequirements::from(&spec);
        assert_eq!(res.requests.as_ref().unwrap().cpu.as_deref(), Some("100m"));
        assert!(res.requests.as_ref().unwrap().memory.is_none());
        assert!(res.limits.is_none());
    }

    #[test]
    fn test_object_meta_labels_omitted_when_empty() {
        let meta = ObjectMeta::new("collector", "prod");
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["name"], "collector");
        assert_eq!(json["namespace"], "prod");
        assert!(json.get("labels").is_none());
    }

    #[test]
    fn test_deployment_serializes_camel_case() {
        let deployment = Deployment {
            api_version: "apps/v1".to_string(),
            kind: "Deployment".to_string(),
            metadata: ObjectMeta::new("c1-bl-collector", "default"),
            spec: DeploymentSpec {
                replicas: 1,
                selector: LabelSelector::default(),
                template: PodTemplateSpec {
                    metadata: ObjectMeta::new("c1-bl-collector", "default"),
                    spec: PodSpec {
                        containers: vec![Container {
                            name: "collector".to_string(),
                            image: "backup:latest".to_string(),
                            image_pull_policy: Some("Always".to_string()),
                            command: Some(vec!["binlog-collector".to_string()]),
                            env: vec![],
                            resources: None,
                            security_context: None,
                        }],
                        image_pull_secrets: vec![],
                        service_account_name: None,
                        security_context: None,
                        affinity: None,
                        tolerations: vec![],
                        node_selector: BTreeMap::new(),
                        scheduler_name: None,
                        priority_class_name: None,
                    },
                },
            },
        };

        let json = serde_json::to_value(&deployment).unwrap();
        assert_eq!(json["apiVersion"], "apps/v1");
        assert_eq!(
            json["spec"]["template"]["spec"]["containers"][0]["imagePullPolicy"],
            "Always"
        );
        // Empty optional pod fields disappear from the manifest
        let pod = &json["spec"]["template"]["spec"];
        assert!(pod.get("nodeSelector").is_none());
        assert!(pod.get("tolerations").is_none());
        assert!(pod.get("serviceAccountName").is_none());
    }
}
