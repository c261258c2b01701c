//! Common types for the PXC operator: CRDs, errors, and shared Kubernetes primitives

#![deny(missing_docs)]

pub mod crd;
pub mod error;
pub mod yaml;

pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Label key for the application name
pub const LABEL_NAME: &str = "app.kubernetes.io/name";

/// Label key for the cluster instance a workload belongs to
pub const LABEL_INSTANCE: &str = "app.kubernetes.io/instance";

/// Label key for the workload component within the cluster
pub const LABEL_COMPONENT: &str = "app.kubernetes.io/component";

/// Label key for the controller managing a workload
pub const LABEL_MANAGED_BY: &str = "app.kubernetes.io/managed-by";

/// Label key for the application a workload is part of
pub const LABEL_PART_OF: &str = "app.kubernetes.io/part-of";

/// Application name applied to every managed workload
pub const APP_NAME: &str = "percona-xtradb-cluster";

/// Value of the managed-by label on every managed workload
pub const MANAGED_BY: &str = "percona-xtradb-cluster-operator";
