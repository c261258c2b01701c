//! Binlog collector manifest synthesis
//!
//! Compiles a `PerconaXtraDBCluster` desired-state spec into the Deployment
//! descriptor for the point-in-time-recovery binlog collector sidecar. The
//! synthesis is a pure function of the cluster object: no API calls, no
//! secret resolution, no state across invocations. The reconciliation
//! controller owns the returned descriptor and applies it to the cluster.
//!
//! # Usage
//!
//! ```rust,ignore
//! let deployment = pxc_backup::binlog_collector_deployment(&cluster)?;
//! let manifest = serde_json::to_string(&deployment)?;
//! ```

mod collector;
mod env;
mod error;
pub mod k8s;
mod resources;

pub use collector::{
    binlog_collector_deployment, collector_labels, CollectorInput, COLLECTOR_CONTAINER,
    COLLECTOR_SUFFIX,
};
pub use env::{collector_env, EnvEntry, EnvValue};
pub use error::SynthesisError;
pub use resources::{create_resources, QuantityParseError};
