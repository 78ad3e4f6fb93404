//! # Subsystem lifecycle seam.
//!
//! A subsystem is an independently started and stopped background worker —
//! the replicator, the system worker — with its own internal complexity.
//! This crate treats each one as opaque: a [`Subsystem`] exposes `start` and
//! `stop`, and a factory constructs it from a typed dependency bundle.
//!
//! Ownership: the supervisor exclusively owns a subsystem handle from
//! construction until the supervisor itself stops. On the fatal-startup path
//! it calls `stop` exactly once for best-effort cleanup; on the normal path
//! subsystem shutdown belongs to whoever stops the host, not to this crate.

use std::sync::Arc;

use async_trait::async_trait;

use crate::clients::{FrontendClient, HistoryClient};
use crate::config::ReplicationConfig;
use crate::error::BoxError;
use crate::metrics::MetricsClient;
use crate::persistence::MetadataManager;
use crate::runtime::{ClusterInfo, MessagingClient};

/// Well-known internal domain the system worker operates in.
///
/// Also the target of the frontend readiness probe: the domain is registered
/// as part of host provisioning, so a successful describe proves the
/// frontend is up and serving.
pub const SYSTEM_DOMAIN: &str = "workhost-system";

/// # Long-lived background worker with an explicit lifecycle.
///
/// `start` performs the subsystem's own blocking startup work and returns
/// once it is running (or failed to run); `stop` releases whatever `start`
/// acquired and must be safe to call after a failed `start`.
#[async_trait]
pub trait Subsystem: Send + Sync {
    /// Stable, human-readable subsystem name used in logs and metrics.
    fn name(&self) -> &str;

    /// Starts the subsystem. An error here is fatal for the host.
    async fn start(&self) -> Result<(), BoxError>;

    /// Stops the subsystem, releasing its resources.
    async fn stop(&self);
}

/// Dependencies handed to a replicator constructor.
pub struct ReplicatorDeps {
    /// Deployment topology, including the current cluster name.
    pub cluster: ClusterInfo,
    /// Metadata store opened after the QPS ceiling was applied.
    pub metadata: Arc<dyn MetadataManager>,
    /// History-service client.
    pub history: Arc<dyn HistoryClient>,
    /// Resolved replication settings.
    pub config: ReplicationConfig,
    /// Replication task transport.
    pub messaging: Arc<dyn MessagingClient>,
    /// Host metrics sink.
    pub metrics: Arc<dyn MetricsClient>,
}

/// Dependencies handed to a system-worker constructor.
pub struct SystemWorkerDeps {
    /// Frontend client, already wrapped in the retry decorator.
    pub frontend: Arc<dyn FrontendClient>,
    /// Host metrics sink.
    pub metrics: Arc<dyn MetricsClient>,
}

/// Constructs the replicator subsystem.
///
/// Invoked only when the deployment is multi-cluster; single-cluster hosts
/// never construct a replicator, so its resource cost is zero when unused.
pub trait ReplicatorFactory: Send + Sync {
    /// Builds the replicator from its dependency bundle.
    fn build(&self, deps: ReplicatorDeps) -> Result<Arc<dyn Subsystem>, BoxError>;
}

/// Constructs the system-worker subsystem.
pub trait SystemWorkerFactory: Send + Sync {
    /// Builds the system worker from its dependency bundle.
    fn build(&self, deps: SystemWorkerDeps) -> Result<Arc<dyn Subsystem>, BoxError>;
}
