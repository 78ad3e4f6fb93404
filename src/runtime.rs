//! # Base runtime and bootstrap parameters.
//!
//! The base runtime is the shared service substrate — metrics sink, RPC
//! client factory, membership — that every service in the host builds on.
//! The supervisor starts it first, tears it down last, and treats everything
//! in between as opaque.
//!
//! [`BootstrapParams`] bundles every collaborator the supervisor is
//! constructed with. Collaborators arrive pre-built; the supervisor decides
//! only *whether* and *when* to use them.
//!
//! Logging is not threaded through a handle: this crate logs through the
//! `tracing` facade directly, and expects the host's entry point to have
//! installed a subscriber.

use std::sync::Arc;

use async_trait::async_trait;

use crate::clients::ClientFactory;
use crate::config::DynamicSource;
use crate::metrics::MetricsClient;
use crate::persistence::PersistenceFactory;
use crate::subsystem::{ReplicatorFactory, SystemWorkerFactory};

/// Service substrate shared by every service in the host.
///
/// Starting the base runtime is infallible from the supervisor's point of
/// view: failures are preconditions of the runtime's own contract and are
/// handled (or panicked on) inside the implementation.
#[async_trait]
pub trait BaseRuntime: Send + Sync {
    /// Starts the substrate. Must be called before any accessor is used.
    async fn start(&self);

    /// Stops the substrate, releasing its resources.
    async fn stop(&self);

    /// Handle to the host metrics sink. Valid only after [`start`](Self::start).
    fn metrics_client(&self) -> Arc<dyn MetricsClient>;

    /// Factory for internal RPC clients. Valid only after [`start`](Self::start).
    fn client_factory(&self) -> Arc<dyn ClientFactory>;
}

/// Opaque handle to the host's messaging layer (replication task transport).
///
/// Consumed by replicator implementations; this crate only forwards it.
pub trait MessagingClient: Send + Sync {}

/// Deployment-topology snapshot, captured once at bootstrap.
///
/// Injected as plain data so the activation decision is unit-testable
/// without constructing real cluster metadata.
#[derive(Clone, Debug)]
pub struct ClusterInfo {
    /// Name of the cluster this host runs in.
    pub current_cluster: String,
    /// Whether cross-cluster replication is active for this deployment.
    /// When false, the replicator is never constructed.
    pub multi_cluster_enabled: bool,
}

impl ClusterInfo {
    /// Single-cluster topology: no replication.
    pub fn single(current_cluster: impl Into<String>) -> Self {
        Self {
            current_cluster: current_cluster.into(),
            multi_cluster_enabled: false,
        }
    }

    /// Multi-cluster topology: replication active.
    pub fn multi(current_cluster: impl Into<String>) -> Self {
        Self {
            current_cluster: current_cluster.into(),
            multi_cluster_enabled: true,
        }
    }
}

/// Everything the supervisor is constructed with.
///
/// One snapshot per process. The supervisor holds it for its whole lifetime;
/// no collaborator outlives the base runtime.
pub struct BootstrapParams {
    /// The service substrate started first and stopped last.
    pub runtime: Arc<dyn BaseRuntime>,
    /// Deployment topology.
    pub cluster: ClusterInfo,
    /// Dynamic-configuration source, read once at construction.
    pub dynamic_config: Arc<dyn DynamicSource>,
    /// Persistence layer used by the replicator launch sequence.
    pub persistence: Arc<dyn PersistenceFactory>,
    /// Messaging handle forwarded to the replicator.
    pub messaging: Arc<dyn MessagingClient>,
    /// Constructs the replicator subsystem.
    pub replicator_factory: Arc<dyn ReplicatorFactory>,
    /// Constructs the system-worker subsystem.
    pub system_worker_factory: Arc<dyn SystemWorkerFactory>,
}
