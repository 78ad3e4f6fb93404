//! # workhost
//!
//! **Workhost** is the service supervisor for a background-processing host.
//!
//! It owns the startup sequence, readiness gating, and shutdown coordination
//! for the host's long-lived subsystems — a cross-cluster replicator and an
//! internal system-workflow worker — while treating the subsystems themselves
//! as opaque collaborators behind trait seams.
//!
//! ## Architecture
//! ```text
//!                 ┌────────────────────────────────────────────────┐
//!                 │  Supervisor                                    │
//!   stop() ──────►│  - single-slot stop signal (send-or-drop)      │
//!  (any thread)   │  - conditional activation by topology flag     │
//!                 │  - fatal-on-startup-failure, stop-once cleanup │
//!                 └───────┬───────────────────┬────────────────────┘
//!                         │ multi-cluster     │ always
//!                         ▼                   ▼
//!                 ┌──────────────┐    ┌───────────────────┐
//!                 │  Replicator  │    │   SystemWorker    │
//!                 │ (collaborator│    │   (collaborator)  │
//!                 │  subsystem)  │    │  gated on frontend│
//!                 └──────────────┘    │  readiness probe  │
//!                                     └───────────────────┘
//!
//! Launch order: base runtime → [replicator] → readiness gate → system
//! worker → block on stop signal → base runtime teardown.
//! ```
//!
//! ## Contracts worth knowing
//! - **Fail fast**: any failure to construct a collaborator or start a
//!   subsystem is fatal; the typed error is returned to the outer entry
//!   point, which owns process exit. No partial-degradation mode.
//! - **Stop is cheap**: [`Supervisor::stop`] never blocks and never panics,
//!   from any thread, any number of times. One pending request is honored
//!   once the run loop reaches its blocking wait; extras are dropped.
//! - **Bounded readiness**: the frontend gate waits at most
//!   `retry_limit × polling_delay`, with fixed (non-growing) delays.
//! - **Conditional activation**: single-cluster deployments never construct
//!   the replicator.
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use workhost::{
//!     BaseRuntime, BootstrapParams, BoxError, ClientFactory, ClusterInfo,
//!     DescribeDomainRequest, DescribeDomainResponse, FacadeMetrics, FrontendClient,
//!     HistoryClient, MessagingClient, MetadataManager, MetricsClient, PersistenceFactory,
//!     ReplicatorDeps, ReplicatorFactory, RpcError, StaticSource, StoreKind, Subsystem,
//!     Supervisor, SystemWorkerDeps, SystemWorkerFactory,
//! };
//!
//! struct IdleSubsystem(&'static str);
//!
//! #[async_trait]
//! impl Subsystem for IdleSubsystem {
//!     fn name(&self) -> &str { self.0 }
//!     async fn start(&self) -> Result<(), BoxError> { Ok(()) }
//!     async fn stop(&self) {}
//! }
//!
//! struct LocalFrontend;
//!
//! #[async_trait]
//! impl FrontendClient for LocalFrontend {
//!     async fn describe_domain(
//!         &self,
//!         _request: DescribeDomainRequest,
//!     ) -> Result<DescribeDomainResponse, RpcError> {
//!         Ok(DescribeDomainResponse::default())
//!     }
//! }
//!
//! struct LocalHistory;
//! impl HistoryClient for LocalHistory {}
//!
//! struct LocalClients;
//!
//! impl ClientFactory for LocalClients {
//!     fn new_history_client(&self) -> Result<Arc<dyn HistoryClient>, RpcError> {
//!         Ok(Arc::new(LocalHistory))
//!     }
//!     fn new_frontend_client(&self) -> Result<Arc<dyn FrontendClient>, RpcError> {
//!         Ok(Arc::new(LocalFrontend))
//!     }
//! }
//!
//! struct LocalRuntime;
//!
//! #[async_trait]
//! impl BaseRuntime for LocalRuntime {
//!     async fn start(&self) {}
//!     async fn stop(&self) {}
//!     fn metrics_client(&self) -> Arc<dyn MetricsClient> { FacadeMetrics::shared() }
//!     fn client_factory(&self) -> Arc<dyn ClientFactory> { Arc::new(LocalClients) }
//! }
//!
//! struct LocalMetadata;
//! impl MetadataManager for LocalMetadata {}
//!
//! struct LocalPersistence;
//!
//! impl PersistenceFactory for LocalPersistence {
//!     fn set_max_qps(&self, _qps: usize) {}
//!     fn new_metadata_manager(
//!         &self,
//!         _kind: StoreKind,
//!     ) -> Result<Arc<dyn MetadataManager>, BoxError> {
//!         Ok(Arc::new(LocalMetadata))
//!     }
//! }
//!
//! struct LocalMessaging;
//! impl MessagingClient for LocalMessaging {}
//!
//! struct Workers;
//!
//! impl ReplicatorFactory for Workers {
//!     fn build(&self, _deps: ReplicatorDeps) -> Result<Arc<dyn Subsystem>, BoxError> {
//!         Ok(Arc::new(IdleSubsystem("replicator")))
//!     }
//! }
//!
//! impl SystemWorkerFactory for Workers {
//!     fn build(&self, _deps: SystemWorkerDeps) -> Result<Arc<dyn Subsystem>, BoxError> {
//!         Ok(Arc::new(IdleSubsystem("system-worker")))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let supervisor = Arc::new(Supervisor::new(BootstrapParams {
//!         runtime: Arc::new(LocalRuntime),
//!         cluster: ClusterInfo::multi("cluster-a"),
//!         dynamic_config: Arc::new(StaticSource::defaults()),
//!         persistence: Arc::new(LocalPersistence),
//!         messaging: Arc::new(LocalMessaging),
//!         replicator_factory: Arc::new(Workers),
//!         system_worker_factory: Arc::new(Workers),
//!     }));
//!
//!     // Blocks until SIGINT/SIGTERM/SIGQUIT (or an explicit stop()).
//!     supervisor.run().await?;
//!     Ok(())
//! }
//! ```

mod clients;
mod config;
mod core;
mod error;
mod metrics;
mod persistence;
mod runtime;
mod subsystem;

// ---- Public re-exports ----

pub use clients::{
    ClientFactory, DescribeDomainRequest, DescribeDomainResponse, FrontendClient, HistoryClient,
    RetryPolicy, RetryingFrontendClient, RpcError, TransientClassifier,
};
pub use config::{
    Config, DynamicKey, DynamicSource, ReadinessConfig, ReplicationConfig, StaticSource,
    SystemWorkerConfig, REPLICATOR_BUFFER_RETRY_COUNT,
};
pub use core::{ReadinessWaiter, Supervisor};
pub use error::{BoxError, SupervisorError};
pub use metrics::{FacadeMetrics, MetricsClient};
pub use persistence::{MetadataManager, PersistenceFactory, StoreKind};
pub use runtime::{BaseRuntime, BootstrapParams, ClusterInfo, MessagingClient};
pub use subsystem::{
    ReplicatorDeps, ReplicatorFactory, Subsystem, SystemWorkerDeps, SystemWorkerFactory,
    SYSTEM_DOMAIN,
};

/// Logical name of this service within the host, used in log lines.
pub const SERVICE_NAME: &str = "worker";
