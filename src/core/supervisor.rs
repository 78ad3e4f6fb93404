//! # Supervisor: startup order, readiness gating, shutdown coordination.
//!
//! The [`Supervisor`] is the single entry and exit point for the
//! background-processing host. It decides *what* runs and *in what order*;
//! collaborators decide *how*.
//!
//! ## Startup flow
//! ```text
//! Supervisor::start()
//!   ├─► base runtime start ──► capture metrics handle (write-once)
//!   ├─► multi-cluster? ──yes──► replicator launch
//!   │        │                    ├─ apply persistence QPS ceiling
//!   │        │                    ├─ open metadata manager     (fatal on error)
//!   │        │                    ├─ history client            (fatal on error)
//!   │        │                    └─ build + launch            (stop-once on failure)
//!   │        no ─► skipped entirely (replicator never constructed)
//!   ├─► system-worker launch
//!   │        ├─ frontend client                                (fatal on error)
//!   │        ├─ wrap in RetryingFrontendClient
//!   │        ├─ ReadinessWaiter: describe_domain(SYSTEM_DOMAIN)
//!   │        │     bounded: retry_limit × polling_delay        (fatal on exhaustion)
//!   │        └─ build + launch                                 (stop-once on failure)
//!   ├─► block on stop signal  ◄──── stop() from any thread (send-or-drop)
//!   └─► base runtime stop, return
//! ```
//!
//! ## Rules
//! - Any launch-step failure is **fatal**: the error is returned to the
//!   outer entry point, which owns process exit. There is no
//!   partial-degradation mode.
//! - On the normal shutdown path the supervisor stops only the base
//!   runtime; running subsystems are shut down by whoever stops the host.
//! - `stop()` never blocks, from any thread, in any supervisor state.

use std::sync::{Arc, OnceLock};

use tracing::info;

use crate::clients::{DescribeDomainRequest, FrontendClient, RetryingFrontendClient};
use crate::config::Config;
use crate::core::{launcher, readiness::ReadinessWaiter, shutdown, stop::StopSignal};
use crate::error::SupervisorError;
use crate::metrics::{self, MetricsClient};
use crate::persistence::StoreKind;
use crate::runtime::{BaseRuntime, BootstrapParams};
use crate::subsystem::{ReplicatorDeps, SystemWorkerDeps, SYSTEM_DOMAIN};
use crate::SERVICE_NAME;

/// Coordinates subsystem startup order and the host process lifecycle.
pub struct Supervisor {
    /// Single-slot shutdown signal, allocated once at construction.
    stop_signal: StopSignal,
    /// Collaborators this supervisor was bootstrapped with.
    params: BootstrapParams,
    /// Immutable settings snapshot resolved at construction.
    config: Config,
    /// Host metrics handle, written once when the base runtime starts.
    metrics: OnceLock<Arc<dyn MetricsClient>>,
}

impl Supervisor {
    /// Builds a supervisor, resolving the [`Config`] snapshot from the
    /// params' dynamic-configuration source.
    pub fn new(params: BootstrapParams) -> Self {
        let config = Config::resolve(params.dynamic_config.as_ref());
        Self::with_config(params, config)
    }

    /// Builds a supervisor with a pre-resolved snapshot.
    ///
    /// Tests use this to shrink readiness timing to milliseconds.
    pub fn with_config(params: BootstrapParams, config: Config) -> Self {
        Self {
            stop_signal: StopSignal::new(),
            params,
            config,
            metrics: OnceLock::new(),
        }
    }

    /// The resolved settings snapshot.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Host metrics handle; `None` until [`start`](Self::start) has
    /// completed its base-runtime init step.
    pub fn metrics_client(&self) -> Option<Arc<dyn MetricsClient>> {
        self.metrics.get().cloned()
    }

    /// Starts the host and blocks the calling task until stopped.
    ///
    /// Returns `Ok(())` after a clean shutdown, or the fatal startup error
    /// that prevented the host from running. Either way the calling task is
    /// released; process exit is the caller's decision.
    pub async fn start(&self) -> Result<(), SupervisorError> {
        let base = Arc::clone(&self.params.runtime);
        info!(service = SERVICE_NAME, "starting");
        base.start().await;

        let metrics = base.metrics_client();
        let _ = self.metrics.set(Arc::clone(&metrics));

        if self.params.cluster.multi_cluster_enabled {
            self.start_replicator(base.as_ref(), &metrics).await?;
        }
        self.start_system_worker(base.as_ref(), &metrics).await?;

        info!(service = SERVICE_NAME, "started");
        self.stop_signal.wait().await;

        base.stop().await;
        info!(service = SERVICE_NAME, "stopped");
        Ok(())
    }

    /// Requests shutdown. Idempotent, never blocks.
    ///
    /// If a request is already pending, this one is dropped silently (the
    /// drop is still counted). A request that lands before
    /// [`start`](Self::start) reaches its blocking wait is not guaranteed to
    /// be observed beyond the single slot.
    pub fn stop(&self) {
        let delivered = self.stop_signal.request();
        metrics::record_stop_request(delivered);
        info!(service = SERVICE_NAME, delivered, "stop requested");
    }

    /// Runs the host under OS signal control: SIGINT/SIGTERM/SIGQUIT (or
    /// Ctrl-C) trigger [`stop`](Self::stop), then [`start`](Self::start) is
    /// awaited to completion. The signal listener is torn down on return.
    pub async fn run(self: &Arc<Self>) -> Result<(), SupervisorError> {
        let sup = Arc::clone(self);
        let signals = tokio::spawn(async move {
            if shutdown::wait_for_termination_signal().await.is_ok() {
                sup.stop();
            }
        });

        let result = self.start().await;
        signals.abort();
        result
    }

    /// Replicator launch sequence (multi-cluster deployments only).
    async fn start_replicator(
        &self,
        base: &dyn BaseRuntime,
        metrics: &Arc<dyn MetricsClient>,
    ) -> Result<(), SupervisorError> {
        let cfg = &self.config.replication;

        // The ceiling must be in place before the manager exists, or the
        // replicator starts without its QPS cap.
        self.params.persistence.set_max_qps(cfg.persistence_max_qps);
        let metadata = self
            .params
            .persistence
            .new_metadata_manager(StoreKind::MetadataV2)
            .map_err(|err| SupervisorError::MetadataStore(err.to_string()))?;

        let history = base.client_factory().new_history_client().map_err(|err| {
            SupervisorError::ClientUnavailable {
                client: "history",
                reason: err.to_string(),
            }
        })?;

        let replicator = self
            .params
            .replicator_factory
            .build(ReplicatorDeps {
                cluster: self.params.cluster.clone(),
                metadata,
                history,
                config: cfg.clone(),
                messaging: Arc::clone(&self.params.messaging),
                metrics: Arc::clone(metrics),
            })
            .map_err(|err| SupervisorError::SubsystemBuild {
                name: "replicator".into(),
                reason: err.to_string(),
            })?;

        launcher::launch(&replicator).await
    }

    /// System-worker launch sequence, gated on frontend readiness.
    async fn start_system_worker(
        &self,
        base: &dyn BaseRuntime,
        metrics: &Arc<dyn MetricsClient>,
    ) -> Result<(), SupervisorError> {
        let frontend = base.client_factory().new_frontend_client().map_err(|err| {
            SupervisorError::ClientUnavailable {
                client: "frontend",
                reason: err.to_string(),
            }
        })?;
        let frontend: Arc<dyn FrontendClient> = Arc::new(RetryingFrontendClient::new(
            frontend,
            self.config.system_worker.frontend_retry.clone(),
        ));

        let waiter = ReadinessWaiter::from_config("frontend", &self.config.system_worker.readiness);
        waiter
            .wait(|| {
                let frontend = Arc::clone(&frontend);
                async move {
                    frontend
                        .describe_domain(DescribeDomainRequest::named(SYSTEM_DOMAIN))
                        .await
                }
            })
            .await?;

        let worker = self
            .params
            .system_worker_factory
            .build(SystemWorkerDeps {
                frontend,
                metrics: Arc::clone(metrics),
            })
            .map_err(|err| SupervisorError::SubsystemBuild {
                name: "system-worker".into(),
                reason: err.to_string(),
            })?;

        launcher::launch(&worker).await
    }
}
