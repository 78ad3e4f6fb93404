//! Shared fake collaborators for supervisor integration tests.
//!
//! Every fake records its observable activity — construction, start/stop,
//! probe calls — either in atomic counters or in a shared ordered
//! [`EventLog`], so tests can assert launch order and exact call counts.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use workhost::{
    BaseRuntime, BootstrapParams, BoxError, ClientFactory, ClusterInfo, Config,
    DescribeDomainRequest, DescribeDomainResponse, FacadeMetrics, FrontendClient, HistoryClient,
    MessagingClient, MetadataManager, MetricsClient, PersistenceFactory, ReadinessConfig,
    ReplicatorDeps, ReplicatorFactory, RetryPolicy, RpcError, StoreKind, Subsystem, Supervisor,
    SystemWorkerDeps, SystemWorkerFactory,
};

/// Shared, ordered record of observable collaborator activity.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// Index of the first event equal to `needle`, if any.
    pub fn position(&self, needle: &str) -> Option<usize> {
        self.snapshot().iter().position(|e| e == needle)
    }

    pub fn count_of(&self, needle: &str) -> usize {
        self.snapshot().iter().filter(|e| *e == needle).count()
    }
}

/// Subsystem fake recording starts/stops, optionally failing its start.
pub struct RecordingSubsystem {
    name: &'static str,
    fail_start: bool,
    log: EventLog,
    pub starts: AtomicU32,
    pub stops: AtomicU32,
}

impl RecordingSubsystem {
    pub fn new(name: &'static str, log: &EventLog) -> Arc<Self> {
        Arc::new(Self {
            name,
            fail_start: false,
            log: log.clone(),
            starts: AtomicU32::new(0),
            stops: AtomicU32::new(0),
        })
    }

    pub fn failing(name: &'static str, log: &EventLog) -> Arc<Self> {
        Arc::new(Self {
            name,
            fail_start: true,
            log: log.clone(),
            starts: AtomicU32::new(0),
            stops: AtomicU32::new(0),
        })
    }
}

#[async_trait]
impl Subsystem for RecordingSubsystem {
    fn name(&self) -> &str {
        self.name
    }

    async fn start(&self) -> Result<(), BoxError> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        self.log.push(format!("{}.start", self.name));
        if self.fail_start {
            Err("induced startup failure".into())
        } else {
            Ok(())
        }
    }

    async fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.log.push(format!("{}.stop", self.name));
    }
}

/// Frontend fake failing its first `fail_first` describe calls.
///
/// Failures are `BadRequest` — deliberately *not* transient — so the retry
/// decorator fails fast and the readiness gate owns every retry the tests
/// count.
pub struct FakeFrontend {
    log: EventLog,
    fail_first: u32,
    pub calls: AtomicU32,
}

impl FakeFrontend {
    pub fn new(log: &EventLog, fail_first: u32) -> Arc<Self> {
        Arc::new(Self {
            log: log.clone(),
            fail_first,
            calls: AtomicU32::new(0),
        })
    }
}

#[async_trait]
impl FrontendClient for FakeFrontend {
    async fn describe_domain(
        &self,
        _request: DescribeDomainRequest,
    ) -> Result<DescribeDomainResponse, RpcError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.push("frontend.probe".to_string());
        if n < self.fail_first {
            Err(RpcError::BadRequest("frontend not serving yet".into()))
        } else {
            Ok(DescribeDomainResponse::default())
        }
    }
}

pub struct FakeHistory;
impl HistoryClient for FakeHistory {}

/// Client factory with injectable construction failures.
pub struct FakeClientFactory {
    pub frontend: Arc<FakeFrontend>,
    pub fail_history: bool,
    pub fail_frontend: bool,
    pub history_builds: AtomicU32,
    pub frontend_builds: AtomicU32,
}

impl FakeClientFactory {
    pub fn new(frontend: Arc<FakeFrontend>, fail_history: bool, fail_frontend: bool) -> Arc<Self> {
        Arc::new(Self {
            frontend,
            fail_history,
            fail_frontend,
            history_builds: AtomicU32::new(0),
            frontend_builds: AtomicU32::new(0),
        })
    }
}

impl ClientFactory for FakeClientFactory {
    fn new_history_client(&self) -> Result<Arc<dyn HistoryClient>, RpcError> {
        self.history_builds.fetch_add(1, Ordering::SeqCst);
        if self.fail_history {
            Err(RpcError::Unavailable("history ringpop unresolved".into()))
        } else {
            Ok(Arc::new(FakeHistory))
        }
    }

    fn new_frontend_client(&self) -> Result<Arc<dyn FrontendClient>, RpcError> {
        self.frontend_builds.fetch_add(1, Ordering::SeqCst);
        if self.fail_frontend {
            Err(RpcError::Unavailable("frontend ringpop unresolved".into()))
        } else {
            Ok(self.frontend.clone())
        }
    }
}

/// Base runtime fake recording start/stop order.
pub struct FakeRuntime {
    factory: Arc<FakeClientFactory>,
    log: EventLog,
    pub starts: AtomicU32,
    pub stops: AtomicU32,
}

impl FakeRuntime {
    pub fn new(factory: Arc<FakeClientFactory>, log: &EventLog) -> Arc<Self> {
        Arc::new(Self {
            factory,
            log: log.clone(),
            starts: AtomicU32::new(0),
            stops: AtomicU32::new(0),
        })
    }
}

#[async_trait]
impl BaseRuntime for FakeRuntime {
    async fn start(&self) {
        self.starts.fetch_add(1, Ordering::SeqCst);
        self.log.push("base.start".to_string());
    }

    async fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.log.push("base.stop".to_string());
    }

    fn metrics_client(&self) -> Arc<dyn MetricsClient> {
        FacadeMetrics::shared()
    }

    fn client_factory(&self) -> Arc<dyn ClientFactory> {
        self.factory.clone()
    }
}

pub struct FakeMetadata;
impl MetadataManager for FakeMetadata {}

/// Persistence fake verifying the QPS-before-manager ordering.
pub struct FakePersistence {
    pub fail_manager: bool,
    pub qps: Mutex<Option<usize>>,
    pub manager_builds: AtomicU32,
    pub qps_applied_before_manager: AtomicBool,
}

impl FakePersistence {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            fail_manager: false,
            qps: Mutex::new(None),
            manager_builds: AtomicU32::new(0),
            qps_applied_before_manager: AtomicBool::new(false),
        })
    }

    pub fn failing_manager() -> Arc<Self> {
        Arc::new(Self {
            fail_manager: true,
            qps: Mutex::new(None),
            manager_builds: AtomicU32::new(0),
            qps_applied_before_manager: AtomicBool::new(false),
        })
    }
}

impl PersistenceFactory for FakePersistence {
    fn set_max_qps(&self, qps: usize) {
        *self.qps.lock().unwrap() = Some(qps);
    }

    fn new_metadata_manager(&self, _kind: StoreKind) -> Result<Arc<dyn MetadataManager>, BoxError> {
        self.manager_builds.fetch_add(1, Ordering::SeqCst);
        self.qps_applied_before_manager
            .store(self.qps.lock().unwrap().is_some(), Ordering::SeqCst);
        if self.fail_manager {
            Err("metadata schema version mismatch".into())
        } else {
            Ok(Arc::new(FakeMetadata))
        }
    }
}

pub struct FakeMessaging;
impl MessagingClient for FakeMessaging {}

/// Replicator factory recording every build; fails the test's expectations
/// simply by being counted when it should never run.
pub struct RecordingReplicatorFactory {
    pub subsystem: Arc<RecordingSubsystem>,
    pub builds: AtomicU32,
    pub seen_qps: Mutex<Option<usize>>,
}

impl RecordingReplicatorFactory {
    pub fn new(subsystem: Arc<RecordingSubsystem>) -> Arc<Self> {
        Arc::new(Self {
            subsystem,
            builds: AtomicU32::new(0),
            seen_qps: Mutex::new(None),
        })
    }
}

impl ReplicatorFactory for RecordingReplicatorFactory {
    fn build(&self, deps: ReplicatorDeps) -> Result<Arc<dyn Subsystem>, BoxError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        *self.seen_qps.lock().unwrap() = Some(deps.config.persistence_max_qps);
        Ok(self.subsystem.clone())
    }
}

pub struct RecordingSystemWorkerFactory {
    pub subsystem: Arc<RecordingSubsystem>,
    pub builds: AtomicU32,
}

impl RecordingSystemWorkerFactory {
    pub fn new(subsystem: Arc<RecordingSubsystem>) -> Arc<Self> {
        Arc::new(Self {
            subsystem,
            builds: AtomicU32::new(0),
        })
    }
}

impl SystemWorkerFactory for RecordingSystemWorkerFactory {
    fn build(&self, _deps: SystemWorkerDeps) -> Result<Arc<dyn Subsystem>, BoxError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        Ok(self.subsystem.clone())
    }
}

/// Knobs for assembling a host fixture.
pub struct FixtureOptions {
    pub multi_cluster: bool,
    pub frontend_fail_first: u32,
    pub replicator_fails: bool,
    pub system_worker_fails: bool,
    pub fail_history: bool,
    pub fail_frontend_client: bool,
    pub fail_manager: bool,
    pub readiness: ReadinessConfig,
}

impl Default for FixtureOptions {
    fn default() -> Self {
        Self {
            multi_cluster: true,
            frontend_fail_first: 0,
            replicator_fails: false,
            system_worker_fails: false,
            fail_history: false,
            fail_frontend_client: false,
            fail_manager: false,
            readiness: ReadinessConfig {
                retry_limit: 5,
                polling_delay: Duration::from_millis(1),
            },
        }
    }
}

/// A fully-wired fake host plus handles to every fake for assertions.
pub struct Fixture {
    pub log: EventLog,
    pub runtime: Arc<FakeRuntime>,
    pub clients: Arc<FakeClientFactory>,
    pub frontend: Arc<FakeFrontend>,
    pub persistence: Arc<FakePersistence>,
    pub replicator: Arc<RecordingSubsystem>,
    pub replicator_factory: Arc<RecordingReplicatorFactory>,
    pub system_worker: Arc<RecordingSubsystem>,
    pub system_worker_factory: Arc<RecordingSystemWorkerFactory>,
    pub supervisor: Arc<Supervisor>,
}

impl Fixture {
    pub fn new(opts: FixtureOptions) -> Self {
        let log = EventLog::default();

        let frontend = FakeFrontend::new(&log, opts.frontend_fail_first);
        let clients = FakeClientFactory::new(
            frontend.clone(),
            opts.fail_history,
            opts.fail_frontend_client,
        );
        let runtime = FakeRuntime::new(clients.clone(), &log);

        let persistence = if opts.fail_manager {
            FakePersistence::failing_manager()
        } else {
            FakePersistence::new()
        };

        let replicator = if opts.replicator_fails {
            RecordingSubsystem::failing("replicator", &log)
        } else {
            RecordingSubsystem::new("replicator", &log)
        };
        let replicator_factory = RecordingReplicatorFactory::new(replicator.clone());

        let system_worker = if opts.system_worker_fails {
            RecordingSubsystem::failing("system-worker", &log)
        } else {
            RecordingSubsystem::new("system-worker", &log)
        };
        let system_worker_factory = RecordingSystemWorkerFactory::new(system_worker.clone());

        let cluster = if opts.multi_cluster {
            ClusterInfo::multi("cluster-a")
        } else {
            ClusterInfo::single("cluster-a")
        };

        let params = BootstrapParams {
            runtime: runtime.clone(),
            cluster,
            dynamic_config: Arc::new(workhost::StaticSource::defaults()),
            persistence: persistence.clone(),
            messaging: Arc::new(FakeMessaging),
            replicator_factory: replicator_factory.clone(),
            system_worker_factory: system_worker_factory.clone(),
        };

        let mut config = Config::default();
        config.system_worker.readiness = opts.readiness;
        config.system_worker.frontend_retry = RetryPolicy::testing();

        let supervisor = Arc::new(Supervisor::with_config(params, config));

        Self {
            log,
            runtime,
            clients,
            frontend,
            persistence,
            replicator,
            replicator_factory,
            system_worker,
            system_worker_factory,
            supervisor,
        }
    }
}
