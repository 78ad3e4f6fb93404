//! # Host configuration.
//!
//! [`Config`] is the supervisor's immutable settings snapshot: one block per
//! subsystem it launches. It is resolved **once** at construction time from a
//! [`DynamicSource`] — the seam to the host's dynamic-configuration
//! collection — and never mutated afterwards, so concurrent reads need no
//! synchronization.
//!
//! The readiness timing knobs ([`ReadinessConfig`]) are plain fields rather
//! than compile-time constants so tests can shrink them to milliseconds.
//!
//! # Example
//! ```
//! use workhost::{Config, StaticSource};
//!
//! let cfg = Config::resolve(&StaticSource::defaults());
//! assert_eq!(cfg.replication.persistence_max_qps, 500);
//! assert_eq!(cfg.system_worker.readiness.retry_limit, 5);
//! ```

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::RetryPolicy;

/// Number of buffered retry slots the replicator keeps per task stream.
///
/// Deliberately static: resizing it at runtime would invalidate in-flight
/// buffers, so it is not part of the dynamic surface.
pub const REPLICATOR_BUFFER_RETRY_COUNT: u32 = 8;

/// Keys this crate reads from the dynamic-configuration collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DynamicKey {
    /// QPS ceiling applied to the persistence default store.
    WorkerPersistenceMaxQps,
    /// Replicator worker concurrency.
    WorkerReplicatorConcurrency,
    /// Upper bound on per-task replication retries.
    WorkerReplicationTaskMaxRetry,
}

/// Seam to the external dynamic-configuration collection.
///
/// Implementations resolve a key to its currently-configured integer value,
/// falling back to `default` when the key is unset. The supervisor reads
/// each key exactly once, at construction time; later changes to the
/// underlying collection are not observed.
pub trait DynamicSource: Send + Sync {
    /// Resolves `key`, returning `default` when unset.
    fn get_int(&self, key: DynamicKey, default: usize) -> usize;
}

/// In-memory [`DynamicSource`] backed by a map of overrides.
///
/// Useful for tests and single-binary deployments without a config service.
#[derive(Debug, Default)]
pub struct StaticSource {
    overrides: HashMap<DynamicKey, usize>,
}

impl StaticSource {
    /// A source with no overrides: every key resolves to its default.
    pub fn defaults() -> Self {
        Self::default()
    }

    /// Sets an override for `key`.
    pub fn with(mut self, key: DynamicKey, value: usize) -> Self {
        self.overrides.insert(key, value);
        self
    }
}

impl DynamicSource for StaticSource {
    fn get_int(&self, key: DynamicKey, default: usize) -> usize {
        self.overrides.get(&key).copied().unwrap_or(default)
    }
}

/// Immutable settings snapshot for the whole host.
#[derive(Clone, Debug)]
pub struct Config {
    /// Settings consumed by the replicator launch sequence.
    pub replication: ReplicationConfig,
    /// Settings consumed by the system-worker launch sequence.
    pub system_worker: SystemWorkerConfig,
}

/// Settings handed to the replicator subsystem and its persistence layer.
#[derive(Clone, Debug)]
pub struct ReplicationConfig {
    /// QPS ceiling applied to the persistence default store **before** the
    /// metadata manager is constructed.
    pub persistence_max_qps: usize,
    /// Replicator worker concurrency.
    pub replicator_concurrency: usize,
    /// Buffered retry slots per task stream (static, see
    /// [`REPLICATOR_BUFFER_RETRY_COUNT`]).
    pub replicator_buffer_retry_count: u32,
    /// Upper bound on per-task replication retries.
    pub replication_task_max_retry: usize,
}

/// Settings for the system-worker launch sequence.
#[derive(Clone, Debug)]
pub struct SystemWorkerConfig {
    /// Frontend readiness gate.
    pub readiness: ReadinessConfig,
    /// Retry policy the frontend client decorator applies to every call.
    pub frontend_retry: RetryPolicy,
}

/// Bounded fixed-delay polling parameters for the frontend readiness gate.
///
/// Total wait is deterministic: at most `retry_limit × polling_delay`.
/// A `retry_limit` of zero fails immediately without probing.
#[derive(Clone, Copy, Debug)]
pub struct ReadinessConfig {
    /// Number of probe attempts before giving up.
    pub retry_limit: u32,
    /// Fixed delay between attempts (no backoff growth).
    pub polling_delay: Duration,
}

impl Default for ReadinessConfig {
    /// Returns the production gate: 5 attempts, 1s apart.
    fn default() -> Self {
        Self {
            retry_limit: 5,
            polling_delay: Duration::from_secs(1),
        }
    }
}

impl Default for SystemWorkerConfig {
    fn default() -> Self {
        Self {
            readiness: ReadinessConfig::default(),
            frontend_retry: RetryPolicy::frontend(),
        }
    }
}

impl Config {
    /// Resolves the snapshot from a dynamic source.
    ///
    /// Each dynamic key is read exactly once with its production default:
    /// - persistence QPS ceiling: 500
    /// - replicator concurrency: 1000
    /// - replication task max retry: 50
    pub fn resolve(dc: &dyn DynamicSource) -> Self {
        Self {
            replication: ReplicationConfig {
                persistence_max_qps: dc.get_int(DynamicKey::WorkerPersistenceMaxQps, 500),
                replicator_concurrency: dc.get_int(DynamicKey::WorkerReplicatorConcurrency, 1000),
                replicator_buffer_retry_count: REPLICATOR_BUFFER_RETRY_COUNT,
                replication_task_max_retry: dc
                    .get_int(DynamicKey::WorkerReplicationTaskMaxRetry, 50),
            },
            system_worker: SystemWorkerConfig::default(),
        }
    }
}

impl Default for Config {
    /// Equivalent to resolving against a source with no overrides.
    fn default() -> Self {
        Self::resolve(&StaticSource::defaults())
    }
}
