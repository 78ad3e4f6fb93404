//! Error types used by the workhost supervisor.
//!
//! This module defines [`SupervisorError`], the taxonomy of **fatal startup
//! errors**: failures to construct a required collaborator, to start a
//! subsystem, or to reach the frontend within the readiness budget.
//!
//! Every variant is terminal for the host. The supervisor never retries past
//! what the readiness waiter already performs internally; it returns the
//! error to the outer entry point, which owns process exit. Transient RPC
//! failures are a different class entirely and live in
//! [`RpcError`](crate::RpcError) — they are absorbed by the retry decorator
//! and the readiness loop, and never surface here.

use thiserror::Error;

/// # Fatal startup errors raised by the supervisor.
///
/// Any of these means the host cannot run with its mandatory subsystems and
/// must terminate: there is no partial-degradation mode. The variants map
/// one-to-one onto the launch steps that can fail.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SupervisorError {
    /// A required RPC client could not be constructed by the client factory.
    #[error("failed to create {client} client: {reason}")]
    ClientUnavailable {
        /// Which client was requested ("history", "frontend").
        client: &'static str,
        /// Factory-reported failure.
        reason: String,
    },

    /// The metadata manager could not be opened by the persistence factory.
    #[error("failed to create metadata manager: {0}")]
    MetadataStore(String),

    /// A subsystem factory refused to construct its subsystem.
    #[error("failed to build subsystem {name}: {reason}")]
    SubsystemBuild {
        /// Logical subsystem name ("replicator", "system-worker").
        name: String,
        /// Factory-reported failure.
        reason: String,
    },

    /// A subsystem was constructed but its `start` failed.
    ///
    /// By the time this is returned, the subsystem's `stop` has already been
    /// invoked exactly once for best-effort cleanup.
    #[error("failed to start subsystem {name}: {reason}")]
    SubsystemStart {
        /// Logical subsystem name.
        name: String,
        /// Startup failure reported by the subsystem.
        reason: String,
    },

    /// The frontend readiness probe never succeeded within the retry budget.
    #[error("frontend not reachable after {attempts} attempts")]
    ReadinessExhausted {
        /// Number of probe attempts performed (equal to the retry limit).
        attempts: u32,
    },
}

impl SupervisorError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use workhost::SupervisorError;
    ///
    /// let err = SupervisorError::ReadinessExhausted { attempts: 5 };
    /// assert_eq!(err.as_label(), "readiness_exhausted");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SupervisorError::ClientUnavailable { .. } => "client_unavailable",
            SupervisorError::MetadataStore(_) => "metadata_store",
            SupervisorError::SubsystemBuild { .. } => "subsystem_build",
            SupervisorError::SubsystemStart { .. } => "subsystem_start",
            SupervisorError::ReadinessExhausted { .. } => "readiness_exhausted",
        }
    }
}

/// Boxed error type collaborators report across the subsystem seam.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
