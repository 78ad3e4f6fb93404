//! RPC client seams consumed by the supervisor.
//!
//! The supervisor never speaks a wire protocol itself; it obtains opaque
//! client handles from the base runtime's [`ClientFactory`] and hands them to
//! subsystems. The one call it does make — the frontend readiness probe —
//! goes through the [`FrontendClient`] trait.
//!
//! ## Contents
//! - [`FrontendClient`], [`DescribeDomainRequest`] — the readiness-probe seam
//! - [`HistoryClient`] — opaque handle passed through to the replicator
//! - [`ClientFactory`] — constructs clients; failures here are fatal
//! - [`RpcError`] — transient vs permanent RPC failure classes
//! - [`RetryingFrontendClient`], [`RetryPolicy`] — transparent retry decorator

mod frontend;
mod retry;

use thiserror::Error;

pub use frontend::{DescribeDomainRequest, DescribeDomainResponse, FrontendClient};
pub use retry::{RetryPolicy, RetryingFrontendClient, TransientClassifier};

/// Opaque handle to the history service.
///
/// The supervisor only constructs and forwards it; every method lives on the
/// concrete implementation owned by the replicator.
pub trait HistoryClient: Send + Sync {}

/// Constructs RPC clients for the host's internal services.
///
/// Construction is a startup-time dependency: a factory failure is fatal and
/// is never retried by the supervisor.
pub trait ClientFactory: Send + Sync {
    /// Builds a history-service client.
    fn new_history_client(&self) -> Result<std::sync::Arc<dyn HistoryClient>, RpcError>;

    /// Builds a frontend client.
    fn new_frontend_client(&self) -> Result<std::sync::Arc<dyn FrontendClient>, RpcError>;
}

/// RPC failure classes surfaced by client implementations.
///
/// The split matters only for retries: [`is_transient`](RpcError::is_transient)
/// is the default whitelist used by [`RetryingFrontendClient`] and, through
/// it, by the readiness probe loop. The supervisor itself treats any error
/// that escapes the decorator the same way — as a failed attempt.
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum RpcError {
    /// Service is up but shedding load.
    #[error("service busy: {0}")]
    ServiceBusy(String),

    /// Service or route is unreachable.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Call exceeded its deadline.
    #[error("call timed out: {0}")]
    Timeout(String),

    /// Request was malformed or referenced a missing entity.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Unclassified failure reported by the client implementation.
    #[error("rpc error: {0}")]
    Other(String),
}

impl RpcError {
    /// Whether this error class is safe to retry.
    ///
    /// Busy, unavailable and timed-out calls are whitelisted; bad requests
    /// and unclassified errors are not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RpcError::ServiceBusy(_) | RpcError::Unavailable(_) | RpcError::Timeout(_)
        )
    }
}
