//! # Frontend client seam.
//!
//! The frontend is the host's public-facing service. The supervisor uses it
//! for exactly one thing: a lightweight `describe_domain` call against the
//! well-known system domain, as a liveness signal before the system worker is
//! launched. The response body is discarded; only success or failure matters.

use async_trait::async_trait;

use super::RpcError;

/// Describe-by-name query payload.
#[derive(Clone, Debug)]
pub struct DescribeDomainRequest {
    /// Domain to describe.
    pub name: String,
}

impl DescribeDomainRequest {
    /// Request describing `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Domain description returned by the frontend.
///
/// Opaque to this crate; the supervisor discards it.
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct DescribeDomainResponse {}

/// Client for the frontend service.
///
/// Implementations are supplied by the host's RPC layer via
/// [`ClientFactory`](super::ClientFactory). The supervisor wraps the handle
/// in a [`RetryingFrontendClient`](super::RetryingFrontendClient) before any
/// call is made through it.
#[async_trait]
pub trait FrontendClient: Send + Sync {
    /// Describes a domain by name.
    async fn describe_domain(
        &self,
        request: DescribeDomainRequest,
    ) -> Result<DescribeDomainResponse, RpcError>;
}
