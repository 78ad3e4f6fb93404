//! # Persistence seams.
//!
//! The replicator reads cluster metadata through a manager opened by the
//! host's persistence factory. The supervisor's only persistence
//! responsibilities are (a) applying the configured QPS ceiling to the
//! default store and (b) opening the metadata manager — in that order. The
//! ordering is load-bearing: a manager constructed first would serve traffic
//! without its rate limit.

use std::sync::Arc;

use crate::error::BoxError;

/// Which store schema a metadata manager should open.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreKind {
    /// Current cluster-metadata schema.
    MetadataV2,
}

/// Opaque handle to an opened metadata store.
///
/// Consumed by replicator implementations; this crate never calls into it.
pub trait MetadataManager: Send + Sync {}

/// Factory over the host's persistence layer.
pub trait PersistenceFactory: Send + Sync {
    /// Applies a QPS ceiling to the default store.
    ///
    /// Must be called before [`new_metadata_manager`](Self::new_metadata_manager)
    /// for the ceiling to cover the manager's traffic.
    fn set_max_qps(&self, qps: usize);

    /// Opens a metadata manager for `kind`.
    fn new_metadata_manager(&self, kind: StoreKind) -> Result<Arc<dyn MetadataManager>, BoxError>;
}
