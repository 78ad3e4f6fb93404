//! Supervisor telemetry.
//!
//! Emits host-lifecycle metrics through the `metrics` facade, plus the
//! [`MetricsClient`] handle the supervisor captures from the base runtime and
//! threads into subsystem constructors.
//!
//! # Metric Naming Convention
//!
//! All metrics are prefixed with `workhost_`; counters end in `_total`.

use std::fmt;
use std::sync::Arc;

use metrics::counter;

/// Handle to the host's metrics sink.
///
/// Captured from the base runtime after it starts and passed to subsystem
/// constructors so their internal telemetry lands in the same sink. The
/// supervisor writes the handle once and only reads it afterwards.
pub trait MetricsClient: Send + Sync + fmt::Debug {
    /// Increments a counter by one.
    fn incr(&self, name: &'static str);

    /// Sets a gauge.
    fn gauge(&self, name: &'static str, value: f64);
}

/// [`MetricsClient`] forwarding to the global `metrics` facade.
#[derive(Debug, Default, Clone)]
pub struct FacadeMetrics;

impl FacadeMetrics {
    /// Shared facade-backed handle.
    pub fn shared() -> Arc<dyn MetricsClient> {
        Arc::new(Self)
    }
}

impl MetricsClient for FacadeMetrics {
    fn incr(&self, name: &'static str) {
        counter!(name).increment(1);
    }

    fn gauge(&self, name: &'static str, value: f64) {
        metrics::gauge!(name).set(value);
    }
}

/// Record one readiness probe attempt.
pub fn record_readiness_probe(success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!("workhost_readiness_probes_total", "status" => status).increment(1);
}

/// Record readiness retry-budget exhaustion.
pub fn record_readiness_exhausted() {
    counter!("workhost_readiness_exhausted_total").increment(1);
}

/// Record a subsystem launch outcome.
pub fn record_subsystem_launch(name: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!("workhost_subsystem_launches_total", "subsystem" => name.to_string(), "status" => status)
        .increment(1);
}

/// Record a stop request, noting whether it was accepted or dropped
/// (a duplicate while one was already pending).
pub fn record_stop_request(delivered: bool) {
    let status = if delivered { "accepted" } else { "dropped" };
    counter!("workhost_stop_requests_total", "status" => status).increment(1);
}
