//! # Readiness waiter: bounded fixed-delay dependency polling.
//!
//! [`ReadinessWaiter`] probes an external dependency until it responds
//! successfully or the retry budget runs out. The delay between attempts is
//! fixed — no backoff growth, no jitter — so the total wait is deterministic:
//! at most `retry_limit × polling_delay`.
//!
//! Each wait is a fresh bounded loop; nothing persists across calls. There
//! is no mid-probe cancellation: a probe attempt runs to completion, and the
//! supervisor's stop signal only takes effect at its own top-level wait.
//!
//! ## Attempt/delay accounting
//! - A successful probe returns immediately; no trailing delay.
//! - `retry_limit` failures cost exactly `retry_limit` attempts and
//!   `retry_limit - 1` inter-attempt delays.
//! - `retry_limit == 0` fails immediately with zero probe attempts. Negative
//!   limits are unrepresentable; the zero guard is explicit so the loop can
//!   neither underflow nor spin forever.

use std::future::Future;
use std::time::Duration;

use tokio::time;
use tracing::{debug, warn};

use crate::clients::RpcError;
use crate::config::ReadinessConfig;
use crate::error::SupervisorError;
use crate::metrics;

/// Polls a dependency until it answers or the retry budget is exhausted.
///
/// Exhaustion is fatal for the caller: the supervisor has no
/// degraded-but-running mode for an unreachable dependency.
pub struct ReadinessWaiter {
    /// Dependency name, used in logs and the exhaustion error.
    target: &'static str,
    /// Probe attempt budget.
    retry_limit: u32,
    /// Fixed delay between attempts.
    polling_delay: Duration,
}

impl ReadinessWaiter {
    /// Waiter for `target` with an explicit budget.
    pub fn new(target: &'static str, retry_limit: u32, polling_delay: Duration) -> Self {
        Self {
            target,
            retry_limit,
            polling_delay,
        }
    }

    /// Waiter configured from a [`ReadinessConfig`] block.
    pub fn from_config(target: &'static str, cfg: &ReadinessConfig) -> Self {
        Self::new(target, cfg.retry_limit, cfg.polling_delay)
    }

    /// Runs `probe` until it succeeds or the budget is exhausted.
    ///
    /// The probe's success value is discarded; only reachability matters.
    pub async fn wait<F, Fut, T>(&self, mut probe: F) -> Result<(), SupervisorError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RpcError>>,
    {
        for attempt in 1..=self.retry_limit {
            match probe().await {
                Ok(_) => {
                    metrics::record_readiness_probe(true);
                    debug!(dependency = self.target, attempt, "dependency ready");
                    return Ok(());
                }
                Err(err) => {
                    metrics::record_readiness_probe(false);
                    debug!(
                        dependency = self.target,
                        attempt,
                        error = %err,
                        "readiness probe failed"
                    );
                }
            }
            if attempt < self.retry_limit {
                time::sleep(self.polling_delay).await;
            }
        }

        metrics::record_readiness_exhausted();
        warn!(
            dependency = self.target,
            attempts = self.retry_limit,
            "dependency never became ready"
        );
        Err(SupervisorError::ReadinessExhausted {
            attempts: self.retry_limit,
        })
    }
}
