//! # Retrying frontend client decorator.
//!
//! [`RetryingFrontendClient`] wraps any [`FrontendClient`] and re-issues
//! calls that fail with a whitelisted transient error, sleeping an
//! exponentially growing, capped delay between attempts. The wrapped client
//! is unaware retries are happening; callers see a single slow call instead
//! of a failed one.
//!
//! The retry policy and the transient-error classifier are inputs: the
//! supervisor passes the policy from its [`Config`](crate::Config) snapshot
//! and defaults the classifier to [`RpcError::is_transient`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::time;

use super::{DescribeDomainRequest, DescribeDomainResponse, FrontendClient, RpcError};

/// Decides whether a failed call may be re-issued.
pub type TransientClassifier = Arc<dyn Fn(&RpcError) -> bool + Send + Sync>;

/// Bounded exponential backoff for RPC retries.
///
/// The delay before retry `n` (1-indexed) is
/// `initial_delay × backoff_factor^(n-1)`, clamped to `max_delay`. With
/// `jitter` set, the delay is randomized in `[delay/2, delay]` to avoid
/// synchronized retries across callers.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Total attempts, including the first call.
    pub max_attempts: usize,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Ceiling for the exponential growth.
    pub max_delay: Duration,
    /// Multiplicative growth factor (`>= 1.0`).
    pub backoff_factor: f64,
    /// Randomize each delay in `[delay/2, delay]`.
    pub jitter: bool,
}

impl RetryPolicy {
    /// Policy applied to frontend calls in production.
    pub fn frontend() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(2),
            backoff_factor: 2.0,
            jitter: true,
        }
    }

    /// Fast-failing policy for tests.
    pub fn testing() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            backoff_factor: 2.0,
            jitter: false,
        }
    }

    /// Computes the delay before retry `attempt` (1-indexed).
    ///
    /// The base is derived purely from the attempt number, so jitter output
    /// never feeds back into subsequent delays.
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as usize) as i32;
        let unclamped = self.initial_delay.as_secs_f64() * self.backoff_factor.powi(exponent);
        let max_secs = self.max_delay.as_secs_f64();

        let base = if !unclamped.is_finite() || unclamped < 0.0 || unclamped > max_secs {
            self.max_delay
        } else {
            Duration::from_secs_f64(unclamped)
        };

        if self.jitter {
            let base_ms = base.as_millis().min(u128::from(u64::MAX)) as u64;
            if base_ms < 2 {
                return base;
            }
            let half = base_ms / 2;
            Duration::from_millis(half + rand::thread_rng().gen_range(0..=base_ms - half))
        } else {
            base
        }
    }
}

/// Transparent retry decorator around a [`FrontendClient`].
pub struct RetryingFrontendClient {
    inner: Arc<dyn FrontendClient>,
    policy: RetryPolicy,
    is_transient: TransientClassifier,
}

impl RetryingFrontendClient {
    /// Wraps `inner` with `policy`, classifying errors via
    /// [`RpcError::is_transient`].
    pub fn new(inner: Arc<dyn FrontendClient>, policy: RetryPolicy) -> Self {
        Self::with_classifier(inner, policy, Arc::new(RpcError::is_transient))
    }

    /// Wraps `inner` with `policy` and a caller-supplied classifier.
    pub fn with_classifier(
        inner: Arc<dyn FrontendClient>,
        policy: RetryPolicy,
        is_transient: TransientClassifier,
    ) -> Self {
        Self {
            inner,
            policy,
            is_transient,
        }
    }
}

#[async_trait]
impl FrontendClient for RetryingFrontendClient {
    async fn describe_domain(
        &self,
        request: DescribeDomainRequest,
    ) -> Result<DescribeDomainResponse, RpcError> {
        let attempts = self.policy.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.inner.describe_domain(request.clone()).await {
                Ok(resp) => return Ok(resp),
                Err(err) if attempt < attempts && (self.is_transient)(&err) => {
                    time::sleep(self.policy.delay_for_attempt(attempt)).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
