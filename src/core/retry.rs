//! Bounded retry with backoff
//!
//! A [`RetryPolicy`] bundles a ceiling on attempts, a backoff schedule, and
//! what to do once the ceiling is reached. The same executor serves every
//! remote call that needs retrying.
//!
//! # Example
//!
//! ```rust
//! use shipex::core::retry::{Backoff, OnExhaustion, RetryPolicy};
//! use std::time::Duration;
//!
//! # async fn example() -> shipex::domain::Result<()> {
//! let policy = RetryPolicy::new(
//!     5,
//!     Backoff::exponential(Duration::from_secs(1)),
//!     OnExhaustion::Skip,
//! );
//!
//! let value = policy
//!     .execute("order lookup", |_attempt| async { Ok::<_, shipex::domain::ShipexError>(42) })
//!     .await?;
//! assert_eq!(value, Some(42));
//! # Ok(())
//! # }
//! ```

use crate::config::RetryConfig;
use crate::domain::{Result, ShipexError};
use std::future::Future;
use std::time::Duration;

/// Delay schedule between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Retry immediately
    None,

    /// Same pause after every failed attempt
    Fixed(Duration),

    /// `unit * 2^attempt` after the zero-based failed attempt, capped at `max`
    Exponential { unit: Duration, max: Duration },
}

impl Backoff {
    /// Uncapped exponential backoff
    pub fn exponential(unit: Duration) -> Self {
        Backoff::Exponential {
            unit,
            max: Duration::MAX,
        }
    }

    /// Delay to wait after the given zero-based attempt failed
    pub fn delay(&self, attempt: u32) -> Duration {
        match *self {
            Backoff::None => Duration::ZERO,
            Backoff::Fixed(delay) => delay,
            Backoff::Exponential { unit, max } => {
                let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
                unit.checked_mul(factor).unwrap_or(max).min(max)
            }
        }
    }
}

/// What happens once every attempt has failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnExhaustion {
    /// Log the skip and return `None`
    Skip,

    /// Return the last error
    Fail,
}

/// Retry ceiling, backoff, and exhaustion action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,

    /// Delay schedule
    pub backoff: Backoff,

    /// Exhaustion action
    pub on_exhaustion: OnExhaustion,
}

impl RetryPolicy {
    /// Create a policy; `max_attempts` is raised to at least one
    pub fn new(max_attempts: u32, backoff: Backoff, on_exhaustion: OnExhaustion) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
            on_exhaustion,
        }
    }

    /// Run `op` until it succeeds or attempts run out
    ///
    /// Returns `Ok(Some(value))` on success. On exhaustion returns `Ok(None)`
    /// for [`OnExhaustion::Skip`] and the last error for [`OnExhaustion::Fail`].
    pub async fn execute<T, F, Fut>(&self, operation: &str, op: F) -> Result<Option<T>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.execute_until(operation, op, |_| true).await
    }

    /// Run `op` until it yields a value `accept` approves
    ///
    /// A rejected value counts as a failed attempt. Errors that are not
    /// retryable are returned at once, whatever the exhaustion action.
    pub async fn execute_until<T, F, Fut, P>(
        &self,
        operation: &str,
        mut op: F,
        accept: P,
    ) -> Result<Option<T>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
        P: Fn(&T) -> bool,
    {
        let mut last_error: Option<ShipexError> = None;

        for attempt in 0..self.max_attempts {
            match op(attempt).await {
                Ok(value) if accept(&value) => return Ok(Some(value)),
                Ok(_) => {
                    crate::log_retry_attempt!(
                        attempt + 1,
                        self.max_attempts,
                        format!("{operation} returned an unusable result")
                    );
                    last_error = None;
                }
                Err(e) if !is_retryable(&e) => {
                    tracing::warn!(
                        operation = %operation,
                        attempt = attempt + 1,
                        error = %e,
                        "Non-retryable error, giving up"
                    );
                    return Err(e);
                }
                Err(e) => {
                    crate::log_retry_attempt!(
                        attempt + 1,
                        self.max_attempts,
                        format!("{operation} failed: {e}")
                    );
                    last_error = Some(e);
                }
            }

            if attempt + 1 < self.max_attempts {
                let delay = self.backoff.delay(attempt);
                if !delay.is_zero() {
                    tracing::debug!(
                        operation = %operation,
                        delay_ms = delay.as_millis() as u64,
                        "Backing off before next attempt"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }

        match self.on_exhaustion {
            OnExhaustion::Skip => {
                tracing::warn!(
                    operation = %operation,
                    attempts = self.max_attempts,
                    error = ?last_error.as_ref().map(|e| e.to_string()),
                    "Retries exhausted, skipping"
                );
                Ok(None)
            }
            OnExhaustion::Fail => Err(last_error.unwrap_or_else(|| {
                ShipexError::Export(format!(
                    "{operation} did not succeed after {} attempts",
                    self.max_attempts
                ))
            })),
        }
    }
}

fn is_retryable(error: &ShipexError) -> bool {
    match error {
        ShipexError::ShipStation(e) => e.is_transient(),
        ShipexError::Io(_) | ShipexError::Other(_) => true,
        _ => false,
    }
}

/// The three policies a run uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicies {
    /// Shipment search; empty results are retried without backoff
    pub shipments: RetryPolicy,

    /// Individual order fallback lookup
    pub order_lookup: RetryPolicy,

    /// Carrier, service and bulk order requests
    pub request: RetryPolicy,
}

impl RetryPolicies {
    /// Build the policies from configuration
    pub fn from_config(config: &RetryConfig) -> Self {
        let max = Duration::from_millis(config.request_max_delay_ms);
        let shipment_backoff = if config.empty_shipment_delay_ms == 0 {
            Backoff::None
        } else {
            Backoff::Fixed(Duration::from_millis(config.empty_shipment_delay_ms))
        };

        Self {
            shipments: RetryPolicy::new(
                config.empty_shipment_attempts,
                shipment_backoff,
                OnExhaustion::Skip,
            ),
            order_lookup: RetryPolicy::new(
                config.order_lookup_attempts,
                Backoff::Exponential {
                    unit: Duration::from_millis(config.order_lookup_backoff_ms),
                    max,
                },
                OnExhaustion::Skip,
            ),
            request: RetryPolicy::new(
                config.request_attempts,
                Backoff::Exponential {
                    unit: Duration::from_millis(config.request_backoff_ms),
                    max,
                },
                OnExhaustion::Fail,
            ),
        }
    }

    /// Policies with the given attempt ceilings and no delays, for tests and dry runs
    pub fn immediate(attempts: u32) -> Self {
        Self {
            shipments: RetryPolicy::new(attempts, Backoff::None, OnExhaustion::Skip),
            order_lookup: RetryPolicy::new(attempts, Backoff::None, OnExhaustion::Skip),
            request: RetryPolicy::new(attempts, Backoff::None, OnExhaustion::Fail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ShipStationError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use test_case::test_case;

    #[test_case(0, 1 ; "first retry waits one unit")]
    #[test_case(1, 2 ; "second retry doubles")]
    #[test_case(3, 8 ; "fourth retry waits eight units")]
    fn test_exponential_delay(attempt: u32, expected_secs: u64) {
        let backoff = Backoff::exponential(Duration::from_secs(1));
        assert_eq!(backoff.delay(attempt), Duration::from_secs(expected_secs));
    }

    #[test]
    fn test_exponential_delay_is_capped() {
        let backoff = Backoff::Exponential {
            unit: Duration::from_secs(1),
            max: Duration::from_secs(5),
        };
        assert_eq!(backoff.delay(10), Duration::from_secs(5));
        assert_eq!(backoff.delay(40), Duration::from_secs(5));
    }

    #[test]
    fn test_fixed_and_none_delay() {
        assert_eq!(Backoff::None.delay(3), Duration::ZERO);
        assert_eq!(
            Backoff::Fixed(Duration::from_millis(250)).delay(3),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_zero_attempts_becomes_one() {
        let policy = RetryPolicy::new(0, Backoff::None, OnExhaustion::Fail);
        assert_eq!(policy.max_attempts, 1);
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_errors() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(5, Backoff::None, OnExhaustion::Fail);

        let result = policy
            .execute("flaky", |_| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err(ShipStationError::Timeout("slow".to_string()).into())
                    } else {
                        Ok(n)
                    }
                }
            })
            .await
            .unwrap();

        assert_eq!(result, Some(2));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_skip_on_exhaustion_returns_none() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(5, Backoff::None, OnExhaustion::Skip);

        let result: Option<()> = policy
            .execute("always failing", |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(ShipStationError::ConnectionFailed("down".to_string()).into()) }
            })
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_fail_on_exhaustion_returns_last_error() {
        let policy = RetryPolicy::new(2, Backoff::None, OnExhaustion::Fail);

        let result: Result<Option<()>> = policy
            .execute("always failing", |attempt| async move {
                Err(ShipStationError::ServerError {
                    status: 503,
                    message: format!("attempt {attempt}"),
                }
                .into())
            })
            .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("attempt 1"));
    }

    #[tokio::test]
    async fn test_rejected_values_are_retried() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(4, Backoff::None, OnExhaustion::Skip);

        let result = policy
            .execute_until(
                "eventually non-empty",
                |_| {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    async move { Ok(if n < 3 { vec![] } else { vec![n] }) }
                },
                |v: &Vec<u32>| !v.is_empty(),
            )
            .await
            .unwrap();

        assert_eq!(result, Some(vec![3]));
    }

    #[tokio::test]
    async fn test_non_retryable_error_stops_early() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::new(5, Backoff::None, OnExhaustion::Fail);

        let result: Result<Option<()>> = policy
            .execute("bad credentials", |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(ShipStationError::AuthenticationFailed("401".to_string()).into()) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_non_retryable_error_not_skipped() {
        let policy = RetryPolicy::new(5, Backoff::None, OnExhaustion::Skip);

        let result: Result<Option<()>> = policy
            .execute("bad credentials", |_| async {
                Err(ShipStationError::AuthenticationFailed("403".to_string()).into())
            })
            .await;

        assert!(matches!(
            result,
            Err(ShipexError::ShipStation(ShipStationError::AuthenticationFailed(_)))
        ));
    }

    #[test]
    fn test_policies_from_default_config() {
        let policies = RetryPolicies::from_config(&RetryConfig::default());

        assert_eq!(policies.shipments.max_attempts, 5);
        assert_eq!(policies.shipments.backoff, Backoff::None);
        assert_eq!(policies.shipments.on_exhaustion, OnExhaustion::Skip);

        assert_eq!(policies.order_lookup.max_attempts, 5);
        assert_eq!(policies.order_lookup.backoff.delay(2), Duration::from_secs(4));
        assert_eq!(policies.order_lookup.on_exhaustion, OnExhaustion::Skip);

        assert_eq!(policies.request.on_exhaustion, OnExhaustion::Fail);
    }
}
