// ABOUTME: Bounded retry engine turning asynchronous provider actions into synchronous results.
// ABOUTME: Time-budget and counted-attempt variants over a probe/decider pair.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::provider::ProviderError;

/// A probe/decider pair for one awaited condition.
///
/// Implemented per call-site as a concrete struct holding its captured
/// context, never as an anonymous closure: the captured state is then
/// visible and the handler is testable on its own.
#[async_trait]
pub trait ConfirmHandler: Send + Sync {
    type Evidence: Send;

    /// Perform or re-check the action, returning its current result.
    async fn probe(&self) -> Result<Self::Evidence, ProviderError>;

    /// Decide whether the probe's result means the condition is reached.
    /// "Not yet" vs "unrecoverable" is this decider's judgment; the
    /// engine only distinguishes acceptance from the budget running out.
    fn is_done(&self, evidence: &Self::Evidence) -> bool;
}

/// Wall-clock budget for the time-based variant.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmBudget {
    pub timeout: Duration,
    pub delay: Duration,
}

impl ConfirmBudget {
    pub fn new(timeout: Duration, delay: Duration) -> Self {
        Self { timeout, delay }
    }

    pub fn from_secs(timeout: u64, delay: u64) -> Self {
        Self::new(Duration::from_secs(timeout), Duration::from_secs(delay))
    }
}

/// Attempt-count budget for the counted variant.
#[derive(Debug, Clone, Copy)]
pub struct RetryBudget {
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryBudget {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }

    pub fn from_secs(attempts: u32, delay: u64) -> Self {
        Self::new(attempts, Duration::from_secs(delay))
    }
}

/// Failure of the time-budget variant.
#[derive(Debug, Error)]
pub enum ConfirmError {
    /// The decider never accepted within the budget. Not a provider
    /// error: the action may still complete later.
    #[error("confirmation timed out after {}s", waited.as_secs())]
    TimedOut { waited: Duration },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Failure of the counted variant: every attempt was spent without the
/// decider accepting. Carries the last probe error, if any attempt
/// raised one, for the caller to surface.
#[derive(Debug, Error)]
#[error("gave up after {attempts} attempts")]
pub struct RetriesExhausted {
    pub attempts: u32,
    #[source]
    pub last_error: Option<ProviderError>,
}

/// Run the probe until the decider accepts or the time budget elapses.
///
/// The probe always runs at least once, even with a zero budget.
/// Elapsed time accumulates the requested delay per iteration, so the
/// attempt count is bounded by timeout/delay + 1. Probe errors
/// propagate unchanged; transient-error tolerance belongs to
/// `confirm_with_retries`.
pub async fn confirm<H: ConfirmHandler>(
    handler: &H,
    budget: ConfirmBudget,
) -> Result<H::Evidence, ConfirmError> {
    let mut waited = Duration::ZERO;

    loop {
        let evidence = handler.probe().await?;
        if handler.is_done(&evidence) {
            return Ok(evidence);
        }

        if waited >= budget.timeout {
            return Err(ConfirmError::TimedOut {
                waited: budget.timeout,
            });
        }

        // A zero delay can never accumulate elapsed time; degrade to a
        // single attempt instead of spinning.
        if budget.delay.is_zero() {
            return Err(ConfirmError::TimedOut {
                waited: budget.timeout,
            });
        }

        tokio::time::sleep(budget.delay).await;
        waited += budget.delay;
    }
}

/// Run the probe up to `attempts` times, sleeping `delay` between tries.
///
/// A probe error on a non-final attempt counts as "not yet done" and is
/// recorded; on the final attempt the recorded non-acceptance is the
/// overall failure. A zero attempt count still probes exactly once.
pub async fn confirm_with_retries<H: ConfirmHandler>(
    handler: &H,
    budget: RetryBudget,
) -> Result<H::Evidence, RetriesExhausted> {
    let attempts = budget.attempts.max(1);
    let mut last_error = None;

    for attempt in 1..=attempts {
        match handler.probe().await {
            Ok(evidence) => {
                if handler.is_done(&evidence) {
                    return Ok(evidence);
                }
                last_error = None;
            }
            Err(e) => {
                last_error = Some(e);
            }
        }

        if attempt < attempts {
            tokio::time::sleep(budget.delay).await;
        }
    }

    Err(RetriesExhausted {
        attempts,
        last_error,
    })
}
