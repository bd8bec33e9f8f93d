// ABOUTME: Confirmation and readiness budget configuration.
// ABOUTME: Defines timeout/delay and retry/delay pairs with sensible defaults.

use serde::Deserialize;
use std::time::Duration;

use crate::fleet::{ConfirmBudget, RetryBudget};

/// Budget for assignment confirmation: total wall-clock timeout and
/// fixed inter-attempt delay. The two are independent inputs, not
/// implicitly related.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmConfig {
    #[serde(default = "default_confirm_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    #[serde(default = "default_confirm_delay", with = "humantime_serde")]
    pub delay: Duration,
}

impl ConfirmConfig {
    pub fn budget(&self) -> ConfirmBudget {
        ConfirmBudget::new(self.timeout, self.delay)
    }
}

impl Default for ConfirmConfig {
    fn default() -> Self {
        Self {
            timeout: default_confirm_timeout(),
            delay: default_confirm_delay(),
        }
    }
}

fn default_confirm_timeout() -> Duration {
    Duration::from_secs(120)
}

fn default_confirm_delay() -> Duration {
    Duration::from_secs(5)
}

/// Budget for readiness confirmation: attempt count and per-attempt
/// delay instead of a time budget.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadyConfig {
    #[serde(default = "default_ready_retries")]
    pub retries: u32,

    #[serde(default = "default_ready_delay", with = "humantime_serde")]
    pub delay: Duration,
}

impl ReadyConfig {
    pub fn budget(&self) -> RetryBudget {
        RetryBudget::new(self.retries, self.delay)
    }
}

impl Default for ReadyConfig {
    fn default() -> Self {
        Self {
            retries: default_ready_retries(),
            delay: default_ready_delay(),
        }
    }
}

fn default_ready_retries() -> u32 {
    20
}

fn default_ready_delay() -> Duration {
    Duration::from_secs(3)
}
