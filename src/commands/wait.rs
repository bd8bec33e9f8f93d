// ABOUTME: Wait command implementation.
// ABOUTME: Counted-retry readiness gate on the canonical instance becoming active.

use async_trait::async_trait;
use std::time::Duration;

use flotilla::config::Config;
use flotilla::error::{Error, Result};
use flotilla::fleet::{confirm_with_retries, ConfirmHandler, Instance, RetryBudget, Selector};
use flotilla::output::Output;
use flotilla::provider::{InstanceOps, ProviderError};
use flotilla::types::{FleetName, ImageId};

use super::client::connect;

/// Readiness handler: re-resolve the canonical instance until it
/// reports active. A provider hiccup on one probe is a failed attempt,
/// not a fatal error.
struct CanonicalActive<'a, P: ?Sized> {
    provider: &'a P,
    fleet: &'a FleetName,
    image: &'a ImageId,
}

#[async_trait]
impl<P: InstanceOps + ?Sized> ConfirmHandler for CanonicalActive<'_, P> {
    type Evidence = Option<Instance>;

    async fn probe(&self) -> std::result::Result<Self::Evidence, ProviderError> {
        Selector::new(self.provider)
            .canonical_instance(self.fleet, self.image)
            .await
    }

    fn is_done(&self, evidence: &Self::Evidence) -> bool {
        evidence.as_ref().is_some_and(|i| i.status.is_active())
    }
}

/// Block until the fleet's canonical instance reports active.
pub async fn wait(
    config: Config,
    retries: Option<u32>,
    delay: Option<u64>,
    output: &mut Output,
) -> Result<()> {
    output.start_timer();
    let client = connect(&config)?;

    let base = config.ready.budget();
    let budget = RetryBudget::new(
        retries.unwrap_or(base.attempts),
        delay.map(Duration::from_secs).unwrap_or(base.delay),
    );

    output.progress(&format!(
        "Waiting for the canonical instance of fleet {} ({})...",
        config.fleet, config.image
    ));

    let handler = CanonicalActive {
        provider: &client,
        fleet: &config.fleet,
        image: &config.image,
    };

    match confirm_with_retries(&handler, budget).await {
        Ok(Some(instance)) => {
            output.success(&format!("Instance {} is active", instance.id()));
            Ok(())
        }
        // is_done never accepts an empty fleet, so this arm is only
        // reachable if the decider changes; treat it as not ready.
        Ok(None) => Err(Error::NotReady(flotilla::fleet::RetriesExhausted {
            attempts: budget.attempts,
            last_error: None,
        })),
        Err(e) => Err(Error::NotReady(e)),
    }
}
