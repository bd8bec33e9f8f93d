// ABOUTME: Assign and create-ip command implementations.
// ABOUTME: Runs the floating IP reconciler and reports the outcome record.

use std::time::Duration;

use flotilla::config::Config;
use flotilla::error::Result;
use flotilla::fleet::{ConfirmBudget, Reconciler};
use flotilla::output::Output;

use super::client::connect;

/// Ensure the fleet's floating IP points at the canonical instance.
pub async fn assign(
    config: Config,
    timeout: Option<u64>,
    delay: Option<u64>,
    output: &mut Output,
) -> Result<()> {
    output.start_timer();
    let client = connect(&config)?;
    let budget = budget_with_overrides(&config, timeout, delay);
    let reconciler = Reconciler::new(&client, budget);

    output.progress(&format!(
        "Reconciling floating IP for fleet {} ({})...",
        config.fleet, config.image
    ));

    let outcome = reconciler.ensure_assigned(&config.fleet, &config.image).await?;
    output.outcome(&outcome);
    Ok(())
}

/// Create a floating IP for a brand-new fleet, refusing when one exists.
pub async fn create_ip(
    config: Config,
    timeout: Option<u64>,
    delay: Option<u64>,
    output: &mut Output,
) -> Result<()> {
    output.start_timer();
    let client = connect(&config)?;
    let budget = budget_with_overrides(&config, timeout, delay);
    let reconciler = Reconciler::new(&client, budget);

    output.progress(&format!(
        "Creating floating IP for fleet {} ({})...",
        config.fleet, config.image
    ));

    let outcome = reconciler.create_only(&config.fleet, &config.image).await?;
    output.outcome(&outcome);
    Ok(())
}

/// Apply CLI overrides (whole seconds) on top of the configured budget.
fn budget_with_overrides(
    config: &Config,
    timeout: Option<u64>,
    delay: Option<u64>,
) -> ConfirmBudget {
    let base = config.confirm.budget();
    ConfirmBudget::new(
        timeout.map(Duration::from_secs).unwrap_or(base.timeout),
        delay.map(Duration::from_secs).unwrap_or(base.delay),
    )
}
