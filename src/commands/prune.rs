// ABOUTME: Prune command implementation.
// ABOUTME: Destroys instances a completed rollover left behind.

use flotilla::config::Config;
use flotilla::error::Result;
use flotilla::fleet::{
    destroyable_instances, Instance, InstanceCollection, ReconcileError, Reconciler, Selector,
};
use flotilla::output::Output;
use flotilla::provider::{InstanceOps, StateOps};
use flotilla::types::FleetTag;

use super::client::connect;

/// Destroy expired fleet members (default), or idle non-IP-holders with
/// `idle`. Requires a live floating IP assignment as the witness that a
/// rollover actually happened.
pub async fn prune(config: Config, idle: bool, dry_run: bool, output: &mut Output) -> Result<()> {
    output.start_timer();
    let client = connect(&config)?;
    let selector = Selector::new(&client);
    let reconciler = Reconciler::new(&client, config.confirm.budget());
    let fleet_tag = FleetTag::fleet(&config.fleet);

    let assigned = reconciler
        .current_assignment(&config.fleet)
        .await?
        .ok_or(ReconcileError::NoFloatingIp)?;

    let candidates: Vec<Instance> = if idle {
        let members = selector.list_fleet(&fleet_tag).await?;
        let mut enriched = Vec::with_capacity(members.len());
        for mut instance in members {
            let state = client.instance_state(instance.id()).await?;
            instance.enrich_state(state);
            enriched.push(instance);
        }
        destroyable_instances(&InstanceCollection::from_instances(enriched), assigned.ip)
    } else {
        selector.expired_instances(&fleet_tag, &assigned.instance).await?
    };

    if candidates.is_empty() {
        output.success("Nothing to prune");
        return Ok(());
    }

    if dry_run {
        for instance in &candidates {
            output.progress(&format!(
                "Would destroy instance {} ({}, created {})",
                instance.id(),
                instance.name,
                instance.created_at.to_rfc3339()
            ));
        }
        output.success(&format!("{} instance(s) eligible", candidates.len()));
        return Ok(());
    }

    let mut destroyed = 0usize;
    for instance in &candidates {
        output.progress(&format!("  → Destroying instance {}...", instance.id()));
        match client.delete_instance(instance.id()).await {
            Ok(()) => destroyed += 1,
            Err(e) => {
                // Non-fatal: keep going, the next run picks stragglers up.
                tracing::warn!("failed to destroy instance {}: {}", instance.id(), e);
                output.warning(&format!("failed to destroy instance {}: {e}", instance.id()));
            }
        }
    }

    output.success(&format!("Destroyed {destroyed} instance(s)"));
    Ok(())
}
