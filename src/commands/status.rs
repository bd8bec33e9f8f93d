// ABOUTME: Status command implementation.
// ABOUTME: Shows the canonical instance and the current floating IP assignment.

use serde::Serialize;
use std::net::IpAddr;

use flotilla::config::Config;
use flotilla::error::Result;
use flotilla::fleet::{Reconciler, Selector};
use flotilla::output::Output;

use super::client::connect;

#[derive(Serialize)]
struct StatusReport {
    fleet: String,
    image: String,
    #[serde(rename = "canonical-instance")]
    canonical_instance: Option<u64>,
    #[serde(rename = "canonical-status")]
    canonical_status: Option<String>,
    ip: Option<IpAddr>,
    #[serde(rename = "assigned-instance")]
    assigned_instance: Option<u64>,
}

/// Show the fleet's canonical instance and IP assignment.
pub async fn status(config: Config, output: &Output) -> Result<()> {
    let client = connect(&config)?;
    let selector = Selector::new(&client);
    let reconciler = Reconciler::new(&client, config.confirm.budget());

    let canonical = selector
        .canonical_instance(&config.fleet, &config.image)
        .await?;
    let assigned = reconciler.current_assignment(&config.fleet).await?;

    let report = StatusReport {
        fleet: config.fleet.to_string(),
        image: config.image.to_string(),
        canonical_instance: canonical.as_ref().map(|i| i.id().value()),
        canonical_status: canonical.as_ref().map(|i| i.status.to_string()),
        ip: assigned.as_ref().map(|a| a.ip),
        assigned_instance: assigned.as_ref().map(|a| a.instance.id().value()),
    };

    let mut lines = vec![
        format!("Fleet: {}", report.fleet),
        format!("Image: {}", report.image),
    ];
    match &canonical {
        Some(instance) => lines.push(format!(
            "Canonical instance: {} ({}, created {})",
            instance.id(),
            instance.status,
            instance.created_at.to_rfc3339()
        )),
        None => lines.push("Canonical instance: none".to_string()),
    }
    match &assigned {
        Some(a) => lines.push(format!(
            "Floating IP: {} -> instance {}",
            a.ip,
            a.instance.id()
        )),
        None => lines.push("Floating IP: none".to_string()),
    }

    output.listing(&report, &lines);
    Ok(())
}
