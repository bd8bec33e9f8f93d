// ABOUTME: List command implementation.
// ABOUTME: Lists fleet instances through the filter engine, state-enriched.

use serde::Serialize;

use flotilla::config::Config;
use flotilla::error::{Error, Result};
use flotilla::fleet::{Filter, Instance, InstanceCollection, Selector};
use flotilla::output::Output;
use flotilla::provider::StateOps;
use flotilla::types::{FleetTag, Scalar, StateMap};

use super::client::connect;

#[derive(Serialize)]
struct ListedInstance {
    id: u64,
    name: String,
    status: String,
    #[serde(rename = "created-at")]
    created_at: String,
    ips: Vec<String>,
    state: StateMap,
}

impl ListedInstance {
    fn from_instance(instance: &Instance) -> Self {
        Self {
            id: instance.id().value(),
            name: instance.name.clone(),
            status: instance.status.to_string(),
            created_at: instance.created_at.to_rfc3339(),
            ips: instance
                .addresses
                .iter()
                .map(|a| a.ip.to_string())
                .collect(),
            state: instance.state().clone(),
        }
    }
}

/// List fleet instances matching the given filters.
pub async fn list(
    config: Config,
    filter_specs: Vec<String>,
    exclude_specs: Vec<String>,
    output: &Output,
) -> Result<()> {
    let mut filters = Vec::new();
    for spec in &filter_specs {
        let (field, value) = parse_filter_spec(spec)?;
        filters.push(Filter::include(field, value));
    }
    for spec in &exclude_specs {
        let (field, value) = parse_filter_spec(spec)?;
        filters.push(Filter::exclude(field, value));
    }

    let client = connect(&config)?;
    let selector = Selector::new(&client);
    let fleet_tag = FleetTag::fleet(&config.fleet);

    let members = selector.list_fleet(&fleet_tag).await?;

    // Enrich with state before filtering; state-map fields are only
    // meaningful on enriched instances.
    let mut enriched = Vec::with_capacity(members.len());
    for mut instance in members {
        let state = client.instance_state(instance.id()).await?;
        instance.enrich_state(state);
        enriched.push(instance);
    }
    let mut members = InstanceCollection::from_instances(enriched);

    for filter in &filters {
        members = members.filtered(filter);
    }

    let records: Vec<ListedInstance> = members.iter().map(ListedInstance::from_instance).collect();
    let lines: Vec<String> = members
        .iter()
        .map(|i| {
            format!(
                "{}  {}  {}  {}",
                i.id(),
                i.status,
                i.created_at.to_rfc3339(),
                i.name
            )
        })
        .collect();

    if lines.is_empty() {
        output.progress("No instances matched");
    }
    output.listing(&records, &lines);
    Ok(())
}

/// Parse a `key=value` filter specification from the CLI.
fn parse_filter_spec(spec: &str) -> Result<(String, Scalar)> {
    let (field, raw) = spec
        .split_once('=')
        .ok_or_else(|| Error::InvalidConfig(format!("invalid filter '{spec}' (expected key=value)")))?;

    if field.is_empty() {
        return Err(Error::InvalidConfig(format!(
            "invalid filter '{spec}' (empty field name)"
        )));
    }

    Ok((field.to_string(), parse_scalar(raw)))
}

/// Interpret a filter value: bool, then integer, then float, then string.
fn parse_scalar(raw: &str) -> Scalar {
    match raw {
        "true" => return Scalar::Bool(true),
        "false" => return Scalar::Bool(false),
        _ => {}
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Scalar::Int(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Scalar::Float(f);
    }
    Scalar::Str(raw.to_string())
}
