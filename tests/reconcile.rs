// ABOUTME: Integration tests for floating IP reconciliation.
// ABOUTME: Covers create, no-op, reassign, timeouts, and the create-only entry point.

mod support;

use std::time::Duration;

use flotilla::fleet::{AssignOutcome, ConfirmBudget, ReconcileError, Reconciler};
use flotilla::provider::ActionStatus;
use flotilla::types::{FleetName, ImageId, InstanceId};

use support::{instance_record, Call, FakeProvider};

const FLEET_TAG: &str = "api";
const IDENTITY_TAG: &str = "api-ubuntu-24-04-x64";

fn fleet() -> FleetName {
    FleetName::new("api").unwrap()
}

fn image() -> ImageId {
    ImageId::parse("ubuntu-24-04-x64").unwrap()
}

fn fast_budget() -> ConfirmBudget {
    ConfirmBudget::new(Duration::from_millis(50), Duration::from_millis(1))
}

fn zero_budget() -> ConfirmBudget {
    ConfirmBudget::new(Duration::ZERO, Duration::ZERO)
}

#[tokio::test]
async fn reassigns_ip_from_old_to_newest_instance() {
    let provider = FakeProvider::new()
        .with_instance(instance_record(
            123,
            "2026-01-01T00:00:00Z",
            &["10.0.0.1"],
            &[FLEET_TAG, IDENTITY_TAG],
        ))
        .with_instance(instance_record(
            456,
            "2026-01-02T00:00:00Z",
            &["10.0.0.2"],
            &[FLEET_TAG, IDENTITY_TAG],
        ))
        .with_floating_ip(
            "127.0.0.200",
            Some(instance_record(
                123,
                "2026-01-01T00:00:00Z",
                &["10.0.0.1", "127.0.0.200"],
                &[FLEET_TAG, IDENTITY_TAG],
            )),
        )
        .with_action(999, ActionStatus::Completed);

    let reconciler = Reconciler::new(&provider, fast_budget());
    let outcome = reconciler.ensure_assigned(&fleet(), &image()).await.unwrap();

    assert_eq!(
        outcome,
        AssignOutcome::Reassigned {
            ip: "127.0.0.200".parse().unwrap(),
            source: InstanceId::new(123),
            target: InstanceId::new(456),
        }
    );
    assert!(provider
        .calls()
        .contains(&Call::ReassignFloatingIp("127.0.0.200".to_string(), 456)));
}

#[tokio::test]
async fn correctly_assigned_ip_is_a_noop_without_mutations() {
    let provider = FakeProvider::new()
        .with_instance(instance_record(
            456,
            "2026-01-02T00:00:00Z",
            &["10.0.0.2", "127.0.0.200"],
            &[FLEET_TAG, IDENTITY_TAG],
        ))
        .with_floating_ip(
            "127.0.0.200",
            Some(instance_record(
                456,
                "2026-01-02T00:00:00Z",
                &["10.0.0.2", "127.0.0.200"],
                &[FLEET_TAG, IDENTITY_TAG],
            )),
        );

    let reconciler = Reconciler::new(&provider, fast_budget());
    let outcome = reconciler.ensure_assigned(&fleet(), &image()).await.unwrap();

    assert_eq!(
        outcome,
        AssignOutcome::AlreadyAssigned {
            ip: "127.0.0.200".parse().unwrap(),
            instance: InstanceId::new(456),
        }
    );
    assert!(
        provider.mutation_calls().is_empty(),
        "no-op path must not mutate the provider"
    );
}

#[tokio::test]
async fn create_path_confirms_ip_on_target_address_list() {
    // The instance record already shows the IP the provider will hand
    // out: propagation is immediately visible to the confirmation probe.
    let provider = FakeProvider::new()
        .with_instance(instance_record(
            456,
            "2026-01-02T00:00:00Z",
            &["10.0.0.2", "203.0.113.100"],
            &[FLEET_TAG, IDENTITY_TAG],
        ))
        .with_create_ip("203.0.113.100");

    let reconciler = Reconciler::new(&provider, fast_budget());
    let outcome = reconciler.ensure_assigned(&fleet(), &image()).await.unwrap();

    assert_eq!(
        outcome,
        AssignOutcome::Created {
            ip: "203.0.113.100".parse().unwrap(),
            target: InstanceId::new(456),
        }
    );
    assert!(provider.calls().contains(&Call::CreateFloatingIp(456)));
}

#[tokio::test]
async fn create_confirmation_timeout_keeps_ip_and_target_context() {
    // The created IP never appears on the instance's address list.
    let provider = FakeProvider::new()
        .with_instance(instance_record(
            456,
            "2026-01-02T00:00:00Z",
            &["10.0.0.2"],
            &[FLEET_TAG, IDENTITY_TAG],
        ))
        .with_create_ip("203.0.113.100");

    let reconciler = Reconciler::new(&provider, zero_budget());
    let err = reconciler
        .ensure_assigned(&fleet(), &image())
        .await
        .unwrap_err();

    match err {
        ReconcileError::CreateTimedOut {
            ip,
            target,
            timeout,
        } => {
            assert_eq!(ip, "203.0.113.100".parse::<std::net::IpAddr>().unwrap());
            assert_eq!(target, InstanceId::new(456));
            assert_eq!(timeout, Duration::ZERO);
        }
        other => panic!("expected CreateTimedOut, got {other:?}"),
    }
}

#[tokio::test]
async fn reassign_confirmation_timeout_keeps_full_context() {
    // The action never leaves in-progress.
    let provider = FakeProvider::new()
        .with_instance(instance_record(
            123,
            "2026-01-01T00:00:00Z",
            &["10.0.0.1"],
            &[FLEET_TAG, IDENTITY_TAG],
        ))
        .with_instance(instance_record(
            456,
            "2026-01-02T00:00:00Z",
            &["10.0.0.2"],
            &[FLEET_TAG, IDENTITY_TAG],
        ))
        .with_floating_ip(
            "127.0.0.200",
            Some(instance_record(
                123,
                "2026-01-01T00:00:00Z",
                &["10.0.0.1", "127.0.0.200"],
                &[FLEET_TAG, IDENTITY_TAG],
            )),
        )
        .with_action(999, ActionStatus::InProgress);

    let reconciler = Reconciler::new(&provider, zero_budget());
    let err = reconciler
        .ensure_assigned(&fleet(), &image())
        .await
        .unwrap_err();

    match err {
        ReconcileError::ReassignTimedOut {
            ip,
            source_instance: source,
            target,
            timeout,
        } => {
            assert_eq!(ip, "127.0.0.200".parse::<std::net::IpAddr>().unwrap());
            assert_eq!(source, InstanceId::new(123));
            assert_eq!(target, InstanceId::new(456));
            assert_eq!(timeout, Duration::ZERO);
        }
        other => panic!("expected ReassignTimedOut, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_fleet_reports_no_instance() {
    let provider = FakeProvider::new();

    let reconciler = Reconciler::new(&provider, fast_budget());
    let err = reconciler
        .ensure_assigned(&fleet(), &image())
        .await
        .unwrap_err();

    assert!(matches!(err, ReconcileError::NoInstance));
    assert!(provider.mutation_calls().is_empty());
}

#[tokio::test]
async fn create_only_refuses_when_fleet_already_has_an_ip() {
    let provider = FakeProvider::new()
        .with_instance(instance_record(
            456,
            "2026-01-02T00:00:00Z",
            &["10.0.0.2"],
            &[FLEET_TAG, IDENTITY_TAG],
        ))
        .with_floating_ip(
            "127.0.0.200",
            Some(instance_record(
                456,
                "2026-01-02T00:00:00Z",
                &["10.0.0.2", "127.0.0.200"],
                &[FLEET_TAG, IDENTITY_TAG],
            )),
        );

    let reconciler = Reconciler::new(&provider, fast_budget());
    let err = reconciler
        .create_only(&fleet(), &image())
        .await
        .unwrap_err();

    match err {
        ReconcileError::AlreadyHasIp { ip } => {
            assert_eq!(ip, "127.0.0.200".parse::<std::net::IpAddr>().unwrap());
        }
        other => panic!("expected AlreadyHasIp, got {other:?}"),
    }
    assert!(provider.mutation_calls().is_empty());
}

#[tokio::test]
async fn create_only_bootstraps_an_empty_assignment() {
    let provider = FakeProvider::new()
        .with_instance(instance_record(
            456,
            "2026-01-02T00:00:00Z",
            &["10.0.0.2", "203.0.113.100"],
            &[FLEET_TAG, IDENTITY_TAG],
        ))
        .with_create_ip("203.0.113.100");

    let reconciler = Reconciler::new(&provider, fast_budget());
    let outcome = reconciler.create_only(&fleet(), &image()).await.unwrap();

    assert!(matches!(outcome, AssignOutcome::Created { .. }));
}

#[tokio::test]
async fn floating_ip_on_foreign_instance_is_ignored() {
    // An IP whose backing instance is outside the fleet must not count
    // as the fleet's assignment.
    let provider = FakeProvider::new()
        .with_instance(instance_record(
            456,
            "2026-01-02T00:00:00Z",
            &["10.0.0.2", "203.0.113.100"],
            &[FLEET_TAG, IDENTITY_TAG],
        ))
        .with_floating_ip(
            "198.51.100.7",
            Some(instance_record(
                77,
                "2026-01-01T00:00:00Z",
                &["10.9.9.9"],
                &["unrelated-fleet"],
            )),
        )
        .with_create_ip("203.0.113.100");

    let reconciler = Reconciler::new(&provider, fast_budget());
    let outcome = reconciler.ensure_assigned(&fleet(), &image()).await.unwrap();

    assert!(matches!(outcome, AssignOutcome::Created { .. }));
}
