// ABOUTME: Fleet core: instances, filtering, selection, confirmation, reconciliation.
// ABOUTME: Exports the domain model and the four core engines.

mod collection;
mod confirm;
mod filter;
mod instance;
mod reconcile;
mod selector;

pub use collection::InstanceCollection;
pub use confirm::{
    confirm, confirm_with_retries, ConfirmBudget, ConfirmError, ConfirmHandler, RetriesExhausted,
    RetryBudget,
};
pub use filter::{Filter, MatchMode};
pub use instance::{Address, Instance, InstanceStatus, Visibility};
pub use reconcile::{AssignOutcome, AssignedIp, ReconcileError, Reconciler};
pub use selector::{destroyable_instances, Selector, IDLE_KEY};
