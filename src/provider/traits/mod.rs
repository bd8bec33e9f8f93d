// ABOUTME: Composable capability traits for cloud providers.
// ABOUTME: Defines InstanceOps, StateOps, FloatingIpOps, ActionOps.

mod actions;
mod floating_ips;
mod instances;
mod shared_types;

pub use actions::ActionOps;
pub use floating_ips::FloatingIpOps;
pub use instances::{InstanceOps, StateOps};
pub use shared_types::*;
