// ABOUTME: Command module aggregator for the flotilla CLI.
// ABOUTME: Re-exports the subcommand handlers.

mod assign;
mod client;
mod list;
mod prune;
mod status;
mod wait;

pub use assign::{assign, create_ip};
pub use list::list;
pub use prune::prune;
pub use status::status;
pub use wait::wait;
