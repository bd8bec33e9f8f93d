// ABOUTME: Core domain types shared across modules.
// ABOUTME: Validated newtypes and phantom-typed identifiers.

mod fleet_name;
mod fleet_tag;
mod id;
mod image_id;
mod state;

pub use fleet_name::{FleetName, FleetNameError};
pub use fleet_tag::FleetTag;
pub use id::{ActionId, ActionMarker, Id, InstanceId, InstanceMarker};
pub use image_id::{ImageId, ParseImageIdError};
pub use state::{FieldValue, Scalar, StateMap};
