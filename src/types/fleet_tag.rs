// ABOUTME: Provider tags identifying fleet membership.
// ABOUTME: Builds the plain fleet tag and the composite fleet-image identity tag.

use std::fmt;

use super::{FleetName, ImageId};

/// A provider tag used to query fleet membership.
///
/// Two forms exist: the plain fleet tag every member carries, and the
/// composite identity tag `{fleet}-{image}` that pins members to one
/// machine image. The composite form is what canonical-instance
/// selection queries, so a rollover to a new image starts an empty
/// composite fleet even while the plain fleet still has members.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FleetTag(String);

impl FleetTag {
    /// The plain tag shared by every member of the fleet.
    pub fn fleet(name: &FleetName) -> Self {
        Self(name.as_str().to_string())
    }

    /// The composite identity tag combining fleet and target image.
    pub fn identity(name: &FleetName, image: &ImageId) -> Self {
        Self(format!("{}-{}", name.as_str(), image.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FleetTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
