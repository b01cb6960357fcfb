use crate::{four_character_code, OsType};
use super::ResourceId;

/// A resource loaded from a resource fork.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Resource {
    pub(super) id: ResourceId,
    pub(super) name: String,
    pub(super) attributes: u8,
    pub(super) data: Vec<u8>,
}

impl Resource {
    /// The type of the resource.
    #[must_use]
    pub fn os_type(&self) -> OsType {
        self.id.os_type()
    }

    /// The type of the resource as its four-character code.
    #[must_use]
    pub fn type_code(&self) -> String {
        four_character_code(self.id.os_type().to_u32())
    }

    /// The resource number, unique within its type.
    #[must_use]
    pub fn id(&self) -> i16 {
        self.id.id()
    }

    #[must_use]
    pub fn resource_id(&self) -> ResourceId {
        self.id
    }

    /// The name of the resource. Unnamed resources have an empty name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw attribute byte stored alongside the data offset.
    ///
    /// This value is passed through as-is and is never interpreted.
    #[must_use]
    pub fn attributes(&self) -> u8 {
        self.attributes
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the resource, returning its data.
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}
