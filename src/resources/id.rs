//! Type definitions for identifying resources.

use crate::OsType;
use derive_more::Display;
use std::fmt;

/// A resource identifier.
#[derive(Copy, Clone, Display, Hash, PartialEq, Eq)]
#[display(fmt = "{}({})", _0, _1)]
pub struct ResourceId(OsType, i16);

impl ResourceId {
    /// Makes a new resource identifier for the given type and number.
    pub fn new(os_type: impl Into<OsType>, id: i16) -> Self {
        Self(os_type.into(), id)
    }

    /// Gets the resource number.
    #[must_use]
    pub fn id(self) -> i16 {
        self.1
    }

    /// Gets the resource type.
    #[must_use]
    pub fn os_type(self) -> OsType {
        self.0
    }
}

impl fmt::Debug for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceId({}({}))", self.0, self.1)
    }
}
