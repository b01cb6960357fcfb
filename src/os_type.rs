//! Type definitions for four-character resource type codes.

use byteorder::ByteOrder;
use crate::resources::Error;
use std::{char, convert::TryFrom, fmt, io};

/// Converts a big-endian 32-bit type code into its four-character textual
/// form.
///
/// Each byte becomes one character with the same code point, so bytes outside
/// the ASCII range are preserved rather than replaced.
#[must_use]
pub fn four_character_code(code: u32) -> String {
    code.to_be_bytes().iter().copied().map(char::from).collect()
}

/// A resource type identifier.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct OsType([u8; 4]);

impl OsType {
    /// Makes a new `OsType`.
    #[must_use]
    pub fn new(os_type: impl Into<[u8; 4]>) -> Self {
        Self(os_type.into())
    }

    /// Makes a new `OsType` from an array.
    ///
    /// Unlike [`new`](Self::new), this can be used in a `const` context.
    #[must_use]
    pub const fn from_raw(os_type: [u8; 4]) -> Self {
        Self(os_type)
    }

    /// Gets the underlying byte view of the `OsType`.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// Gets the big-endian integer form of the `OsType`.
    #[must_use]
    pub fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    #[inline]
    fn fmt_write(self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&four_character_code(self.to_u32()))
    }
}

impl std::str::FromStr for OsType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut value = [ 0; 4 ];
        let mut chars = s.chars();
        for byte in &mut value {
            let c = chars.next().ok_or(Error::BadOsTypeSize)?;
            *byte = u8::try_from(u32::from(c)).map_err(|_| Error::BadOsTypeSize)?;
        }

        if chars.next().is_some() {
            return Err(Error::BadOsTypeSize);
        }

        Ok(Self(value))
    }
}

impl From<&[u8; 4]> for OsType {
    fn from(value: &[u8; 4]) -> Self {
        Self(*value)
    }
}

impl From<u32> for OsType {
    fn from(value: u32) -> Self {
        Self(value.to_be_bytes())
    }
}

impl Default for OsType {
    fn default() -> Self {
        Self::new([0; 4])
    }
}

impl fmt::Display for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_write(f)
    }
}

impl fmt::Debug for OsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OSType(")?;
        self.fmt_write(f)?;
        write!(f, ")")
    }
}

pub trait OsTypeReadExt: io::Read {
    #[inline]
    fn read_os_type<T: ByteOrder>(&mut self) -> io::Result<OsType> {
        let mut buf = [ 0; 4 ];
        self.read_exact(&mut buf)?;
        Ok(T::read_u32(&buf).into())
    }
}

impl<T: io::Read + ?Sized> OsTypeReadExt for T {}
