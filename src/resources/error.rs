use crate::OsType;
use std::io;
use super::ResourceId;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    #[error("bad OSType size")]
    BadOsTypeSize,
    #[error("unknown i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("input borrow failed: {0}")]
    BorrowMutFailed(#[from] core::cell::BorrowMutError),
    #[error("i/o error reading header: {0}")]
    HeaderReadIo(io::Error),
    #[error("i/o error reading resource map: {0}")]
    MapReadIo(io::Error),
    #[error("i/o error reading type list entry {0}: {1}")]
    KindReadIo(usize, io::Error),
    #[error("i/o error reading reference list entry {1} of OSType {0}: {2}")]
    ItemReadIo(OsType, usize, io::Error),
    #[error("bad name offset ({2}) for reference list entry {1} of OSType {0}")]
    BadNameOffset(OsType, usize, i16),
    #[error("i/o error reading name of reference list entry {1} of OSType {0}: {2}")]
    NameReadIo(OsType, usize, io::Error),
    #[error("resource {1} of OSType {0} not found")]
    NotFound(OsType, usize),
    #[error("resource {0} not found")]
    NotFoundId(ResourceId),
    #[error("i/o error seeking to resource {0}: {1}")]
    SeekFailure(ResourceId, io::Error),
    #[error("i/o error reading size of resource {0}: {1}")]
    ReadSizeFailure(ResourceId, io::Error),
    #[error("bad data size ({1}) for resource {0}")]
    BadDataSize(ResourceId, i32),
    #[error("i/o error reading data of resource {0}: {1}")]
    ReadDataFailure(ResourceId, io::Error),
}
