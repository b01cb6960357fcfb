//! Reader for the resource map and resource data of a resource fork.

use byteorder::{BigEndian, ReadBytesExt};
use crate::{io::SeekExt, OsType, OsTypeReadExt, Reader, string::StringReadExt};
use std::{cell::RefCell, convert::TryFrom, io::{self, Read}};
use super::{Error, Resource, ResourceId, Result};
use tracing::{debug, trace};

/// The offset from the start of the resource map to the type list offset
/// field. This skips the copy of the header, the next map handle, the file
/// reference number, and the map attributes.
const MAP_FIELDS_OFFSET: u64 = 24;

/// The offset from the type list offset to the first type list entry.
///
/// The type list offset points at the type count field, so the entries start
/// two bytes later. Reference list offsets are relative to the type list
/// offset itself and do not get this adjustment.
const KIND_LIST_ADJUST: u64 = 2;
const KIND_ENTRY_SIZE: u64 = 8;
const ITEM_ENTRY_SIZE: u64 = 12;

const NO_NAME: i16 = -1;
const OFFSET_BITS: u32 = 24;
const OFFSET_MASK: u32 = (1 << OFFSET_BITS) - 1;

/// A Macintosh Resource File Format reader.
///
/// The resource map is read once when the `File` is created. Resource data is
/// read from the owned stream each time it is requested and is never cached.
#[derive(Debug)]
pub struct File<T: Reader> {
    input: RefCell<T>,
    kinds: Vec<ResourceKind>,
}

#[derive(Debug)]
struct Header {
    data_offset: u32,
    map_offset: u32,
    data_size: u32,
    map_size: u32,
}

#[derive(Debug)]
struct MapHeader {
    type_list_offset: u16,
    name_list_offset: u16,
    count: usize,
}

#[derive(Debug)]
struct ResourceKind {
    kind: OsType,
    resources: Vec<ResourceItem>,
}

#[derive(Debug)]
struct ResourceItem {
    id: i16,
    name: String,
    attributes: u8,
    data_offset: u64,
}

/// Moves to `pos` and then runs `read`.
///
/// Every access to the input goes through here so that no read depends on
/// where a previous read left the stream.
fn read_at<T, R, F>(input: &mut T, pos: u64, read: F) -> io::Result<R>
where
    T: Reader,
    F: FnOnce(&mut T) -> io::Result<R>,
{
    input.seek_to(pos)?;
    read(input)
}

/// Reads one length-prefixed data block starting at `offset`.
fn read_data<T: Reader>(input: &mut T, id: ResourceId, offset: u64) -> Result<Vec<u8>> {
    input.seek_to(offset)
        .map_err(|error| Error::SeekFailure(id, error))?;

    let size = input.read_i32::<BigEndian>()
        .map_err(|error| Error::ReadSizeFailure(id, error))?;
    let expected = u64::try_from(size).map_err(|_| Error::BadDataSize(id, size))?;

    let mut data = Vec::new();
    input.by_ref().take(expected).read_to_end(&mut data)
        .map_err(|error| Error::ReadDataFailure(id, error))?;

    if data.len() as u64 == expected {
        Ok(data)
    } else {
        Err(Error::ReadDataFailure(id, io::Error::from(io::ErrorKind::UnexpectedEof)))
    }
}

impl<T: Reader> File<T> {
    /// Makes a new `File` from a stream, reading its resource map.
    ///
    /// Offsets are absolute, so the stream should start at the first byte of
    /// the resource fork.
    pub fn new(mut input: T) -> Result<Self> {
        let header = read_at(&mut input, 0, |input| Ok(Header {
            data_offset: input.read_u32::<BigEndian>()?,
            map_offset: input.read_u32::<BigEndian>()?,
            data_size: input.read_u32::<BigEndian>()?,
            map_size: input.read_u32::<BigEndian>()?,
        })).map_err(Error::HeaderReadIo)?;

        debug!(
            data_offset = header.data_offset,
            map_offset = header.map_offset,
            data_size = header.data_size,
            map_size = header.map_size,
            "read resource fork header"
        );

        let map_offset = u64::from(header.map_offset);
        let map = read_at(&mut input, map_offset + MAP_FIELDS_OFFSET, |input| Ok(MapHeader {
            type_list_offset: input.read_u16::<BigEndian>()?,
            name_list_offset: input.read_u16::<BigEndian>()?,
            count: usize::from(input.read_u16::<BigEndian>()?.wrapping_add(1)),
        })).map_err(Error::MapReadIo)?;

        debug!(?map, "read resource map header");

        let type_list_pos = map_offset + u64::from(map.type_list_offset);
        let name_list_pos = map_offset + u64::from(map.name_list_offset);
        let data_offset = u64::from(header.data_offset);

        let mut kinds = Vec::<ResourceKind>::with_capacity(map.count);
        for kind_index in 0..map.count {
            let entry_pos = type_list_pos + KIND_LIST_ADJUST + kind_index as u64 * KIND_ENTRY_SIZE;
            let (kind, count, reference_list_offset) = read_at(&mut input, entry_pos, |input| Ok((
                input.read_os_type::<BigEndian>()?,
                usize::from(input.read_u16::<BigEndian>()?.wrapping_add(1)),
                input.read_u16::<BigEndian>()?,
            ))).map_err(|error| Error::KindReadIo(kind_index, error))?;

            debug!(%kind, count, reference_list_offset, "reading reference list");

            let reference_list_pos = type_list_pos + u64::from(reference_list_offset);
            let mut resources = Vec::new();
            for item_index in 0..count {
                let item_pos = reference_list_pos + item_index as u64 * ITEM_ENTRY_SIZE;
                let (id, name_offset, packed_offset) = read_at(&mut input, item_pos, |input| Ok((
                    input.read_i16::<BigEndian>()?,
                    input.read_i16::<BigEndian>()?,
                    input.read_u32::<BigEndian>()?,
                ))).map_err(|error| Error::ItemReadIo(kind, item_index, error))?;

                let name = if name_offset == NO_NAME {
                    String::new()
                } else {
                    let name_pos = i64::try_from(name_list_pos).ok()
                        .and_then(|pos| u64::try_from(pos + i64::from(name_offset)).ok())
                        .ok_or(Error::BadNameOffset(kind, item_index, name_offset))?;
                    read_at(&mut input, name_pos, |input| input.read_pascal_str())
                        .map_err(|error| Error::NameReadIo(kind, item_index, error))?
                };

                let item = ResourceItem {
                    id,
                    name,
                    attributes: (packed_offset >> OFFSET_BITS) as u8,
                    data_offset: data_offset + u64::from(packed_offset & OFFSET_MASK),
                };

                trace!(?item, "read reference");
                resources.push(item);
            }

            // A repeated type code replaces the earlier entry rather than
            // adding a second bucket
            if let Some(existing) = kinds.iter_mut().find(|existing| existing.kind == kind) {
                existing.resources = resources;
            } else {
                kinds.push(ResourceKind { kind, resources });
            }
        }

        Ok(Self {
            input: RefCell::new(input),
            kinds,
        })
    }

    /// Returns the number of resources with the given [`OsType`].
    pub fn count(&self, os_type: impl Into<OsType>) -> usize {
        self.find_kind(os_type).map_or(0, |kind| kind.resources.len())
    }

    /// Returns whether a resource with the given ID exists.
    pub fn contains(&self, id: impl Into<ResourceId>) -> bool {
        self.find_item(id.into()).is_some()
    }

    /// Loads the resource at the given position within its type.
    ///
    /// This returns `None` both when there is no such resource and when its
    /// data cannot be read. Use [`load`](Self::load) to find out why.
    pub fn get(&self, os_type: impl Into<OsType>, index: usize) -> Option<Resource> {
        self.load(os_type, index)
            .map_err(|error| debug!(%error, "resource load failed"))
            .ok()
    }

    /// Loads the resource with the given ID.
    pub fn get_by_id(&self, id: impl Into<ResourceId>) -> Result<Resource> {
        let id = id.into();
        let item = self.find_item(id).ok_or(Error::NotFoundId(id))?;
        self.load_item(id.os_type(), item)
    }

    /// Loads the resource at the given position within its type.
    pub fn load(&self, os_type: impl Into<OsType>, index: usize) -> Result<Resource> {
        let os_type = os_type.into();
        let item = self.find_kind(os_type)
            .and_then(|kind| kind.resources.get(index))
            .ok_or(Error::NotFound(os_type, index))?;
        self.load_item(os_type, item)
    }

    /// Returns the [`ResourceId`] of a resource with the given type and index.
    pub fn id_of_index(&self, os_type: impl Into<OsType>, index: usize) -> Option<ResourceId> {
        let os_type = os_type.into();
        self.find_kind(os_type)
            .and_then(|kind| kind.resources.get(index))
            .map(|res| ResourceId::new(os_type, res.id))
    }

    /// Returns the position of the resource with the given ID within its type.
    pub fn index_of_id(&self, id: impl Into<ResourceId>) -> Option<usize> {
        let id = id.into();
        self.find_kind(id.os_type())
            .and_then(|kind| kind.resources.iter().position(|res| res.id == id.id()))
    }

    /// Returns the [`ResourceId`] of the named resource with the given
    /// [`OsType`].
    pub fn id_of_name(&self, os_type: impl Into<OsType>, name: &str) -> Option<ResourceId> {
        let os_type = os_type.into();
        self.find_kind(os_type)
            .and_then(|kind| kind.resources.iter().find(|res| !res.name.is_empty() && res.name == name))
            .map(|res| ResourceId::new(os_type, res.id))
    }

    /// Consumes the `File`, returning the wrapped reader.
    pub fn into_inner(self) -> T {
        self.input.into_inner()
    }

    /// Returns an iterator over all resource IDs.
    pub fn iter(&self) -> impl Iterator<Item = ResourceId> + '_ {
        self.kinds.iter().flat_map(|k| {
            let os_type = k.kind;
            k.resources.iter().map(move |r| ResourceId::new(os_type, r.id))
        })
    }

    /// Returns an iterator over all resource IDs with the given type.
    pub fn iter_kind(&self, os_type: impl Into<OsType>) -> impl Iterator<Item = ResourceId> + '_ {
        let os_type = os_type.into();
        self.find_kind(os_type)
            .into_iter()
            .flat_map(move |kind| kind.resources.iter().map(move |r| ResourceId::new(os_type, r.id)))
    }

    /// Returns an iterator over every resource type in the order they appear
    /// in the type list.
    pub fn kinds(&self) -> impl Iterator<Item = OsType> + '_ {
        self.kinds.iter().map(|kind| kind.kind)
    }

    fn find_item(&self, id: ResourceId) -> Option<&ResourceItem> {
        self.find_kind(id.os_type())
            .and_then(|kind| {
                kind.resources.iter().find(|&res| res.id == id.id())
            })
    }

    fn find_kind(&self, os_type: impl Into<OsType>) -> Option<&ResourceKind> {
        let os_type = os_type.into();
        self.kinds.iter().find(move |&kind| kind.kind == os_type)
    }

    fn load_item(&self, os_type: OsType, item: &ResourceItem) -> Result<Resource> {
        let id = ResourceId::new(os_type, item.id);
        let mut input = self.input.try_borrow_mut()?;
        let data = read_data(&mut *input, id, item.data_offset)?;
        Ok(Resource {
            id,
            name: item.name.clone(),
            attributes: item.attributes,
            data,
        })
    }
}
