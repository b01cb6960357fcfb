#![allow(dead_code)]

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

pub const DATA_OFFSET: u32 = 256;
const MAP_HEADER_SIZE: u16 = 28;

/// One resource to write into a test resource fork.
pub struct Entry<'a> {
    pub id: i16,
    pub name: Option<&'a [u8]>,
    pub attributes: u8,
    pub data: &'a [u8],
}

impl<'a> Entry<'a> {
    pub fn new(id: i16, data: &'a [u8]) -> Self {
        Self { id, name: None, attributes: 0, data }
    }

    pub fn named(id: i16, name: &'a [u8], data: &'a [u8]) -> Self {
        Self { id, name: Some(name), attributes: 0, data }
    }

    pub fn with_attributes(mut self, attributes: u8) -> Self {
        self.attributes = attributes;
        self
    }
}

/// Builds a resource fork in the classic layout: a 256-byte header area, the
/// resource data, then the resource map.
pub fn build_fork(kinds: &[(&[u8; 4], Vec<Entry<'_>>)]) -> Vec<u8> {
    let mut data = Vec::new();
    let mut names = Vec::new();
    let mut references = Vec::new();
    let mut type_list = Vec::new();

    let num_kinds = kinds.len() as u16;
    let num_refs = kinds.iter().map(|(_, entries)| entries.len()).sum::<usize>() as u16;
    let type_list_size = 2 + 8 * num_kinds;

    type_list.write_u16::<BigEndian>(num_kinds.wrapping_sub(1)).unwrap();
    for (os_type, entries) in kinds {
        let reference_list_offset = type_list_size + references.len() as u16;
        type_list.extend_from_slice(&os_type[..]);
        type_list.write_u16::<BigEndian>((entries.len() as u16).wrapping_sub(1)).unwrap();
        type_list.write_u16::<BigEndian>(reference_list_offset).unwrap();

        for entry in entries {
            let name_offset = match entry.name {
                Some(name) => {
                    let offset = names.len() as i16;
                    names.push(name.len() as u8);
                    names.extend_from_slice(name);
                    offset
                },
                None => -1,
            };

            let data_offset = data.len() as u32;
            data.write_u32::<BigEndian>(entry.data.len() as u32).unwrap();
            data.extend_from_slice(entry.data);

            references.write_i16::<BigEndian>(entry.id).unwrap();
            references.write_i16::<BigEndian>(name_offset).unwrap();
            references.write_u32::<BigEndian>(u32::from(entry.attributes) << 24 | data_offset).unwrap();
            references.write_u32::<BigEndian>(0).unwrap();
        }
    }

    let name_list_offset = MAP_HEADER_SIZE + type_list_size + 12 * num_refs;
    let map_offset = DATA_OFFSET + data.len() as u32;
    let map_size = u32::from(name_list_offset) + names.len() as u32;

    let mut header = Vec::new();
    header.write_u32::<BigEndian>(DATA_OFFSET).unwrap();
    header.write_u32::<BigEndian>(map_offset).unwrap();
    header.write_u32::<BigEndian>(data.len() as u32).unwrap();
    header.write_u32::<BigEndian>(map_size).unwrap();

    let mut fork = header.clone();
    fork.resize(DATA_OFFSET as usize, 0);
    fork.extend_from_slice(&data);

    // Map header: header copy, next map handle, file reference number, map
    // attributes, type list offset, name list offset
    fork.extend_from_slice(&header);
    fork.write_u32::<BigEndian>(0).unwrap();
    fork.write_u16::<BigEndian>(0).unwrap();
    fork.write_u16::<BigEndian>(0).unwrap();
    fork.write_u16::<BigEndian>(MAP_HEADER_SIZE).unwrap();
    fork.write_u16::<BigEndian>(name_list_offset).unwrap();
    fork.extend_from_slice(&type_list);
    fork.extend_from_slice(&references);
    fork.extend_from_slice(&names);

    assert_eq!(fork.len(), map_offset as usize + map_size as usize);
    fork
}

/// The absolute position of the resource map in a built fork.
pub fn map_offset(fork: &[u8]) -> usize {
    BigEndian::read_u32(&fork[4..8]) as usize
}

/// The absolute position of the first type list entry in a built fork.
pub fn type_list_entries(fork: &[u8]) -> usize {
    map_offset(fork) + usize::from(MAP_HEADER_SIZE) + 2
}

/// A fork with five `CODE` resources, 29 `snd ` resources and a `STR `.
pub fn game_fork() -> Vec<u8> {
    const BOUNCE: &[u8] = b"\x00\x01\x00\x01\x00\x05\x00\x00\x00\x00bounce";
    let code: Vec<_> = (0..5).map(|id| Entry::new(id, b"\x3f\x3c\x00\x01\xa9\xf0")).collect();
    let mut sounds = vec![ Entry::named(5016, b"Present Bounce", BOUNCE) ];
    sounds.extend((1..29).map(|i| Entry::new(5016 + i, b"snd data")));
    let strings = vec![ Entry::named(128, b"Copyright", b"\x0b(c) example") ];
    build_fork(&[
        (b"CODE", code),
        (b"snd ", sounds),
        (b"STR ", strings),
    ])
}
