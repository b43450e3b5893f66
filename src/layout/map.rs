use serde::Deserialize;
use serde_big_array::BigArray;

use super::{SECTOR_SIZE_USZ, U24};

pub const MAP_MAGIC: [u8; 6] = *b"JesMap";

/// Number of extent slots between 0x0a and 0xfa of a map sector
pub const MAP_ENTRY_COUNT: usize = 48;

/// The only next-fragment length the chain walker understands
pub const MAP_FRAGMENT_SECTORS: u16 = 1;

/// A run of contiguous sectors belonging to an object
#[repr(C)]
#[repr(packed)]
#[derive(Deserialize, Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MapEntry {
    pub start_sector: U24,
    pub length: u16,
}

impl MapEntry {
    pub fn start_sector(&self) -> u32 {
        self.start_sector.get()
    }

    pub fn length(&self) -> u16 {
        self.length
    }

    /// A zero length entry terminates the fragment's extent table
    pub fn is_terminator(&self) -> bool {
        self.length() == 0
    }
}

/// One sector of an object's allocation map ("JesMap")
///
/// Fragments are chained through `next_fragment`. The sequence number is
/// stored twice, at the start and at the very end of the sector.
#[repr(C)]
#[repr(packed)]
#[derive(Deserialize, Debug, Copy, Clone, Eq, PartialEq)]
pub struct MapFragment {
    pub magic: [u8; 6],
    pub sequence: u8,
    reserved: [u8; 3],

    #[serde(with = "BigArray")]
    pub entries: [MapEntry; MAP_ENTRY_COUNT],

    pub next_fragment: U24,
    pub next_fragment_length: u16,
    pub sequence_copy: u8,
}

impl MapFragment {
    pub fn deserialize(buf: &[u8; SECTOR_SIZE_USZ]) -> Result<Self, bincode::Error> {
        super::deserialize(buf)
    }

    pub fn has_valid_magic(&self) -> bool {
        self.magic == MAP_MAGIC
    }

    pub fn sequence_copies_match(&self) -> bool {
        self.sequence == self.sequence_copy
    }

    /// Extents in table order, up to the first zero length entry
    pub fn extents(&self) -> impl Iterator<Item = MapEntry> {
        let entries = self.entries;
        entries.into_iter().take_while(|entry| !entry.is_terminator())
    }

    pub fn sector_total(&self) -> u64 {
        self.extents().map(|entry| entry.length() as u64).sum()
    }

    /// Sector of the next fragment in the chain, if any
    pub fn next_fragment(&self) -> Option<u32> {
        match self.next_fragment.get() {
            0 => None,
            sector => Some(sector),
        }
    }

    pub fn next_fragment_length(&self) -> u16 {
        self.next_fragment_length
    }
}
