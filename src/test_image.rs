//! In-memory L3FS images for tests.

use alloc::vec;
use alloc::vec::Vec;

use crate::layout::{
    DIRECTORY_FIRST_RECORD, DIRECTORY_RECORD_SIZE, MAP_MAGIC, SECTOR_SIZE_USZ, VOLUME_HEADER_MAGIC,
};

/// One record of a directory built by [`ImageBuilder::directory_table`]
#[derive(Debug, Copy, Clone)]
pub struct EntrySpec<'a> {
    pub name: &'a str,
    pub access: u8,
    pub sin: u32,
    pub load: u32,
    pub exec: u32,
}

impl<'a> EntrySpec<'a> {
    pub fn file(name: &'a str, sin: u32) -> Self {
        Self {
            name,
            access: 0b0000_0110,
            sin,
            load: 0,
            exec: 0,
        }
    }

    pub fn dir(name: &'a str, sin: u32) -> Self {
        Self {
            name,
            access: 0b0010_0000,
            sin,
            load: 0,
            exec: 0,
        }
    }
}

pub struct ImageBuilder {
    pub image: Vec<u8>,
}

impl ImageBuilder {
    pub fn new(sectors: usize) -> Self {
        Self {
            image: vec![0u8; sectors * SECTOR_SIZE_USZ],
        }
    }

    pub fn sector_mut(&mut self, sector: u32) -> &mut [u8] {
        let start = sector as usize * SECTOR_SIZE_USZ;
        if self.image.len() < start + SECTOR_SIZE_USZ {
            self.image.resize(start + SECTOR_SIZE_USZ, 0);
        }
        &mut self.image[start..start + SECTOR_SIZE_USZ]
    }

    /// Writes `data` from the start of `sector`, spilling into the sectors after it
    pub fn write(&mut self, sector: u32, data: &[u8]) {
        for (i, chunk) in data.chunks(SECTOR_SIZE_USZ).enumerate() {
            self.sector_mut(sector + i as u32)[..chunk.len()].copy_from_slice(chunk);
        }
    }

    pub fn fill(&mut self, sector: u32, count: u32, byte: u8) {
        for i in 0..count {
            self.sector_mut(sector + i).fill(byte);
        }
    }

    pub fn map_fragment(&mut self, sector: u32, sequence: u8, extents: &[(u32, u16)], next: u32) {
        let buf = self.sector_mut(sector);
        buf.fill(0);
        buf[0..6].copy_from_slice(&MAP_MAGIC);
        buf[0x06] = sequence;
        buf[0xff] = sequence;
        for (i, (start, length)) in extents.iter().enumerate() {
            let at = 0x0a + 5 * i;
            buf[at..at + 3].copy_from_slice(&start.to_le_bytes()[..3]);
            buf[at + 3..at + 5].copy_from_slice(&length.to_le_bytes());
        }
        buf[0xfa..0xfd].copy_from_slice(&next.to_le_bytes()[..3]);
        buf[0xfd..0xff].copy_from_slice(&1u16.to_le_bytes());
    }

    /// Stores `data` at `data_sector` onwards, mapped by a single fragment at `sin`
    pub fn object(&mut self, sin: u32, data_sector: u32, data: &[u8]) {
        let sectors = data.len().div_ceil(SECTOR_SIZE_USZ) as u16;
        self.write(data_sector, data);
        if sectors == 0 {
            self.map_fragment(sin, 0, &[], 0);
        } else {
            self.map_fragment(sin, 0, &[(data_sector, sectors)], 0);
        }
    }

    /// Both boot sectors pointing at the AFS0 header in `afs0`
    pub fn boot(&mut self, afs0: u32) {
        self.sector_mut(0)[0xf6..0xf9].copy_from_slice(&afs0.to_le_bytes()[..3]);
        self.sector_mut(1)[0xf6..0xf9].copy_from_slice(&afs0.to_le_bytes()[..3]);
    }

    pub fn header(&mut self, afs0: u32, title: &str, root_sin: u32) {
        let buf = self.sector_mut(afs0);
        buf[0..4].copy_from_slice(&VOLUME_HEADER_MAGIC);
        buf[0x04..0x14].fill(b' ');
        buf[0x04..0x04 + title.len()].copy_from_slice(title.as_bytes());
        buf[0x14..0x16].copy_from_slice(&80u16.to_le_bytes());
        buf[0x16..0x19].copy_from_slice(&[0x00, 0x05, 0x00]);
        buf[0x19] = 1;
        buf[0x1a..0x1c].copy_from_slice(&16u16.to_le_bytes());
        buf[0x1c] = 1;
        buf[0x1d] = 0;
        buf[0x1e] = 1;
        buf[0x1f..0x22].copy_from_slice(&root_sin.to_le_bytes()[..3]);
    }

    /// Byte table of a directory: header, parent link record at 0x11, then
    /// `entries` chained in order.
    pub fn directory_table(name: &str, parent_sin: u32, entries: &[EntrySpec]) -> Vec<u8> {
        let record_at = |i: usize| DIRECTORY_FIRST_RECORD + DIRECTORY_RECORD_SIZE * (i + 1);
        let mut table = vec![0u8; record_at(entries.len())];

        let first = if entries.is_empty() { 0 } else { record_at(0) };
        table[0x00..0x02].copy_from_slice(&(first as u16).to_le_bytes());
        table[0x03..0x0d].fill(b' ');
        table[0x03..0x03 + name.len()].copy_from_slice(name.as_bytes());
        table[0x0f..0x11].copy_from_slice(&(entries.len() as u16).to_le_bytes());

        let parent = &mut table[DIRECTORY_FIRST_RECORD..record_at(0)];
        parent[0x02..0x0c].copy_from_slice(b"^         ");
        parent[0x14] = 0b0010_0000;
        parent[0x17..0x1a].copy_from_slice(&parent_sin.to_le_bytes()[..3]);

        for (i, entry) in entries.iter().enumerate() {
            let at = record_at(i);
            let next = if i + 1 == entries.len() { 0 } else { record_at(i + 1) };
            let record = &mut table[at..at + DIRECTORY_RECORD_SIZE];
            record[0x00..0x02].copy_from_slice(&(next as u16).to_le_bytes());
            record[0x02..0x0c].fill(b' ');
            record[0x02..0x02 + entry.name.len()].copy_from_slice(entry.name.as_bytes());
            record[0x0c..0x10].copy_from_slice(&entry.load.to_le_bytes());
            record[0x10..0x14].copy_from_slice(&entry.exec.to_le_bytes());
            record[0x14] = entry.access;
            record[0x17..0x1a].copy_from_slice(&entry.sin.to_le_bytes()[..3]);
        }

        table
    }
}
