use alloc::string::String;
use serde::Deserialize;

use super::{decode_padded_name, AccessFlags, FsDate, FILE_NAME_LEN, U24};

/// Size of a directory entry record
pub const DIRECTORY_RECORD_SIZE: usize = 0x1a;

/// Offset of the first record slot, which links back to the parent directory
pub const DIRECTORY_FIRST_RECORD: usize = 0x11;

/// Fixed header at the start of a directory's byte table
#[repr(C)]
#[repr(packed)]
#[derive(Deserialize, Debug, Copy, Clone, Eq, PartialEq)]
pub struct DirectoryHeader {
    pub first_entry: u16,
    pub sequence: u8,
    pub name: [u8; FILE_NAME_LEN],
    pub free_chain: u16,
    pub entry_count: u16,
}

pub const DIRECTORY_HEADER_SIZE: usize = core::mem::size_of::<DirectoryHeader>();

impl DirectoryHeader {
    pub fn deserialize(buf: &[u8; DIRECTORY_HEADER_SIZE]) -> Result<Self, bincode::Error> {
        super::deserialize(buf)
    }

    pub fn name_str(&self) -> String {
        let name = self.name;
        decode_padded_name(&name)
    }

    pub fn first_entry(&self) -> u16 {
        self.first_entry
    }

    pub fn entry_count(&self) -> u16 {
        self.entry_count
    }
}

/// On-disk representation of a single directory entry
#[repr(C)]
#[repr(packed)]
#[derive(Deserialize, Debug, Copy, Clone, Eq, PartialEq)]
pub struct DirectoryRecord {
    pub next_entry: u16,
    pub name: [u8; FILE_NAME_LEN],
    pub load_address: u32,
    pub exec_address: u32,
    pub access: AccessFlags,
    pub date: FsDate,
    pub sin: U24,
}

impl DirectoryRecord {
    pub fn deserialize(buf: &[u8; DIRECTORY_RECORD_SIZE]) -> Result<Self, bincode::Error> {
        super::deserialize(buf)
    }

    pub fn name_str(&self) -> String {
        let name = self.name;
        decode_padded_name(&name)
    }

    /// Offset of the next record within the directory table, 0 at the end
    pub fn next_entry(&self) -> u16 {
        self.next_entry
    }

    pub fn is_directory(&self) -> bool {
        let access = self.access;
        access.directory()
    }

    pub fn sin(&self) -> u32 {
        self.sin.get()
    }
}
