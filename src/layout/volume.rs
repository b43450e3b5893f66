use alloc::string::String;
use serde::Deserialize;

use super::{decode_padded_name, FsDate, U24};

pub const VOLUME_HEADER_MAGIC: [u8; 4] = *b"AFS0";

/// Offset, within each of sectors 0 and 1, of the pointer to the AFS0 sector
pub const BOOT_AFS0_POINTER_OFFSET: usize = 0xf6;

/// Sector holding the second copy of the AFS0 pointer
pub const BOOT_MIRROR_SECTOR: u32 = 1;

/// Value the byte at 0x1e of the AFS0 sector must hold
pub const VOLUME_HEADER_GUARD: u8 = 1;

/// L3FS volume information, located at the start of the AFS0 sector
#[repr(C)]
#[repr(packed)]
#[derive(Deserialize, Debug, Copy, Clone, Eq, PartialEq)]
pub struct VolumeHeader {
    pub magic: [u8; 4],
    pub title: [u8; 16],
    pub track_count: u16,
    pub sector_count: U24,
    pub disk_count: u8,
    pub sectors_per_track: u16,
    pub sectors_per_bitmap: u8,
    pub increment_to_next_drive: u8,
    pub guard: u8,
    pub root_dir_sin: U24,
    pub init_date: FsDate,
    pub first_free_track: u16,
}

pub const VOLUME_HEADER_SIZE: usize = core::mem::size_of::<VolumeHeader>();

impl VolumeHeader {
    pub fn deserialize(buf: &[u8; VOLUME_HEADER_SIZE]) -> Result<Self, bincode::Error> {
        super::deserialize(buf)
    }

    pub fn has_valid_magic(&self) -> bool {
        self.magic == VOLUME_HEADER_MAGIC
    }

    pub fn has_valid_guard(&self) -> bool {
        self.guard == VOLUME_HEADER_GUARD
    }

    /// The disk must hold a whole number of tracks
    pub fn has_valid_geometry(&self) -> bool {
        let sectors_per_track = self.sectors_per_track as u32;
        sectors_per_track != 0 && self.sector_count() % sectors_per_track == 0
    }

    pub fn title_str(&self) -> String {
        let title = self.title;
        decode_padded_name(&title)
    }

    pub fn sector_count(&self) -> u32 {
        self.sector_count.get()
    }

    pub fn root_dir_sin(&self) -> u32 {
        self.root_dir_sin.get()
    }

    pub fn init_date(&self) -> FsDate {
        self.init_date
    }
}

#[cfg(test)]
mod test {
    use super::{VolumeHeader, VOLUME_HEADER_MAGIC, VOLUME_HEADER_SIZE};

    fn header_bytes() -> [u8; VOLUME_HEADER_SIZE] {
        let mut buf = [0u8; VOLUME_HEADER_SIZE];
        buf[0..4].copy_from_slice(&VOLUME_HEADER_MAGIC);
        buf[0x04..0x14].copy_from_slice(b"LEVEL3 DISC     ");
        buf[0x14..0x16].copy_from_slice(&80u16.to_le_bytes());
        buf[0x16..0x19].copy_from_slice(&[0x00, 0x0a, 0x00]);
        buf[0x19] = 1;
        buf[0x1a..0x1c].copy_from_slice(&16u16.to_le_bytes());
        buf[0x1c] = 1;
        buf[0x1d] = 0;
        buf[0x1e] = 1;
        buf[0x1f..0x22].copy_from_slice(&[0x34, 0x12, 0x00]);
        buf[0x22..0x24].copy_from_slice(&[7, 3 | (5 << 4)]);
        buf[0x24..0x26].copy_from_slice(&12u16.to_le_bytes());
        buf
    }

    #[test]
    fn test_layout_volume_header_size() {
        assert_eq!(VOLUME_HEADER_SIZE, 0x26);
    }

    #[test]
    fn test_layout_volume_header_deserialize() {
        let header =
            VolumeHeader::deserialize(&header_bytes()).expect("Deserialization should succeed");

        assert!(header.has_valid_magic());
        assert!(header.has_valid_guard());
        assert!(header.has_valid_geometry());
        assert_eq!(header.title_str(), "LEVEL3 DISC");
        assert_eq!({ header.track_count }, 80);
        assert_eq!(header.sector_count(), 0xa00);
        assert_eq!(header.disk_count, 1);
        assert_eq!({ header.sectors_per_track }, 16);
        assert_eq!(header.sectors_per_bitmap, 1);
        assert_eq!(header.increment_to_next_drive, 0);
        assert_eq!(header.root_dir_sin(), 0x1234);
        assert_eq!(header.init_date().year(), 1986);
        assert_eq!({ header.first_free_track }, 12);
    }

    #[test]
    fn test_layout_volume_header_invalid_magic() {
        let mut buf = header_bytes();
        buf[3] = b'1';

        let header = VolumeHeader::deserialize(&buf).expect("Deserialization should succeed");
        assert!(!header.has_valid_magic());
    }

    #[test]
    fn test_layout_volume_header_invalid_guard() {
        let mut buf = header_bytes();
        buf[0x1e] = 0;

        let header = VolumeHeader::deserialize(&buf).expect("Deserialization should succeed");
        assert!(!header.has_valid_guard());
    }

    #[test]
    fn test_layout_volume_header_partial_track() {
        let mut buf = header_bytes();
        buf[0x16] = 0x01;

        let header = VolumeHeader::deserialize(&buf).expect("Deserialization should succeed");
        assert!(!header.has_valid_geometry());
    }

    #[test]
    fn test_layout_volume_header_zero_track_length() {
        let mut buf = header_bytes();
        buf[0x1a] = 0;

        let header = VolumeHeader::deserialize(&buf).expect("Deserialization should succeed");
        assert!(!header.has_valid_geometry());
    }
}
