use bincode::Options;

pub const SECTOR_SIZE: u32 = 256;
pub const SECTOR_SIZE_USZ: usize = SECTOR_SIZE as usize;
pub const SECTOR_SIZE_U64: u64 = SECTOR_SIZE as u64;

/// Tracks on each surface of an interleaved (double sided) image
pub const TRACKS_PER_SIDE: u32 = 80;

mod attributes;
pub use attributes::*;

mod date;
pub use date::*;

mod dirent;
pub use dirent::*;

mod int;
pub use int::*;

mod map;
pub use map::*;

mod name;
pub use name::*;

mod sector;
pub use sector::*;

mod volume;
pub use volume::*;

/// All on-disk structures are little endian with fixed-width fields.
pub(crate) fn deserialize<'de, T: serde::Deserialize<'de>>(
    buf: &'de [u8],
) -> Result<T, bincode::Error> {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .allow_trailing_bytes()
        .deserialize(buf)
}
