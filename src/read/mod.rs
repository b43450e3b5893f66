use thiserror::Error;

mod alloc_map;
pub use alloc_map::*;

mod catalogue;
pub use catalogue::*;

mod path;
pub use path::*;

mod sector;
pub use sector::*;

mod volume;
pub use volume::*;

/// The image does not follow the L3FS layout
#[non_exhaustive]
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum FormatError {
    #[error("sector {0} is not an AFS0 volume header")]
    InvalidVolumeSignature(u32),
    #[error("volume header guard byte is {0}, expected 1")]
    InvalidGuardByte(u8),
    #[error("{sectors} sectors is not a whole number of {sectors_per_track} sector tracks")]
    InvalidGeometry {
        sectors: u32,
        sectors_per_track: u16,
    },
    #[error("sector {0} is not an allocation map")]
    InvalidMapSignature(u32),
    #[error("allocation map at sector {sector} has sequence numbers {first} and {last}")]
    SequenceCopiesDiffer { sector: u32, first: u8, last: u8 },
    #[error("allocation map at sector {sector} has sequence {found}, expected {expected}")]
    UnexpectedSequence {
        sector: u32,
        expected: i32,
        found: u8,
    },
    #[error("directory at sector {0} is too short to hold its header")]
    TruncatedDirectory(u32),
    #[error("final entry of directory at sector {sin} links to offset {next}")]
    FinalEntryLink { sin: u32, next: u16 },
}

/// An allocation map chain or directory tree cannot be followed
#[non_exhaustive]
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum ChainError {
    #[error("allocation map at sector {sector} continues in a {length} sector fragment")]
    MultiSectorFragment { sector: u32, length: u16 },
    #[error("allocation map chain starting at sector {0} does not end")]
    RunawayChain(u32),
    #[error("directory at sector {0} is nested too deeply")]
    DirectoryTooDeep(u32),
}

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ReadError<E> {
    #[error("io error")]
    IOError(#[source] E),
    #[error("sector {0} lies outside the image")]
    SectorOutOfRange(u32),
    #[error("failed to deserialize on-disk structure")]
    DeserializationFailed(#[source] bincode::Error),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Chain(#[from] ChainError),
}

impl<E> ReadError<E> {
    pub fn is_format_error(&self) -> bool {
        matches!(self, ReadError::Format(_))
    }

    pub fn is_chain_error(&self) -> bool {
        matches!(self, ReadError::Chain(_))
    }
}
