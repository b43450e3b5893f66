use super::{SECTOR_SIZE_U64, TRACKS_PER_SIDE};

/// Physical ordering of sectors within an image file.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SectorLayout {
    /// Sectors stored back to back, `sector * 256`
    #[default]
    Linear,

    /// Double sided image with the tracks of both surfaces interleaved,
    /// one surface's track followed by the other's.
    Interleaved { sectors_per_track: u32 },
}

impl SectorLayout {
    /// Byte offset of `sector` within the image.
    ///
    /// For interleaved images, tracks from 79 onwards are placed relative to
    /// track 80 on the second surface. This matches the layout produced by
    /// the fileserver tooling, and means sectors on track 79 resolve to a
    /// position before the start of the image, for which `None` is returned.
    pub fn offset(&self, sector: u32) -> Option<u64> {
        let sectors_per_track = match *self {
            SectorLayout::Linear => return Some(sector as u64 * SECTOR_SIZE_U64),
            SectorLayout::Interleaved { sectors_per_track } => sectors_per_track as i64,
        };

        if sectors_per_track == 0 {
            return None;
        }

        let sector = sector as i64;
        let track_len = sectors_per_track * SECTOR_SIZE_U64 as i64;
        let track = sector / sectors_per_track;
        let in_track = (sector - track * sectors_per_track) * SECTOR_SIZE_U64 as i64;

        let offset = if track < TRACKS_PER_SIDE as i64 - 1 {
            2 * track * track_len + in_track
        } else {
            track_len + 2 * (track - TRACKS_PER_SIDE as i64) * track_len + in_track
        };

        u64::try_from(offset).ok()
    }

    pub fn is_interleaved(&self) -> bool {
        matches!(self, SectorLayout::Interleaved { .. })
    }
}
