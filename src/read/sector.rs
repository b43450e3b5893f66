use alloc::vec::Vec;

use crate::blockdev::BlockDeviceRead;
use crate::layout::{SectorLayout, SECTOR_SIZE_USZ};

use super::ReadError;

/// Reads a single sector, resolving its position through `layout`
pub fn read_sector<BDR: BlockDeviceRead + ?Sized>(
    dev: &mut BDR,
    layout: SectorLayout,
    sector: u32,
) -> Result<[u8; SECTOR_SIZE_USZ], ReadError<BDR::ReadError>> {
    let offset = layout
        .offset(sector)
        .ok_or(ReadError::SectorOutOfRange(sector))?;
    traceln!("[read_sector] Sector {} at offset {:#x}", sector, offset);

    let mut buf = [0u8; SECTOR_SIZE_USZ];
    dev.read(offset, &mut buf).map_err(ReadError::IOError)?;
    Ok(buf)
}

/// Reads `count` consecutive sectors starting at `start`.
///
/// Sectors are fetched one at a time, since consecutive sector numbers
/// are not adjacent in an interleaved image.
pub fn read_sectors<BDR: BlockDeviceRead + ?Sized>(
    dev: &mut BDR,
    layout: SectorLayout,
    start: u32,
    count: u32,
) -> Result<Vec<u8>, ReadError<BDR::ReadError>> {
    let mut data = Vec::with_capacity(count as usize * SECTOR_SIZE_USZ);
    for i in 0..count {
        let sector = start
            .checked_add(i)
            .ok_or(ReadError::SectorOutOfRange(start))?;
        data.extend_from_slice(&read_sector(dev, layout, sector)?);
    }

    Ok(data)
}
