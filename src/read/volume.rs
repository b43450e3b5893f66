use crate::blockdev::BlockDeviceRead;
use crate::layout::{
    SectorLayout, VolumeHeader, U24, BOOT_AFS0_POINTER_OFFSET, BOOT_MIRROR_SECTOR,
    VOLUME_HEADER_SIZE,
};

use super::{read_sector, FormatError, ReadError};

/// The AFS0 pointers held in the two boot sectors
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BootBlock {
    pub partition_start: u32,
    pub partition_start_mirror: u32,
}

impl BootBlock {
    pub fn pointers_match(&self) -> bool {
        self.partition_start == self.partition_start_mirror
    }
}

/// A validated volume: the boot pointers and the AFS0 header they lead to
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Volume {
    pub boot: BootBlock,
    pub header: VolumeHeader,
}

impl Volume {
    pub fn partition_start(&self) -> u32 {
        self.boot.partition_start
    }

    pub fn root_dir_sin(&self) -> u32 {
        self.header.root_dir_sin()
    }
}

fn read_afs0_pointer<BDR: BlockDeviceRead + ?Sized>(
    dev: &mut BDR,
    layout: SectorLayout,
    sector: u32,
) -> Result<u32, ReadError<BDR::ReadError>> {
    let buf = read_sector(dev, layout, sector)?;
    let pointer = U24::from_slice(&buf[BOOT_AFS0_POINTER_OFFSET..])
        .ok_or(ReadError::SectorOutOfRange(sector))?;
    Ok(pointer.get())
}

/// Reads both boot sectors, then the AFS0 volume header the first one
/// points at.
///
/// The second boot pointer is only compared, a mismatch is logged and the
/// first pointer wins.
pub fn read_volume<BDR: BlockDeviceRead + ?Sized>(
    dev: &mut BDR,
    layout: SectorLayout,
) -> Result<Volume, ReadError<BDR::ReadError>> {
    let boot = BootBlock {
        partition_start: read_afs0_pointer(dev, layout, 0)?,
        partition_start_mirror: read_afs0_pointer(dev, layout, BOOT_MIRROR_SECTOR)?,
    };
    debugln!("[read_volume] Boot pointers: {:?}", boot);

    if !boot.pointers_match() {
        warnln!(
            "AFS0 pointers disagree (sector 0: {}, sector 1: {}), using sector 0",
            boot.partition_start,
            boot.partition_start_mirror
        );
    }

    let sector = read_sector(dev, layout, boot.partition_start)?;
    let mut buf = [0u8; VOLUME_HEADER_SIZE];
    buf.copy_from_slice(&sector[..VOLUME_HEADER_SIZE]);
    let header = VolumeHeader::deserialize(&buf).map_err(ReadError::DeserializationFailed)?;

    if !header.has_valid_magic() {
        return Err(FormatError::InvalidVolumeSignature(boot.partition_start).into());
    }

    if !header.has_valid_guard() {
        return Err(FormatError::InvalidGuardByte(header.guard).into());
    }

    if !header.has_valid_geometry() {
        return Err(FormatError::InvalidGeometry {
            sectors: header.sector_count(),
            sectors_per_track: header.sectors_per_track,
        }
        .into());
    }

    debugln!(
        "[read_volume] Volume \"{}\", root directory at sector {}",
        header.title_str(),
        header.root_dir_sin()
    );

    if let SectorLayout::Interleaved { sectors_per_track } = layout {
        if sectors_per_track != header.sectors_per_track as u32 {
            warnln!(
                "Image opened with {} sectors per track, volume header says {}",
                sectors_per_track,
                { header.sectors_per_track }
            );
        }
    }

    Ok(Volume { boot, header })
}
