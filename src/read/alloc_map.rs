use alloc::vec::Vec;

use crate::blockdev::BlockDeviceRead;
use crate::layout::{MapFragment, SectorLayout, MAP_FRAGMENT_SECTORS, SECTOR_SIZE_U64};

use super::{read_sector, read_sectors, ChainError, FormatError, ReadError};

/// Most next-fragment links followed before a chain is considered corrupt
pub const MAX_CHAIN_LINKS: u32 = 255;

/// The allocation map of one object, named by its SIN (the sector holding
/// the first map fragment).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AllocationMap {
    pub sin: u32,
}

/// Walks the fragments of a chain, checking each one on the way.
struct ChainWalker {
    sin: u32,
    sector: u32,
    links: u32,
}

impl ChainWalker {
    fn new(sin: u32) -> Self {
        Self {
            sin,
            sector: sin,
            links: 0,
        }
    }

    fn read_fragment<BDR: BlockDeviceRead + ?Sized>(
        &self,
        dev: &mut BDR,
        layout: SectorLayout,
    ) -> Result<MapFragment, ReadError<BDR::ReadError>> {
        let buf = read_sector(dev, layout, self.sector)?;
        let fragment = MapFragment::deserialize(&buf).map_err(ReadError::DeserializationFailed)?;

        if !fragment.has_valid_magic() {
            return Err(FormatError::InvalidMapSignature(self.sector).into());
        }

        if !fragment.sequence_copies_match() {
            return Err(FormatError::SequenceCopiesDiffer {
                sector: self.sector,
                first: fragment.sequence,
                last: fragment.sequence_copy,
            }
            .into());
        }

        traceln!(
            "[read_fragment] Fragment {} at sector {}: {:?}",
            fragment.sequence,
            self.sector,
            fragment
        );
        Ok(fragment)
    }

    fn check_sequence<E>(
        &self,
        fragment: &MapFragment,
        expected: i32,
    ) -> Result<(), ReadError<E>> {
        if fragment.sequence as i32 != expected {
            return Err(FormatError::UnexpectedSequence {
                sector: self.sector,
                expected,
                found: fragment.sequence,
            }
            .into());
        }

        Ok(())
    }

    /// Moves to the fragment after `fragment`. Returns false at the end of
    /// the chain.
    fn advance<E>(&mut self, fragment: &MapFragment) -> Result<bool, ReadError<E>> {
        let Some(next) = fragment.next_fragment() else {
            return Ok(false);
        };

        let length = fragment.next_fragment_length();
        if length != MAP_FRAGMENT_SECTORS {
            return Err(ChainError::MultiSectorFragment {
                sector: self.sector,
                length,
            }
            .into());
        }

        self.links += 1;
        if self.links > MAX_CHAIN_LINKS {
            return Err(ChainError::RunawayChain(self.sin).into());
        }

        self.sector = next;
        Ok(true)
    }
}

impl AllocationMap {
    pub fn new(sin: u32) -> Self {
        Self { sin }
    }

    /// Size in bytes of the object, counted in whole sectors.
    ///
    /// The chain must start with fragment 0 and count upwards.
    pub fn total_size<BDR: BlockDeviceRead + ?Sized>(
        &self,
        dev: &mut BDR,
        layout: SectorLayout,
    ) -> Result<u64, ReadError<BDR::ReadError>> {
        let mut walker = ChainWalker::new(self.sin);
        let mut expected = 0;
        let mut sectors = 0;

        loop {
            let fragment = walker.read_fragment(dev, layout)?;
            walker.check_sequence(&fragment, expected)?;
            sectors += fragment.sector_total();

            if !walker.advance(&fragment)? {
                break;
            }

            expected += 1;
        }

        debugln!("[total_size] SIN {}: {} sectors", self.sin, sectors);
        Ok(sectors * SECTOR_SIZE_U64)
    }

    /// Reads every sector the object occupies, in map order.
    ///
    /// Numbering starts from whatever the first fragment records and counts
    /// downwards through the chain.
    pub fn read_all<BDR: BlockDeviceRead + ?Sized>(
        &self,
        dev: &mut BDR,
        layout: SectorLayout,
    ) -> Result<Vec<u8>, ReadError<BDR::ReadError>> {
        let mut walker = ChainWalker::new(self.sin);
        let mut expected = None;
        let mut data = Vec::new();

        loop {
            let fragment = walker.read_fragment(dev, layout)?;
            let sequence = *expected.get_or_insert(fragment.sequence as i32);
            walker.check_sequence(&fragment, sequence)?;

            for extent in fragment.extents() {
                traceln!(
                    "[read_all] SIN {}: {} sectors from {}",
                    self.sin,
                    extent.length(),
                    extent.start_sector()
                );
                let sectors =
                    read_sectors(dev, layout, extent.start_sector(), extent.length() as u32)?;
                data.extend_from_slice(&sectors);
            }

            if !walker.advance(&fragment)? {
                break;
            }

            expected = Some(sequence - 1);
        }

        debugln!("[read_all] SIN {}: {} bytes", self.sin, data.len());
        Ok(data)
    }
}
