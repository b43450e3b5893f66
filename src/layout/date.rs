use core::fmt::Display;

use proc_bitfield::bitfield;
use serde::Deserialize;

/// First year representable by a filing system date
pub const FS_DATE_EPOCH: u16 = 1981;

bitfield!(
/// Filing system standard date: day and month in the low bits of each byte,
/// the year offset split across the top bits of both.
#[repr(C)]
#[derive(Deserialize, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FsDate(pub u16): Debug {
    pub raw: u16 @ ..,

    pub day: u8 @ 0..=4,
    pub year_high: u8 @ 5..=7,
    pub month: u8 @ 8..=11,
    pub year_low: u8 @ 12..=15,
}
);

impl FsDate {
    pub fn year(&self) -> u16 {
        FS_DATE_EPOCH + (((self.year_high() as u16) << 4) | self.year_low() as u16)
    }

    /// An all-zero date is written for objects that were never stamped
    pub fn is_unset(&self) -> bool {
        self.raw() == 0
    }
}

impl Display for FsDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.day(), self.month(), self.year())
    }
}

#[cfg(test)]
mod test {
    use super::FsDate;

    #[test]
    fn test_layout_fs_date_fields() {
        // 25th, month 12, year offset 0x13 (1 high, 3 low)
        let date = FsDate(u16::from_le_bytes([25 | (1 << 5), 12 | (3 << 4)]));
        assert_eq!(date.day(), 25);
        assert_eq!(date.month(), 12);
        assert_eq!(date.year(), 1981 + 0x13);
        assert!(!date.is_unset());
    }

    #[test]
    fn test_layout_fs_date_display() {
        use alloc::string::ToString;

        let date = FsDate(u16::from_le_bytes([7, 3 | (5 << 4)]));
        assert_eq!(date.to_string(), "07/03/1986");
        assert!(FsDate::default().is_unset());
    }
}
