use core::fmt::Display;

use proc_bitfield::bitfield;
use serde::Deserialize;

bitfield!(
#[repr(C)]
#[derive(Deserialize, Copy, Clone, Eq, PartialEq, Hash)]
pub struct AccessFlags(pub u8): Debug {
    pub bits: u8 @ ..,

    pub public_write: bool @ 0,
    pub public_read: bool @ 1,
    pub user_read: bool @ 2,
    pub user_write: bool @ 3,
    pub locked: bool @ 4,
    pub directory: bool @ 5,
}
);

/// Formats the flags as an access string, owner half before the slash
/// and public half after it (`DLWR/wr`).
impl Display for AccessFlags {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.directory() {
            f.write_str("D")?;
        }

        if self.locked() {
            f.write_str("L")?;
        }

        if self.user_write() {
            f.write_str("W")?;
        }

        if self.user_read() {
            f.write_str("R")?;
        }

        f.write_str("/")?;

        if self.public_write() {
            f.write_str("w")?;
        }

        if self.public_read() {
            f.write_str("r")?;
        }

        Ok(())
    }
}
