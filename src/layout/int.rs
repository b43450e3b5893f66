use serde::Deserialize;

/// Little endian 24-bit unsigned integer, as used for sector numbers
/// and SINs throughout the filesystem.
#[repr(C)]
#[derive(Deserialize, Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct U24(pub [u8; 3]);

impl U24 {
    pub fn get(self) -> u32 {
        u32::from_le_bytes([self.0[0], self.0[1], self.0[2], 0])
    }

    pub fn from_slice(buf: &[u8]) -> Option<Self> {
        let bytes = buf.get(0..3)?;
        Some(Self([bytes[0], bytes[1], bytes[2]]))
    }
}

impl From<U24> for u32 {
    fn from(value: U24) -> Self {
        value.get()
    }
}
