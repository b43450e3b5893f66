use thiserror::Error;

use super::BlockDeviceRead;

#[derive(Error, Copy, Clone, Debug, Eq, PartialEq)]
#[error("io operation out of bounds")]
pub struct ByteSliceOutOfBounds;

impl BlockDeviceRead for [u8] {
    type ReadError = ByteSliceOutOfBounds;

    fn read(&mut self, offset: u64, buffer: &mut [u8]) -> Result<(), ByteSliceOutOfBounds> {
        let offset: usize = offset.try_into().map_err(|_| ByteSliceOutOfBounds)?;
        let source_len = <[u8]>::len(self);
        let size = buffer.len();
        if offset >= source_len || source_len - offset < size {
            return Err(ByteSliceOutOfBounds);
        }

        buffer.copy_from_slice(&self[offset..(offset + size)]);
        Ok(())
    }
}

impl BlockDeviceRead for alloc::vec::Vec<u8> {
    type ReadError = ByteSliceOutOfBounds;

    fn read(&mut self, offset: u64, buffer: &mut [u8]) -> Result<(), ByteSliceOutOfBounds> {
        self.as_mut_slice().read(offset, buffer)
    }
}
