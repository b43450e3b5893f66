/// Trait for read operations on some block device containing an L3FS image
///
/// Every sector fetch is an independent positioned read; implementations are
/// free to keep a handle open between calls as long as the bytes returned for
/// a given offset do not change.
pub trait BlockDeviceRead {
    type ReadError: core::error::Error + Send + Sync + 'static;

    fn read(&mut self, offset: u64, buffer: &mut [u8]) -> Result<(), Self::ReadError>;
}

impl<T: BlockDeviceRead + ?Sized> BlockDeviceRead for &mut T {
    type ReadError = T::ReadError;

    fn read(&mut self, offset: u64, buffer: &mut [u8]) -> Result<(), Self::ReadError> {
        (**self).read(offset, buffer)
    }
}

#[cfg(feature = "std")]
impl<R> BlockDeviceRead for std::io::Cursor<R>
where
    R: AsRef<[u8]>,
{
    type ReadError = std::io::Error;

    fn read(&mut self, offset: u64, buffer: &mut [u8]) -> Result<(), std::io::Error> {
        read_seek(self, offset, buffer)
    }
}

#[cfg(feature = "std")]
impl BlockDeviceRead for std::fs::File {
    type ReadError = std::io::Error;

    fn read(&mut self, offset: u64, buffer: &mut [u8]) -> Result<(), std::io::Error> {
        read_seek(self, offset, buffer)
    }
}

#[cfg(feature = "std")]
impl<R> BlockDeviceRead for std::io::BufReader<R>
where
    R: std::io::Read + std::io::Seek,
{
    type ReadError = std::io::Error;

    fn read(&mut self, offset: u64, buffer: &mut [u8]) -> Result<(), std::io::Error> {
        read_seek(self, offset, buffer)
    }
}

#[cfg(feature = "std")]
fn read_seek<R: std::io::Read + std::io::Seek>(
    reader: &mut R,
    offset: u64,
    buffer: &mut [u8],
) -> Result<(), std::io::Error> {
    reader.seek(std::io::SeekFrom::Start(offset))?;
    reader.read_exact(buffer)?;

    Ok(())
}
