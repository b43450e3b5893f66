use alloc::vec::Vec;

use crate::blockdev::BlockDeviceRead;
use crate::layout::SectorLayout;
use crate::read::{
    build_catalogue, read_volume, AllocationMap, Catalogue, FileStat, ReadError, Volume,
};

/// A read session over one L3FS image.
///
/// The volume header is read and validated when the session is opened. The
/// catalogue is built on first use and kept for the life of the session, so
/// changes made to the backing image after that point are not seen. Results
/// are undefined if the image is modified while a session is reading it.
pub struct L3fsImage<D: BlockDeviceRead> {
    dev: D,
    layout: SectorLayout,
    volume: Volume,
    catalogue: Option<Catalogue>,
}

impl<D: BlockDeviceRead> L3fsImage<D> {
    /// Opens a linear image, one sector after another
    pub fn open(dev: D) -> Result<Self, ReadError<D::ReadError>> {
        Self::open_with_layout(dev, SectorLayout::Linear)
    }

    pub fn open_with_layout(
        mut dev: D,
        layout: SectorLayout,
    ) -> Result<Self, ReadError<D::ReadError>> {
        let volume = read_volume(&mut dev, layout)?;
        debugln!(
            "[open] Opened \"{}\" ({:?})",
            volume.header.title_str(),
            layout
        );

        Ok(Self {
            dev,
            layout,
            volume,
            catalogue: None,
        })
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    pub fn layout(&self) -> SectorLayout {
        self.layout
    }

    /// The full directory tree from the root, built once per session
    pub fn catalogue(&mut self) -> Result<&Catalogue, ReadError<D::ReadError>> {
        let catalogue = match self.catalogue.take() {
            Some(catalogue) => catalogue,
            None => {
                let root = self.volume.root_dir_sin();
                debugln!("[catalogue] Building from root at sector {}", root);
                build_catalogue(&mut self.dev, self.layout, root, 0)?
            }
        };

        let catalogue: &Catalogue = self.catalogue.insert(catalogue);
        Ok(catalogue)
    }

    /// Every sector of the file at `path`.
    ///
    /// The data is whole sectors, so it is usually longer than the bytes
    /// the file was written with. Returns `None` if the path does not name
    /// a file.
    pub fn get_file(&mut self, path: &str) -> Result<Option<Vec<u8>>, ReadError<D::ReadError>> {
        let sin = match self.catalogue()?.resolve(path) {
            Some(entry) if entry.is_file() => entry.sin,
            _ => return Ok(None),
        };
        debugln!("[get_file] {} at sector {}", path, sin);

        AllocationMap::new(sin)
            .read_all(&mut self.dev, self.layout)
            .map(Some)
    }

    pub fn get_stat(&mut self, path: &str) -> Result<Option<FileStat>, ReadError<D::ReadError>> {
        Ok(self.catalogue()?.stat(path))
    }

    pub fn is_file(&mut self, path: &str) -> Result<bool, ReadError<D::ReadError>> {
        Ok(self.catalogue()?.is_file(path))
    }

    pub fn is_dir(&mut self, path: &str) -> Result<bool, ReadError<D::ReadError>> {
        Ok(self.catalogue()?.is_dir(path))
    }

    pub fn get_ref(&self) -> &D {
        &self.dev
    }

    pub fn get_mut(&mut self) -> &mut D {
        &mut self.dev
    }

    pub fn into_inner(self) -> D {
        self.dev
    }
}
