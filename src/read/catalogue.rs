use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::blockdev::BlockDeviceRead;
use crate::layout::{
    eq_ignore_case, AccessFlags, DirectoryHeader, DirectoryRecord, FsDate, SectorLayout,
    DIRECTORY_HEADER_SIZE, DIRECTORY_RECORD_SIZE,
};

use super::{AllocationMap, ChainError, FormatError, ReadError};

/// Deepest directory nesting followed before the tree is considered cyclic
pub const MAX_DIRECTORY_DEPTH: u32 = 255;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum EntryContents {
    /// `size` is `None` when the file's allocation map could not be sized
    File { size: Option<u64> },
    Directory(Catalogue),
}

/// A decoded directory entry, owning its subtree if it is a directory
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CatalogueEntry {
    pub name: String,
    pub load_address: u32,
    pub exec_address: u32,
    pub access: AccessFlags,
    pub date: FsDate,
    pub sin: u32,
    /// Offset of the following record in the parent's table, 0 for the last
    pub next_entry: u16,
    pub contents: EntryContents,
}

impl CatalogueEntry {
    pub fn kind(&self) -> EntryKind {
        match self.contents {
            EntryContents::File { .. } => EntryKind::File,
            EntryContents::Directory(_) => EntryKind::Directory,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind() == EntryKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind() == EntryKind::Directory
    }

    /// File size in bytes. `None` for directories and for files whose size
    /// could not be determined.
    pub fn size(&self) -> Option<u64> {
        match self.contents {
            EntryContents::File { size } => size,
            EntryContents::Directory(_) => None,
        }
    }

    pub fn children(&self) -> Option<&Catalogue> {
        match &self.contents {
            EntryContents::Directory(catalogue) => Some(catalogue),
            EntryContents::File { .. } => None,
        }
    }
}

/// The entries of one directory, in on-disk link order
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Catalogue {
    pub name: String,
    pub sin: u32,
    entries: Vec<CatalogueEntry>,
}

impl Catalogue {
    pub fn new(name: String, sin: u32) -> Self {
        Self {
            name,
            sin,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[CatalogueEntry] {
        &self.entries
    }

    pub fn iter(&self) -> core::slice::Iter<'_, CatalogueEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a direct child by name, ignoring case
    pub fn get(&self, name: &str) -> Option<&CatalogueEntry> {
        self.entries
            .iter()
            .find(|entry| eq_ignore_case(&entry.name, name))
    }

    /// Entries are keyed by exact name; a repeated name replaces the
    /// earlier entry in place.
    pub fn insert(&mut self, entry: CatalogueEntry) {
        match self.entries.iter_mut().find(|e| e.name == entry.name) {
            Some(existing) => {
                warnln!("Directory {} lists {} more than once", self.name, entry.name);
                *existing = entry;
            }
            None => self.entries.push(entry),
        }
    }

    /// Every entry in the tree in preorder, paired with the dot separated
    /// path of the directory holding it ("" for the root).
    pub fn file_tree(&self) -> Vec<(String, &CatalogueEntry)> {
        let mut tree = Vec::new();
        self.collect_tree(String::new(), &mut tree);
        tree
    }

    fn collect_tree<'a>(
        &'a self,
        parent: String,
        tree: &mut Vec<(String, &'a CatalogueEntry)>,
    ) {
        for entry in &self.entries {
            tree.push((parent.clone(), entry));
            if let Some(children) = entry.children() {
                let path = if parent.is_empty() {
                    entry.name.clone()
                } else {
                    format!("{}.{}", parent, entry.name)
                };
                children.collect_tree(path, tree);
            }
        }
    }
}

impl<'a> IntoIterator for &'a Catalogue {
    type Item = &'a CatalogueEntry;
    type IntoIter = core::slice::Iter<'a, CatalogueEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn read_entry<BDR: BlockDeviceRead + ?Sized>(
    dev: &mut BDR,
    layout: SectorLayout,
    record: &DirectoryRecord,
    depth: u32,
) -> Result<CatalogueEntry, ReadError<BDR::ReadError>> {
    let name = record.name_str();
    let sin = record.sin();

    let contents = if record.is_directory() {
        debugln!("[read_entry] Descending into {} at sector {}", name, sin);
        EntryContents::Directory(build_catalogue(dev, layout, sin, depth + 1)?)
    } else {
        let size = match AllocationMap::new(sin).total_size(dev, layout) {
            Ok(size) => Some(size),
            Err(_err) => {
                warnln!("Size of {} (sector {}) unavailable: {}", name, sin, _err);
                None
            }
        };
        EntryContents::File { size }
    };

    Ok(CatalogueEntry {
        name,
        load_address: record.load_address,
        exec_address: record.exec_address,
        access: record.access,
        date: record.date,
        sin,
        next_entry: record.next_entry(),
        contents,
    })
}

/// Decodes the directory whose allocation map starts at `sin`, recursing
/// into every subdirectory.
///
/// Records are visited by following the next-entry links from the header,
/// which skips the parent link in the first slot. A link pointing past the
/// end of the table ends the directory early without an error.
pub fn build_catalogue<BDR: BlockDeviceRead + ?Sized>(
    dev: &mut BDR,
    layout: SectorLayout,
    sin: u32,
    depth: u32,
) -> Result<Catalogue, ReadError<BDR::ReadError>> {
    if depth > MAX_DIRECTORY_DEPTH {
        return Err(ChainError::DirectoryTooDeep(sin).into());
    }

    let table = AllocationMap::new(sin).read_all(dev, layout)?;
    let header = table
        .get(..DIRECTORY_HEADER_SIZE)
        .and_then(|buf| <&[u8; DIRECTORY_HEADER_SIZE]>::try_from(buf).ok())
        .ok_or(FormatError::TruncatedDirectory(sin))?;
    let header = DirectoryHeader::deserialize(header).map_err(ReadError::DeserializationFailed)?;

    let mut catalogue = Catalogue::new(header.name_str(), sin);
    let entry_count = header.entry_count();
    debugln!(
        "[build_catalogue] Directory {} at sector {}: {} entries, depth {}",
        catalogue.name,
        sin,
        entry_count,
        depth
    );

    let mut pointer = header.first_entry() as usize;
    for i in 0..entry_count {
        if pointer == 0 {
            break;
        }

        let Some(buf) = table
            .get(pointer..pointer + DIRECTORY_RECORD_SIZE)
            .and_then(|buf| <&[u8; DIRECTORY_RECORD_SIZE]>::try_from(buf).ok())
        else {
            warnln!(
                "Record at offset {} overruns directory {} ({} bytes)",
                pointer,
                sin,
                table.len()
            );
            break;
        };

        let record = DirectoryRecord::deserialize(buf).map_err(ReadError::DeserializationFailed)?;
        traceln!("[build_catalogue] Record at offset {}: {:?}", pointer, record);

        let next = record.next_entry();
        catalogue.insert(read_entry(dev, layout, &record, depth)?);

        if i + 1 == entry_count && next != 0 {
            return Err(FormatError::FinalEntryLink { sin, next }.into());
        }

        if next as usize > table.len() {
            debugln!(
                "[build_catalogue] Link to offset {} leaves directory {}",
                next,
                sin
            );
            break;
        }

        pointer = next as usize;
    }

    Ok(catalogue)
}
