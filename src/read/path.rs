use super::{Catalogue, CatalogueEntry};

/// Separates directory names in a path, `Dir.SubDir.File`
pub const PATH_SEPARATOR: char = '.';

/// Name of the root directory, accepted as an optional leading path segment
pub const ROOT_NAME: &str = "$";

/// Size and location of a file
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FileStat {
    /// `None` when the size could not be determined
    pub size: Option<u64>,
    pub sin: u32,
}

impl Catalogue {
    /// Finds the entry named by a dot separated path, ignoring case.
    ///
    /// Every segment before the last must name a directory. Returns `None`
    /// if any segment is missing or names a file too early. The root has no
    /// entry of its own, so a bare `$` also resolves to `None`; use
    /// [`Catalogue::is_dir`] to test for it.
    pub fn resolve(&self, path: &str) -> Option<&CatalogueEntry> {
        debugln!("[resolve] Called on {}", path);
        let path = path
            .strip_prefix(ROOT_NAME)
            .and_then(|rest| rest.strip_prefix(PATH_SEPARATOR))
            .unwrap_or(path);

        let mut directory = self;
        let mut segments = path.split(PATH_SEPARATOR).peekable();

        while let Some(segment) = segments.next() {
            let entry = directory.get(segment)?;
            traceln!("[resolve] Segment {} matched {}", segment, entry.name);

            if segments.peek().is_none() {
                return Some(entry);
            }

            directory = entry.children()?;
        }

        None
    }

    pub fn is_file(&self, path: &str) -> bool {
        self.resolve(path).is_some_and(CatalogueEntry::is_file)
    }

    /// True for `$`, the root, as well as any directory below it
    pub fn is_dir(&self, path: &str) -> bool {
        path == ROOT_NAME || self.resolve(path).is_some_and(CatalogueEntry::is_dir)
    }

    /// Size and SIN of the file at `path`; `None` for directories
    pub fn stat(&self, path: &str) -> Option<FileStat> {
        self.resolve(path)
            .filter(|entry| entry.is_file())
            .map(|entry| FileStat {
                size: entry.size(),
                sin: entry.sin,
            })
    }
}
