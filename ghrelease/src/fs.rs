use std::io;
use std::path::Path;

/// Read-only filesystem access used for the changelog.
pub trait FileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Reads from the local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}
