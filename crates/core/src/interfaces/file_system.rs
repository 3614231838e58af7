//! File system access used by the up-to-date check

use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Trait for the few file system queries the engine needs
pub trait FileSystem: Send + Sync {
    /// Whether `path` names an existing file (directories do not count)
    fn is_file(&self, path: &Path) -> bool;

    /// Last modification time of `path`
    fn modified_time(&self, path: &Path) -> io::Result<SystemTime>;
}
