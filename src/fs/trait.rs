//! FileSystem trait definition

use anyhow::Result;
use std::path::Path;

/// Read-only view of the file system used during version resolution
pub trait FileSystem: Send + Sync {
    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;
}
