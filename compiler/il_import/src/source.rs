//! Where module text comes from.

use std::io;
use std::path::Path;

/// Reads module source for the import workers.
pub trait ModuleSource: Send + Sync {
    fn read(&self, path: &Path) -> io::Result<String>;
}

/// The file system.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsSource;

impl ModuleSource for FsSource {
    fn read(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}
