//! File storage for puzzle inputs, fixtures and generated sources
//!
//! Paths handed to a [`Storage`] are relative to the project root (see
//! [`crate::layout`]). Write-once semantics are left to callers, which check
//! [`Storage::exists`] first and treat an existing file as a no-op.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Minimal file store used by the fetcher and the template generator
pub trait Storage {
    /// Whether a file is present at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Create or replace the file at `path`, creating parent directories
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        (**self).write(path, contents)
    }
}

/// Storage backed by a directory on disk
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute (or root-relative) location of a project path
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl Storage for FsStorage {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(full, contents)
    }
}

/// In-memory storage, for exercising write-once rules without a filesystem
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: RefCell<BTreeMap<PathBuf, String>>,
    writes: RefCell<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file without counting it as a write
    pub fn with_file(self, path: impl Into<PathBuf>, contents: &str) -> Self {
        self.files
            .borrow_mut()
            .insert(path.into(), contents.to_string());
        self
    }

    /// Number of `write` calls made so far
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }

    pub fn get(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }
}

impl Storage for MemoryStorage {
    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        *self.writes.borrow_mut() += 1;
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fs_roundtrip_creates_parents() {
        let temp = TempDir::new().unwrap();
        let storage = FsStorage::new(temp.path());
        let path = Path::new("inputs/day01.txt");

        assert!(!storage.exists(path));
        storage.write(path, "test input\nline 2\n").unwrap();

        assert!(storage.exists(path));
        assert!(temp.path().join("inputs").is_dir());
        assert_eq!(
            fs::read_to_string(storage.resolve(path)).unwrap(),
            "test input\nline 2\n"
        );
    }

    #[test]
    fn test_fs_write_replaces_existing() {
        let temp = TempDir::new().unwrap();
        let storage = FsStorage::new(temp.path());
        let path = Path::new("inputs/day02.txt");

        storage.write(path, "old").unwrap();
        storage.write(path, "new").unwrap();
        assert_eq!(fs::read_to_string(temp.path().join(path)).unwrap(), "new");
        assert!(!storage.exists(Path::new("inputs/day03.txt")));
    }

    #[test]
    fn test_memory_counts_writes() {
        let storage = MemoryStorage::new().with_file("src/day01.c", "seed");
        assert_eq!(storage.write_count(), 0);
        assert!(storage.exists(Path::new("src/day01.c")));

        storage.write(Path::new("inputs/day01_test.txt"), "").unwrap();
        assert_eq!(storage.write_count(), 1);
        assert_eq!(storage.get(Path::new("inputs/day01_test.txt")).as_deref(), Some(""));
    }

    #[test]
    fn test_storage_by_reference() {
        let storage = MemoryStorage::new();
        let by_ref: &MemoryStorage = &storage;
        by_ref.write(Path::new("a.txt"), "a").unwrap();
        assert!(storage.exists(Path::new("a.txt")));
    }
}
