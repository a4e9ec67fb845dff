// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! File access used by the converter.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Trait for file access implementations.
///
/// The converter only needs to check for, read, create and remove files, so
/// it works the same against the local disk or an in-memory map.
pub trait FileStore {
    /// Whether `path` exists
    fn exists(&self, path: &Path) -> bool;

    /// Read `path` as text lines, without line terminators
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Create or overwrite `path` with `contents`
    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()>;

    /// Delete `path`
    fn remove(&mut self, path: &Path) -> io::Result<()>;
}

/// Local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl FileStore for LocalStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        let text = fs::read_to_string(path)?;
        Ok(text.lines().map(str::to_string).collect())
    }

    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }

    fn remove(&mut self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

/// In-memory file map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file
    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Contents of a file, if present
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    /// Number of files held
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the store holds no files
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileStore for MemoryStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        self.files
            .get(path)
            .map(|text| text.lines().map(str::to_string).collect())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{}", path.display())))
    }

    fn write(&mut self, path: &Path, contents: &str) -> io::Result<()> {
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn remove(&mut self, path: &Path) -> io::Result<()> {
        self.files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{}", path.display())))
    }
}
