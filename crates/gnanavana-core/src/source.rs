//! Content sources: where the repository reads its files from.
//!
//! A source is a flat list of named byte blobs. The repository only ever
//! asks for the listing once and reads each blob at most once.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::ContentError;

// ---------------------------------------------------------------------------
// Content source trait
// ---------------------------------------------------------------------------

/// Trait for anything that can hand out quiz content files by name.
pub trait ContentSource: Send + Sync {
    /// Human-readable description (e.g. the directory path).
    fn describe(&self) -> String;

    /// Names of candidate content files, in a stable order.
    fn list(&self) -> Result<Vec<String>, ContentError>;

    /// Raw contents of one named file.
    fn read(&self, name: &str) -> Result<Vec<u8>, ContentError>;
}

// ---------------------------------------------------------------------------
// Directory source
// ---------------------------------------------------------------------------

/// Reads `.json` files from a directory tree on disk.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collect(&self, dir: &Path, out: &mut Vec<String>) -> Result<(), ContentError> {
        let entries = std::fs::read_dir(dir).map_err(|e| ContentError::Io {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| ContentError::Io {
                path: dir.display().to_string(),
                message: e.to_string(),
            })?;
            let path = entry.path();

            if path.is_dir() {
                self.collect(&path, out)?;
            } else if path.extension().is_some_and(|ext| ext == "json") {
                if let Ok(relative) = path.strip_prefix(&self.root) {
                    let name = relative
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("/");
                    out.push(name);
                }
            }
        }
        Ok(())
    }
}

impl ContentSource for DirectorySource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn list(&self) -> Result<Vec<String>, ContentError> {
        if !self.root.is_dir() {
            return Err(ContentError::ContentNotFound(self.describe()));
        }
        let mut names = Vec::new();
        self.collect(&self.root, &mut names)?;
        names.sort();
        tracing::debug!("found {} content file(s) in {}", names.len(), self.describe());
        Ok(names)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, ContentError> {
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(ContentError::ContentNotFound(path.display().to_string()));
        }
        std::fs::read(&path).map_err(|e| ContentError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// In-memory source
// ---------------------------------------------------------------------------

/// Serves content from memory, preserving insertion order.
///
/// Counts reads so callers can check that a repository does not re-read.
#[derive(Debug, Default)]
pub struct MemorySource {
    files: Vec<(String, Vec<u8>)>,
    index: BTreeMap<String, usize>,
    read_count: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a named file.
    pub fn with_file(mut self, name: &str, content: impl Into<Vec<u8>>) -> Self {
        let content = content.into();
        match self.index.get(name) {
            Some(&i) => self.files[i].1 = content,
            None => {
                self.index.insert(name.to_string(), self.files.len());
                self.files.push((name.to_string(), content));
            }
        }
        self
    }

    /// Number of `read` calls served so far.
    pub fn read_count(&self) -> usize {
        self.read_count.load(Ordering::Relaxed)
    }
}

impl ContentSource for MemorySource {
    fn describe(&self) -> String {
        format!("memory ({} files)", self.files.len())
    }

    fn list(&self) -> Result<Vec<String>, ContentError> {
        Ok(self.files.iter().map(|(name, _)| name.clone()).collect())
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, ContentError> {
        self.read_count.fetch_add(1, Ordering::Relaxed);
        self.index
            .get(name)
            .map(|&i| self.files[i].1.clone())
            .ok_or_else(|| ContentError::ContentNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_source_lists_json_recursively() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested/c.json"), "{}").unwrap();

        let source = DirectorySource::new(dir.path());
        let names = source.list().unwrap();
        assert_eq!(names, vec!["a.json", "b.json", "nested/c.json"]);
        assert_eq!(source.read("nested/c.json").unwrap(), b"{}");
    }

    #[test]
    fn directory_source_missing_dir() {
        let source = DirectorySource::new("/definitely/not/here");
        assert!(matches!(source.list(), Err(ContentError::ContentNotFound(_))));
    }

    #[test]
    fn directory_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path());
        assert!(matches!(
            source.read("gone.json"),
            Err(ContentError::ContentNotFound(_))
        ));
    }

    #[test]
    fn memory_source_counts_reads() {
        let source = MemorySource::new()
            .with_file("x.json", "1")
            .with_file("y.json", "2")
            .with_file("x.json", "3");
        assert_eq!(source.list().unwrap(), vec!["x.json", "y.json"]);
        assert_eq!(source.read("x.json").unwrap(), b"3");
        assert!(source.read("z.json").is_err());
        assert_eq!(source.read_count(), 2);
    }
}
