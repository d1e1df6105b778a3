use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Trait for filesystem operations to enable testing with mocks
pub trait FileSystem: Send + Sync {
    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write string contents to file, creating missing parent directories
    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Check if path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;
}

/// Real filesystem implementation using std::fs
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).with_context(|| format!("{}", path.display()))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create parent directory: {}", parent.display()))?;
        }

        std::fs::write(path, contents).with_context(|| format!("{}", path.display()))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Mock filesystem implementation for testing (in-memory)
#[allow(dead_code)]
pub struct MockFileSystem {
    files: Arc<RwLock<HashMap<PathBuf, String>>>,
    directories: Arc<RwLock<HashSet<PathBuf>>>,
    read_only: Arc<RwLock<HashSet<PathBuf>>>,
}

#[allow(dead_code)]
impl MockFileSystem {
    /// Create new empty mock filesystem
    pub fn new() -> Self {
        Self {
            files: Arc::new(RwLock::new(HashMap::new())),
            directories: Arc::new(RwLock::new(HashSet::new())),
            read_only: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Seed a file, as if it already existed on disk
    pub fn add_file(&self, path: impl Into<PathBuf>, contents: &str) {
        self.files
            .write()
            .unwrap()
            .insert(path.into(), contents.to_string());
    }

    /// Make writes below `path` fail
    pub fn deny_writes(&self, path: impl Into<PathBuf>) {
        self.read_only.write().unwrap().insert(path.into());
    }

    /// Get captured file contents for testing assertions
    pub fn get_file_contents(&self, path: &Path) -> Option<String> {
        self.files.read().unwrap().get(path).cloned()
    }

    /// Check if file was written
    pub fn has_file(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path)
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .with_context(|| format!("File not found in mock filesystem: {}", path.display()))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        if self
            .read_only
            .read()
            .unwrap()
            .iter()
            .any(|denied| path.starts_with(denied))
        {
            anyhow::bail!("Permission denied: {}", path.display());
        }

        let mut current = path;
        while let Some(parent) = current.parent() {
            self.directories.write().unwrap().insert(parent.to_path_buf());
            current = parent;
        }

        self.files
            .write()
            .unwrap()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.directories.read().unwrap().contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_write_registers_parents() {
        let fs = MockFileSystem::new();
        fs.write(Path::new("/out/nested/plan.txt"), "text").unwrap();

        assert!(fs.has_file(Path::new("/out/nested/plan.txt")));
        assert!(fs.is_dir(Path::new("/out/nested")));
        assert!(fs.exists(Path::new("/out")));
    }

    #[test]
    fn test_mock_denied_write_fails() {
        let fs = MockFileSystem::new();
        fs.deny_writes("/locked");

        assert!(fs.write(Path::new("/locked/plan.txt"), "text").is_err());
        assert!(!fs.has_file(Path::new("/locked/plan.txt")));
    }

    #[test]
    fn test_real_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a").join("b").join("plan.txt");

        RealFileSystem.write(&target, "hello").unwrap();

        assert_eq!(RealFileSystem.read_to_string(&target).unwrap(), "hello");
    }

    #[test]
    fn test_real_read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();

        assert!(RealFileSystem.read_to_string(&dir.path().join("missing.json")).is_err());
        assert!(!RealFileSystem.exists(&dir.path().join("missing.json")));
    }
}
