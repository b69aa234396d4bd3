//! Test utilities for building temporary directory trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs::{self, File, Permissions};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

const SECONDS_PER_DAY: u64 = 86_400;

/// A temporary directory tree for testing.
///
/// The tree is automatically cleaned up when dropped.
pub struct TestTree {
    dir: TempDir,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file with `size` bytes of content.
    ///
    /// Creates parent directories as needed.
    pub fn add_file(&self, path: &str, size: usize) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, vec![b'x'; size]).expect("Failed to write file");
        full_path
    }

    /// Add a file whose modification time is `days` days in the past.
    pub fn add_file_aged(&self, path: &str, size: usize, days: u64) -> PathBuf {
        let full_path = self.add_file(path, size);
        let mtime = SystemTime::now() - Duration::from_secs(days * SECONDS_PER_DAY);
        File::options()
            .write(true)
            .open(&full_path)
            .and_then(|f| f.set_modified(mtime))
            .expect("Failed to set mtime");
        full_path
    }

    /// Add a file with the given permission bits.
    pub fn add_file_with_mode(&self, path: &str, size: usize, mode: u32) -> PathBuf {
        let full_path = self.add_file(path, size);
        fs::set_permissions(&full_path, Permissions::from_mode(mode))
            .expect("Failed to set permissions");
        full_path
    }

    /// Create an empty directory.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}
