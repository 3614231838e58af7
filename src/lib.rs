//! Shared fixtures for the workspace integration tests

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// File name the CLI opens by default
pub const PROJECT_FILE: &str = "project.json";

/// A temporary project directory with files at controlled modification times
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write a file, creating parent directories
    pub fn write(&self, relative: &str, contents: &str) -> io::Result<PathBuf> {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Create (if needed) a file whose modification time is `secs` after the epoch
    pub fn touch_at(&self, relative: &str, secs: u64) -> io::Result<PathBuf> {
        let path = self.join(relative);
        if !path.exists() {
            self.write(relative, "")?;
        }
        File::options()
            .write(true)
            .open(&path)?
            .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000 + secs))?;
        Ok(path)
    }

    /// Write `document` as the fixture's project file
    pub fn write_project(&self, document: &serde_json::Value) -> io::Result<PathBuf> {
        let contents = serde_json::to_string_pretty(document).map_err(io::Error::other)?;
        self.write(PROJECT_FILE, &contents)
    }
}
