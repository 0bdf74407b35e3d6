//! File-based payload source.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::PayloadSource;

/// A payload stored in a file, usually written by a collection agent.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PayloadSource for FileSource {
    fn read(&mut self) -> Result<String> {
        fs::read_to_string(&self.path)
            .with_context(|| format!("Read error: {}", self.path.display()))
    }

    fn description(&self) -> &str {
        &self.description
    }
}
