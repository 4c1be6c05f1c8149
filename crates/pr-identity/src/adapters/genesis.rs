//! Genesis sources backed by a file or an in-memory string.

use crate::domain::GenesisError;
use crate::ports::GenesisSource;
use std::path::{Path, PathBuf};

/// Reads genesis from a JSON file.
#[derive(Debug, Clone)]
pub struct FileGenesisSource {
    path: PathBuf,
}

impl FileGenesisSource {
    /// Source at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Configured path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GenesisSource for FileGenesisSource {
    fn read_genesis(&self) -> Result<String, GenesisError> {
        std::fs::read_to_string(&self.path).map_err(|e| GenesisError::Unreadable {
            location: self.location(),
            reason: e.to_string(),
        })
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Genesis held in memory; `missing()` behaves like an absent file.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGenesisSource {
    contents: Option<String>,
}

impl InMemoryGenesisSource {
    /// Source returning `contents`.
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
        }
    }

    /// Source that always fails to read.
    pub fn missing() -> Self {
        Self { contents: None }
    }
}

impl GenesisSource for InMemoryGenesisSource {
    fn read_genesis(&self) -> Result<String, GenesisError> {
        self.contents.clone().ok_or_else(|| GenesisError::Unreadable {
            location: self.location(),
            reason: "no genesis record".to_string(),
        })
    }

    fn location(&self) -> String {
        "<memory>".to_string()
    }
}
