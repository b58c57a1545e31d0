//! Test script discovery
//!
//! A test unit is one template script in the scripts directory whose file
//! name ends with the script extension. Nothing else is filtered out.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscoverError {
    #[error("Failed to read test directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// One template script, identified by its path
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestUnit {
    pub script_path: PathBuf,
}

impl TestUnit {
    pub fn new(script_path: impl Into<PathBuf>) -> Self {
        Self {
            script_path: script_path.into(),
        }
    }
}

impl fmt::Display for TestUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.script_path.display())
    }
}

/// List every test unit in `dir`, sorted by path.
///
/// A missing or unreadable directory is an error; the caller is expected
/// to abort rather than run a partial suite.
pub fn discover(dir: &Path, extension: &str) -> Result<Vec<TestUnit>, DiscoverError> {
    let read_err = |source| DiscoverError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let suffix = format!(".{}", extension);
    let mut units = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let name = entry.file_name();
        if name.to_string_lossy().ends_with(&suffix) {
            units.push(TestUnit::new(dir.join(name)));
        }
    }

    units.sort();
    tracing::debug!(dir = %dir.display(), count = units.len(), "discovered tests");
    Ok(units)
}
