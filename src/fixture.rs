//! Fixture lookup
//!
//! A test script may have a companion JSON file holding the data it renders
//! against. The fixture path is derived from the script path alone:
//!
//! `scripts/structured_tests/foo.j2` -> `scripts/structured_data/foo.json`
//!
//! Scripts under the configured scripts directory map to the same relative
//! path under the data directory. Scripts elsewhere (a `--test` path) fall
//! back to swapping the scripts directory's name for the data directory's.

use crate::config::Layout;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Maps test script paths to their optional fixture files
#[derive(Debug, Clone)]
pub struct FixtureResolver {
    scripts_dir: PathBuf,
    data_dir: PathBuf,
    script_segment: OsString,
    data_segment: OsString,
    data_extension: String,
}

impl FixtureResolver {
    pub fn new(layout: &Layout) -> Self {
        Self {
            scripts_dir: layout.scripts_dir.clone(),
            data_dir: layout.data_dir.clone(),
            script_segment: last_segment(&layout.scripts_dir),
            data_segment: last_segment(&layout.data_dir),
            data_extension: layout.data_extension.clone(),
        }
    }

    /// Candidate fixture path for a script, whether or not it exists.
    pub fn candidate(&self, script: &Path) -> PathBuf {
        let mut path = match script.strip_prefix(&self.scripts_dir) {
            Ok(rest) => self.data_dir.join(rest),
            Err(_) => self.swap_segments(script),
        };
        path.set_extension(&self.data_extension);
        path
    }

    /// Replace every component naming the scripts directory with the data
    /// directory's name
    fn swap_segments(&self, script: &Path) -> PathBuf {
        script
            .components()
            .map(|component| match component {
                Component::Normal(name) if name == self.script_segment.as_os_str() => {
                    Component::Normal(self.data_segment.as_os_str())
                }
                other => other,
            })
            .collect()
    }

    /// The fixture for a script, or `None` if there isn't one
    pub fn resolve(&self, script: &Path) -> Option<PathBuf> {
        let candidate = self.candidate(script);
        if candidate.is_file() {
            tracing::debug!(fixture = %candidate.display(), "using fixture");
            Some(candidate)
        } else {
            None
        }
    }
}

fn last_segment(dir: &Path) -> OsString {
    dir.file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| dir.as_os_str().to_os_string())
}
