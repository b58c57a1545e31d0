//! Harness configuration
//!
//! Settings come from three places, later ones winning:
//! built-in defaults, an optional `j2check.json` in the working directory,
//! and command-line flags.
//!
//! ```json
//! {
//!   "subject_name": "promptgen",
//!   "target_dir": "target",
//!   "scripts_dir": "scripts/structured_tests",
//!   "data_dir": "scripts/structured_data",
//!   "script_extension": "j2",
//!   "data_extension": "json"
//! }
//! ```

use crate::cli::Cli;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "j2check.json";

const DEFAULT_SUBJECT_NAME: &str = "promptgen";
const DEFAULT_TARGET_DIR: &str = "target";
const DEFAULT_SCRIPTS_DIR: &str = "scripts/structured_tests";
const DEFAULT_DATA_DIR: &str = "scripts/structured_data";
const DEFAULT_SCRIPT_EXTENSION: &str = "j2";
const DEFAULT_DATA_EXTENSION: &str = "json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file {path} does not exist")]
    Missing { path: PathBuf },

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Which prebuilt subject binary to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    #[default]
    Debug,
    Release,
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Debug => write!(f, "debug"),
            BuildMode::Release => write!(f, "release"),
        }
    }
}

impl FromStr for BuildMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(BuildMode::Debug),
            "release" => Ok(BuildMode::Release),
            _ => Err(format!("Invalid mode '{}'. Supported: debug, release", s)),
        }
    }
}

/// On-disk config file. Every field is optional.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub subject_name: Option<String>,
    pub target_dir: Option<PathBuf>,
    pub scripts_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub script_extension: Option<String>,
    pub data_extension: Option<String>,
}

impl ConfigFile {
    /// Load an explicitly requested config file. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::Missing {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the default config file if present, otherwise return an empty config
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(ConfigFile::default())
        }
    }
}

/// Where test scripts and their fixtures live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub scripts_dir: PathBuf,
    pub data_dir: PathBuf,
    /// Test script extension, without the leading dot
    pub script_extension: String,
    /// Fixture extension, without the leading dot
    pub data_extension: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            scripts_dir: PathBuf::from(DEFAULT_SCRIPTS_DIR),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            script_extension: DEFAULT_SCRIPT_EXTENSION.to_string(),
            data_extension: DEFAULT_DATA_EXTENSION.to_string(),
        }
    }
}

/// Fully resolved, immutable settings for one harness run
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Subject executable to invoke once per test
    pub subject: PathBuf,
    pub layout: Layout,
}

impl HarnessConfig {
    /// Resolve settings from command-line flags, reading the config file
    /// named by `--config` or the default one in the working directory
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::load_default()?,
        };
        Ok(Self::merge(file, cli.mode, cli.subject.clone()))
    }

    /// Combine a config file with the build mode and an optional explicit subject path
    pub fn merge(file: ConfigFile, mode: BuildMode, subject: Option<PathBuf>) -> Self {
        let defaults = Layout::default();
        let layout = Layout {
            scripts_dir: file.scripts_dir.unwrap_or(defaults.scripts_dir),
            data_dir: file.data_dir.unwrap_or(defaults.data_dir),
            script_extension: file
                .script_extension
                .map(|e| e.trim_start_matches('.').to_string())
                .unwrap_or(defaults.script_extension),
            data_extension: file
                .data_extension
                .map(|e| e.trim_start_matches('.').to_string())
                .unwrap_or(defaults.data_extension),
        };

        let subject = subject.unwrap_or_else(|| {
            let target_dir = file
                .target_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TARGET_DIR));
            let name = file
                .subject_name
                .unwrap_or_else(|| DEFAULT_SUBJECT_NAME.to_string());
            subject_path(&target_dir, mode, &name)
        });

        Self { subject, layout }
    }
}

/// Returns the prebuilt subject path: `<target_dir>/<mode>/<name>`
pub fn subject_path(target_dir: &Path, mode: BuildMode, name: &str) -> PathBuf {
    target_dir
        .join(mode.to_string())
        .join(format!("{}{}", name, std::env::consts::EXE_SUFFIX))
}
