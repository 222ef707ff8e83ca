//! Configuration management for icon-dump
//!
//! Defaults mirror the command line behaviour: icons land in the current
//! directory at 48x48 unless told otherwise.

use crate::size::IconSize;
use std::path::{Path, PathBuf};

/// Environment variable overriding the output directory
pub const OUTPUT_DIR_ENV: &str = "ICON_DUMP_OUTPUT_DIR";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory the PNG is written to
    pub output_dir: PathBuf,

    /// Size used when no size flag is given
    pub default_size: IconSize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            default_size: IconSize::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the process environment
    ///
    /// Falls back to defaults for anything unset or empty.
    pub fn load() -> Self {
        Self::from_env_value(std::env::var_os(OUTPUT_DIR_ENV).map(PathBuf::from))
    }

    fn from_env_value(output_dir: Option<PathBuf>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = output_dir.filter(|d| !d.as_os_str().is_empty()) {
            log::debug!("{} set, writing to {:?}", OUTPUT_DIR_ENV, dir);
            config.output_dir = dir;
        }

        config
    }

    /// Full path for an output file name
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        if self.output_dir == Path::new(".") {
            PathBuf::from(file_name)
        } else {
            self.output_dir.join(file_name)
        }
    }
}
