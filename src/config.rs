use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Defaults shipped with the binary; keys and value types are checked by `build.rs`.
const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Markdown sources, walked recursively
    pub content_dir: PathBuf,
    /// Copied verbatim into the output directory
    pub static_dir: PathBuf,
    /// Wiped and regenerated on every build
    pub output_dir: PathBuf,
    pub template: PathBuf,
    /// Prefix for root-relative links when the site is served from a sub-path
    pub base_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            static_dir: PathBuf::from("static"),
            output_dir: PathBuf::from("public"),
            template: PathBuf::from("static/template.html"),
            base_path: "/".to_string(),
        }
    }
}

impl Config {
    /// The configuration embedded at compile time.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Load config from a TOML file, or return the compiled defaults if the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::compiled_default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
