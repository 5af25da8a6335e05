//! Configuration parsing and management.

use crate::index::{IndexSource, PathList};
use crate::pipeline::TocSettings;
use crate::search::Highlight;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Deepest markdown heading level
pub const MAX_HEADING_DEPTH: u8 = 6;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid heading depths: min_depth {min} and max_depth {max} must satisfy 1 <= min <= max <= 6")]
    InvalidDepth { min: u8, max: u8 },
}

/// Main configuration struct matching the tocsearch.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the markdown sources
    #[serde(default = "default_root")]
    pub root: PathBuf,

    #[serde(default)]
    pub paths: Option<PathList>,

    /// Page whose links enumerate the pages to index
    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default = "default_min_depth", alias = "minDepth")]
    pub min_depth: u8,

    #[serde(default = "default_max_depth", alias = "maxDepth")]
    pub max_depth: u8,

    #[serde(default)]
    pub highlight: Highlight,

    // Path to the config file, for relative path resolution
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_root() -> PathBuf {
    PathBuf::from("docs")
}

fn default_min_depth() -> u8 {
    1
}

fn default_max_depth() -> u8 {
    MAX_HEADING_DEPTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            paths: None,
            summary: None,
            min_depth: default_min_depth(),
            max_depth: default_max_depth(),
            highlight: Highlight::default(),
            config_path: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // An empty file is a valid, all-defaults config
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.min_depth, self.max_depth);
        if min < 1 || max > MAX_HEADING_DEPTH || min > max {
            return Err(ConfigError::InvalidDepth { min, max });
        }
        Ok(())
    }

    /// Get the docs root, resolved relative to the config file
    pub fn root_dir(&self) -> PathBuf {
        self.resolve_path(&self.root)
    }

    pub fn toc_settings(&self) -> TocSettings {
        TocSettings {
            min_depth: self.min_depth,
            max_depth: self.max_depth,
        }
    }

    /// Where the pages to index come from; explicit paths win
    pub fn source(&self) -> IndexSource {
        IndexSource::from_parts(self.paths.clone(), self.summary.clone())
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.config_path.as_ref().and_then(|p| p.parent()) {
            Some(parent) => parent.join(path),
            None => path.to_path_buf(),
        }
    }
}
