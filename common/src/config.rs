//! # Configuration
//!
//! Settings may come from the command line, the environment, or a YAML file
//! (`~/.sglobal.yaml` by default). [`FileConfig`] is the on-disk shape and
//! [`Config`] the fully resolved settings a scan runs with.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_NAME: &str = ".sglobal.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// How results are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    #[default]
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "md" | "markdown" => Ok(Self::Markdown),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Markdown => "markdown",
        };
        f.write_str(name)
    }
}

/// Settings read from a YAML config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub region: Option<String>,
    pub exclude_file: Option<PathBuf>,
    pub output: Option<String>,
    pub profile: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Loads `explicit` if given, otherwise the default file in the home directory.
    ///
    /// A missing default file is not an error. Returns the path that was used.
    pub fn discover(explicit: Option<&Path>) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        Self::discover_in(explicit, dirs::home_dir().as_deref())
    }

    fn discover_in(
        explicit: Option<&Path>,
        home: Option<&Path>,
    ) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        if let Some(path) = explicit {
            return Ok(Some((path.to_path_buf(), Self::load(path)?)));
        }

        let Some(path) = home.map(|home| home.join(DEFAULT_CONFIG_NAME)) else {
            return Ok(None);
        };

        if !path.is_file() {
            return Ok(None);
        }

        let file = Self::load(&path)?;
        Ok(Some((path, file)))
    }
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Region selector: empty for the session default, `all`, or a region name.
    pub region: String,
    pub exclude_file: Option<PathBuf>,
    pub output: OutputFormat,
    /// Named provider profile, `None` for the provider's own default.
    pub profile: Option<String>,
    /// Upper bound for each provider call.
    pub call_timeout: Option<Duration>,
}
