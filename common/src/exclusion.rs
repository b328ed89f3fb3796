//! Security group ids the user asked to leave out of a scan.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
#[error("failed to read exclude file {path}: {source}")]
pub struct ExclusionError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    ids: HashSet<String>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one id per line. Blank lines and `#` comments are skipped.
    pub fn parse(content: &str) -> Self {
        let ids = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(String::from)
            .collect();

        Self { ids }
    }

    /// Reads the exclusion file at `path`, or returns an empty set when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ExclusionError> {
        let Some(path) = path else {
            return Ok(Self::new());
        };

        let content = std::fs::read_to_string(path).map_err(|source| ExclusionError {
            path: path.to_path_buf(),
            source,
        })?;

        let set = Self::parse(&content);
        debug!("Loaded {} excluded security groups from {}", set.len(), path.display());
        Ok(set)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
