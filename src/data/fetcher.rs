//! Resource fetching.

use super::LoaderError;
use std::fs;
use std::path::{Path, PathBuf};

/// Source of raw CSV text, addressed by a location string.
///
/// Implementations must be shareable across threads since both resources are
/// fetched concurrently.
pub trait ResourceFetcher: Send + Sync {
    fn fetch(&self, location: &str) -> Result<String, LoaderError>;
}

/// Reads resources from the local filesystem, relative to a base directory.
#[derive(Debug, Clone)]
pub struct FsFetcher {
    base_dir: PathBuf,
}

impl FsFetcher {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn resolve(&self, location: &str) -> PathBuf {
        let path = Path::new(location);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

impl Default for FsFetcher {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ResourceFetcher for FsFetcher {
    fn fetch(&self, location: &str) -> Result<String, LoaderError> {
        let path = self.resolve(location);
        tracing::debug!(path = %path.display(), "reading resource");
        fs::read_to_string(&path).map_err(|source| LoaderError::ResourceUnavailable {
            location: location.to_string(),
            source,
        })
    }
}
