use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::error::DataLoadError;
use super::loader::load_file;
use super::model::Dataset;

// ---------------------------------------------------------------------------
// Dataset cache
// ---------------------------------------------------------------------------

/// Memoizes loaded datasets per path.
///
/// An entry is reused as long as the file's modification time is unchanged;
/// a newer (or unreadable) timestamp triggers a fresh load. Failed loads are
/// never cached.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

#[derive(Debug)]
struct CacheEntry {
    modified: Option<SystemTime>,
    dataset: Arc<Dataset>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, loading it on first access.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<Dataset>, DataLoadError> {
        let modified = modification_time(path);

        if let Some(entry) = self.entries.get(path) {
            if modified.is_some() && entry.modified == modified {
                log::debug!("Cache hit for {}", path.display());
                return Ok(Arc::clone(&entry.dataset));
            }
        }

        log::debug!("Cache miss for {}", path.display());
        let dataset = match load_file(path) {
            Ok(ds) => Arc::new(ds),
            Err(e) => {
                self.entries.remove(path);
                return Err(e);
            }
        };
        self.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                modified,
                dataset: Arc::clone(&dataset),
            },
        );
        Ok(dataset)
    }
}

fn modification_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
