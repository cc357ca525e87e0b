//! Table Cache Module
//! Memoizes loaded tables per path, invalidated by file modification time.

use crate::data::loader::{LoadError, TariffLoader};
use crate::data::table::TariffTable;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

struct CachedTable {
    modified: SystemTime,
    table: Arc<TariffTable>,
}

/// Path-keyed cache of loaded tables.
///
/// Tables are immutable once loaded, so the `Arc` can be handed to any number
/// of readers. Failed loads are not cached.
#[derive(Default)]
pub struct TableCache {
    entries: HashMap<PathBuf, CachedTable>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `path`, reloading if the file changed since.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<TariffTable>, LoadError> {
        let modified = std::fs::metadata(path).and_then(|m| m.modified()).ok();

        if let (Some(modified), Some(entry)) = (modified, self.entries.get(path)) {
            if entry.modified == modified {
                tracing::debug!(path = %path.display(), "tariff table cache hit");
                return Ok(Arc::clone(&entry.table));
            }
        }

        tracing::debug!(path = %path.display(), "tariff table cache miss");
        match TariffLoader::load(path) {
            Ok(table) => {
                let table = Arc::new(table);
                // Without a modification time there is nothing to validate against.
                if let Some(modified) = modified {
                    self.entries.insert(
                        path.to_path_buf(),
                        CachedTable {
                            modified,
                            table: Arc::clone(&table),
                        },
                    );
                }
                Ok(table)
            }
            Err(e) => {
                self.entries.remove(path);
                Err(e)
            }
        }
    }

    /// Drop the entry for `path`, forcing the next call to reload.
    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
