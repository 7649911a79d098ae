use super::domain::CallRecord;
use super::importer::{CallLogImportError, CallLogImporter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::debug;

/// Identity of one version of a call log on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceKey {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl SourceKey {
    pub fn for_path(path: &Path) -> Result<Self, std::io::Error> {
        let metadata = std::fs::metadata(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            modified: metadata.modified().ok(),
            len: metadata.len(),
        })
    }
}

/// Memoizes the last call log loaded by its owner.
///
/// A session is owned by a single report run or server state; it is never
/// shared between unrelated sources. A changed path, modification time or
/// size triggers a reload.
#[derive(Debug, Default)]
pub struct CallLogSession {
    cached: Option<(SourceKey, Arc<[CallRecord]>)>,
}

impl CallLogSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, path: &Path) -> Result<Arc<[CallRecord]>, CallLogImportError> {
        let key = SourceKey::for_path(path)?;

        if let Some((cached_key, records)) = &self.cached {
            if *cached_key == key {
                debug!(path = %path.display(), "call log cache hit");
                return Ok(Arc::clone(records));
            }
        }

        debug!(path = %path.display(), "call log cache miss");
        let records: Arc<[CallRecord]> = CallLogImporter::from_path(path)?.into();
        self.cached = Some((key, Arc::clone(&records)));
        Ok(records)
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub fn cached_key(&self) -> Option<&SourceKey> {
        self.cached.as_ref().map(|(key, _)| key)
    }
}
