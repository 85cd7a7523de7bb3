//! Durable document store on the local file system
//!
//! Each counter space lives in `<dir>/<space>.json`, guarded by an exclusive
//! advisory lock on `<dir>/<space>.lock`. A compare-and-swap holds that lock
//! across read, compare and write, so any number of handles (in this process
//! or another) sharing the directory commit each version at most once.
//!
//! Writes go to a uniquely named temp file in the same directory which is
//! synced and then renamed over the document, so lock-free readers observe
//! either the old or the new document and never a torn one.

use super::DocumentStore;
use crate::document::CounterDocument;
use crate::error::StoreError;
use crate::space::CounterSpace;
use async_trait::async_trait;
use fs4::fs_std::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// File-backed document store
///
/// Handles opened on the same directory arbitrate through OS file locks.
/// Within one handle an async lock keeps swaps from queueing on blocking
/// threads.
#[derive(Debug)]
pub struct FileDocumentStore {
    dir: Arc<PathBuf>,
    write_lock: Mutex<()>,
}

impl FileDocumentStore {
    /// Open (and create if needed) a store rooted at `dir`
    ///
    /// # Errors
    /// Returns an IO error if the directory cannot be created
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::io_error(&dir, e))?;
        tracing::debug!(dir = %dir.display(), "opened file counter store");
        Ok(Self {
            dir: Arc::new(dir),
            write_lock: Mutex::new(()),
        })
    }

    /// Root directory
    #[inline]
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document for `space`
    #[must_use]
    pub fn document_path(&self, space: CounterSpace) -> PathBuf {
        document_path(&self.dir, space)
    }

    /// Path of the lock file guarding `space`
    #[must_use]
    pub fn lock_path(&self, space: CounterSpace) -> PathBuf {
        self.dir.join(format!("{}.lock", space.as_str()))
    }
}

fn document_path(dir: &Path, space: CounterSpace) -> PathBuf {
    dir.join(format!("{}.json", space.as_str()))
}

fn read_document(path: &Path) -> Result<Option<CounterDocument>, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io_error(path, e)),
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| StoreError::Corrupt {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

fn write_document(dir: &Path, path: &Path, doc: &CounterDocument) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(doc).map_err(|e| StoreError::Corrupt {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".counter-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| StoreError::io_error(dir, e))?;
    tmp.write_all(&bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| StoreError::io_error(tmp.path(), e))?;
    tmp.persist(path)
        .map(drop)
        .map_err(|e| StoreError::io_error(path, e.error))
}

fn lock_exclusive(lock_path: &Path) -> Result<File, StoreError> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(lock_path)
        .map_err(|e| StoreError::io_error(lock_path, e))?;
    file.lock_exclusive()
        .map_err(|e| StoreError::io_error(lock_path, e))?;
    Ok(file)
}

/// Read, compare and write under the space's file lock
fn swap_locked(
    dir: &Path,
    lock_path: &Path,
    space: CounterSpace,
    expected_version: u64,
    next: &CounterDocument,
) -> Result<(), StoreError> {
    // Released when the handle closes
    let _lock = lock_exclusive(lock_path)?;

    let path = document_path(dir, space);
    let found = read_document(&path)?.map_or(0, |doc| doc.version);
    if found != expected_version {
        return Err(StoreError::Conflict {
            space,
            expected: expected_version,
            found,
        });
    }
    write_document(dir, &path, next)
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn load(&self, space: CounterSpace) -> Result<Option<CounterDocument>, StoreError> {
        let path = self.document_path(space);
        tokio::task::spawn_blocking(move || read_document(&path))
            .await
            .map_err(|e| StoreError::Unavailable(format!("counter read task failed: {e}")))?
    }

    async fn compare_and_swap(
        &self,
        space: CounterSpace,
        expected_version: u64,
        next: CounterDocument,
    ) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let dir = Arc::clone(&self.dir);
        let lock_path = self.lock_path(space);

        tokio::task::spawn_blocking(move || {
            swap_locked(&dir, &lock_path, space, expected_version, &next)
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("counter write task failed: {e}")))?
    }
}
