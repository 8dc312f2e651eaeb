//! Filesystem access for the content tree
//!
//! The scanner only ever lists directories and reads whole files. Both go
//! through [`ContentFs`] so every read is an independent await point and the
//! backing store can be swapped out.

use std::future::Future;
use std::path::Path;

use super::ContentError;

/// Type tag of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Other,
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Lowercased extension without the dot
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }
}

/// Read-only view of the content root
pub trait ContentFs: Send + Sync {
    /// List a directory in the order the filesystem returns it
    fn read_dir(
        &self,
        path: &Path,
    ) -> impl Future<Output = Result<Vec<DirEntry>, ContentError>> + Send;

    /// Read a whole file as UTF-8 text
    fn read_to_string(
        &self,
        path: &Path,
    ) -> impl Future<Output = Result<String, ContentError>> + Send;

    /// Create a directory and its parents if missing
    fn create_dir_all(&self, path: &Path) -> impl Future<Output = Result<(), ContentError>> + Send;
}

/// [`ContentFs`] backed by the local disk through `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl ContentFs for LocalFs {
    async fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>, ContentError> {
        let mut reader = tokio::fs::read_dir(path)
            .await
            .map_err(|e| ContentError::io(path, e))?;

        let mut entries = Vec::new();
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|e| ContentError::io(path, e))?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            let kind = match entry.file_type().await {
                Ok(ft) if ft.is_symlink() => match tokio::fs::metadata(entry.path()).await {
                    Ok(meta) if meta.is_dir() => EntryKind::Directory,
                    Ok(meta) if meta.is_file() => EntryKind::File,
                    _ => EntryKind::Other,
                },
                Ok(ft) if ft.is_dir() => EntryKind::Directory,
                Ok(ft) if ft.is_file() => EntryKind::File,
                Ok(_) => EntryKind::Other,
                Err(e) => {
                    tracing::debug!("Cannot stat {:?}: {}", entry.path(), e);
                    EntryKind::Other
                }
            };
            entries.push(DirEntry { name, kind });
        }

        Ok(entries)
    }

    async fn read_to_string(&self, path: &Path) -> Result<String, ContentError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ContentError::io(path, e))
    }

    async fn create_dir_all(&self, path: &Path) -> Result<(), ContentError> {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| ContentError::io(path, e))
    }
}
