//! Error types for scanning and rendering content

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading the content tree
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid name: {0:?}")]
    InvalidName(String),
}

impl ContentError {
    /// Classify an I/O error, keeping absence distinct from other failures
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            ContentError::NotFound(path.to_path_buf())
        } else {
            ContentError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    /// Whether the caller should answer with a not-found response
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ContentError::NotFound(_) | ContentError::InvalidName(_)
        )
    }
}

/// Errors raised inside the Markdown pipeline
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Cannot resolve media paths against {}", .0.display())]
    InvalidContext(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_io_not_found_is_classified() {
        let err = ContentError::io(
            Path::new("/missing"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, ContentError::NotFound(_)));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_io_other_is_not_not_found() {
        let err = ContentError::io(
            Path::new("/locked"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("/locked"));
    }
}
