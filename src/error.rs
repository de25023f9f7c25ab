use std::path::PathBuf;

use thiserror::Error;

use crate::data::resolver::DataFormat;

/// Errors surfaced by dataset resolution and loading.
///
/// Every failure here is deterministic for a given filesystem state, so
/// none of them is worth retrying; they are raised once and end the call.
#[derive(Debug, Error)]
pub enum DataError {
    /// No file matched the requested dataset/format combination.  Lists
    /// every candidate path that was checked so the caller can see exactly
    /// where the file was expected.
    #[error("no data file found for dataset '{dataset}' (tried: {})", join_paths(.attempted))]
    DatasetNotFound {
        dataset: String,
        attempted: Vec<PathBuf>,
    },

    /// A format token outside the closed enumeration (csv, json, xlsx, auto).
    #[error("unsupported data format: '{0}'")]
    InvalidFormat(String),

    /// Spreadsheet support was requested but not compiled in.  Distinct
    /// from [`DataError::DatasetNotFound`] so a build problem is never
    /// mistaken for a missing file.
    #[error("{format} support is not available; rebuild with the 'xlsx' feature enabled")]
    DependencyMissing { format: DataFormat },

    /// The file exists but cannot be parsed per its declared format.
    #[error("malformed data file {}: {reason}", .path.display())]
    Malformed {
        path: PathBuf,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The file exists but could not be read.
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DataError {
    /// Wrap an underlying parser error as [`DataError::Malformed`].
    pub(crate) fn malformed(
        path: impl Into<PathBuf>,
        reason: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        DataError::Malformed {
            path: path.into(),
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }

    /// A [`DataError::Malformed`] with no underlying library error, for
    /// structural problems we detect ourselves (e.g. a non-object row).
    pub(crate) fn malformed_at(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        DataError::Malformed {
            path: path.into(),
            reason: reason.into(),
            source: None,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::Io {
            path: path.into(),
            source,
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
