use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use walkdir::WalkDir;

use crate::config::DataConfig;
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Formats
// ---------------------------------------------------------------------------

/// A concrete dataset file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Csv,
    Json,
    Xlsx,
}

impl DataFormat {
    /// Auto-detection candidates, tried strictly in this order.  An
    /// explicit array rather than map/set iteration keeps the precedence
    /// deterministic across platforms.
    pub const DETECTION_ORDER: [DataFormat; 3] =
        [DataFormat::Csv, DataFormat::Json, DataFormat::Xlsx];

    pub fn extension(self) -> &'static str {
        match self {
            DataFormat::Csv => "csv",
            DataFormat::Json => "json",
            DataFormat::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for DataFormat {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(DataFormat::Csv),
            "json" => Ok(DataFormat::Json),
            "xlsx" => Ok(DataFormat::Xlsx),
            _ => Err(DataError::InvalidFormat(s.to_string())),
        }
    }
}

/// Requested format: a concrete one, or `Auto` to probe
/// [`DataFormat::DETECTION_ORDER`] and take the first existing file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormatHint {
    #[default]
    Auto,
    Explicit(DataFormat),
}

impl fmt::Display for FormatHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatHint::Auto => f.write_str("auto"),
            FormatHint::Explicit(format) => format.fmt(f),
        }
    }
}

impl FromStr for FormatHint {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            Ok(FormatHint::Auto)
        } else {
            s.parse().map(FormatHint::Explicit)
        }
    }
}

impl From<DataFormat> for FormatHint {
    fn from(format: DataFormat) -> Self {
        FormatHint::Explicit(format)
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Locate the backing file for `(dataset, hint)`.
///
/// Each candidate format is checked at its conventional path first, then by
/// a recursive search under the whole data directory (datasets are
/// occasionally parked in per-module subdirectories).  With an explicit
/// hint the failure names the one expected path; under `Auto` it enumerates
/// all three conventional candidates to aid diagnosis.
pub fn resolve(
    config: &DataConfig,
    dataset: &str,
    hint: FormatHint,
) -> Result<(PathBuf, DataFormat), DataError> {
    match hint {
        FormatHint::Explicit(format) => match locate(config, dataset, format) {
            Some(path) => Ok((path, format)),
            None => Err(DataError::DatasetNotFound {
                dataset: dataset.to_string(),
                attempted: vec![config.candidate_path(dataset, format)],
            }),
        },
        FormatHint::Auto => {
            for format in DataFormat::DETECTION_ORDER {
                if let Some(path) = locate(config, dataset, format) {
                    log::debug!("dataset '{dataset}' auto-resolved to {format}: {}", path.display());
                    return Ok((path, format));
                }
            }
            Err(DataError::DatasetNotFound {
                dataset: dataset.to_string(),
                attempted: DataFormat::DETECTION_ORDER
                    .iter()
                    .map(|&format| config.candidate_path(dataset, format))
                    .collect(),
            })
        }
    }
}

/// Direct conventional path, then a sorted recursive walk for the same file
/// name anywhere under the base directory.  Sorting keeps the fallback
/// independent of filesystem iteration order.
fn locate(config: &DataConfig, dataset: &str, format: DataFormat) -> Option<PathBuf> {
    let direct = config.candidate_path(dataset, format);
    if direct.is_file() {
        return Some(direct);
    }

    let file_name = DataConfig::data_file_name(dataset, format);
    WalkDir::new(config.base_dir())
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .find(|entry| {
            entry.file_type().is_file() && entry.file_name().to_str() == Some(file_name.as_str())
        })
        .map(|entry| entry.into_path())
}
