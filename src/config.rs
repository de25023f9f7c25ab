use std::env;
use std::path::{Path, PathBuf};

use crate::data::resolver::DataFormat;

/// Environment variable that overrides the data directory root.
pub const TEST_DATA_DIR_ENV: &str = "TEST_DATA_DIR";

/// Where dataset files live and how they are named.
///
/// This is a plain value constructed once at startup and passed by
/// reference into [`resolve`](crate::data::resolver::resolve) /
/// [`get_test_data`](crate::data::get_test_data), so a test can point an
/// alternate configuration at a scratch directory without touching any
/// process-wide state.
///
/// Conventions:
/// * primary directory: `<base_dir>/test_type/`
/// * file name: `<dataset>_test_data.<ext>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    base_dir: PathBuf,
}

impl DataConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        DataConfig {
            base_dir: base_dir.into(),
        }
    }

    /// Read the base directory from `TEST_DATA_DIR`, falling back to
    /// `test_data/` relative to the current working directory.
    pub fn from_env() -> Self {
        match env::var_os(TEST_DATA_DIR_ENV) {
            Some(dir) => DataConfig::new(PathBuf::from(dir)),
            None => DataConfig::default(),
        }
    }

    /// Root under which dataset files are searched.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The directory checked first for conventional file names.
    pub fn primary_dir(&self) -> PathBuf {
        self.base_dir.join("test_type")
    }

    /// Conventional file name for a `(dataset, format)` pair.
    pub fn data_file_name(dataset: &str, format: DataFormat) -> String {
        format!("{dataset}_test_data.{}", format.extension())
    }

    /// Conventional path for a `(dataset, format)` pair, whether or not a
    /// file exists there.
    pub fn candidate_path(&self, dataset: &str, format: DataFormat) -> PathBuf {
        self.primary_dir().join(Self::data_file_name(dataset, format))
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig::new("test_data")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_path_follows_naming_convention() {
        let config = DataConfig::new("/srv/fixtures");
        assert_eq!(
            config.candidate_path("login", DataFormat::Csv),
            PathBuf::from("/srv/fixtures/test_type/login_test_data.csv")
        );
        assert_eq!(
            config.candidate_path("home", DataFormat::Xlsx),
            PathBuf::from("/srv/fixtures/test_type/home_test_data.xlsx")
        );
    }
}
