/// Data layer: record types, dataset resolution, and format loading.
///
/// Architecture:
/// ```text
///  dataset name + format hint
///        │
///        ▼
///   ┌──────────┐
///   │ resolver  │  naming convention + ordered auto-detection → (path, format)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse .csv / .json / .xlsx → Vec<Record>
///   └──────────┘
///        │
///        ▼
///   one test invocation per Record
/// ```
pub mod loader;
pub mod model;
pub mod resolver;
#[cfg(feature = "xlsx")]
pub mod xlsx;

use crate::config::DataConfig;
use crate::error::DataError;

/// Fetch a dataset by logical name: resolve the backing file, then parse it.
///
/// This is the one integration point used by data-driven tests; the
/// returned sequence is parametrization input, one invocation per record.
/// Every call reads the file afresh, so edits to data files show up
/// without any cache to invalidate.
pub fn get_test_data(
    config: &DataConfig,
    dataset: &str,
    hint: resolver::FormatHint,
) -> Result<Vec<model::Record>, DataError> {
    let (path, format) = resolver::resolve(config, dataset, hint)?;
    let records = loader::load(&path, format)?;
    log::info!(
        "loaded {} records for dataset '{dataset}' from {} ({format})",
        records.len(),
        path.display()
    );
    Ok(records)
}
