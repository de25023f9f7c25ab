//! caseload – data-driven test dataset loading.
//!
//! Resolves a logical dataset name (e.g. `"login"`) to a backing file by
//! naming convention, parses it (CSV, JSON, or XLSX), and hands back the
//! rows as field→value records for test parametrization.  Fully blank rows
//! never reach the caller.
//!
//! ```no_run
//! use caseload::{get_test_data, DataConfig, FormatHint};
//!
//! let config = DataConfig::from_env();
//! let cases = get_test_data(&config, "login", FormatHint::Auto)?;
//! for case in &cases {
//!     let username = case.get_str("username", "");
//!     let password = case.get_str("password", "");
//!     // drive the flow under test with (username, password) ...
//! }
//! # Ok::<(), caseload::DataError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;

pub use config::DataConfig;
pub use data::get_test_data;
pub use data::model::{FieldValue, Record};
pub use data::resolver::{resolve, DataFormat, FormatHint};
pub use error::DataError;
