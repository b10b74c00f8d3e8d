//! Column classification and dataset profiling.
//!
//! The profiler is the leaf of both request paths. [`classify`] assigns each
//! column a [`ColumnType`] from its storage dtype, [`describe`] computes
//! descriptive statistics for the numeric ones, and [`build_profile`] combines
//! both with the dataset shape and a deterministic sample into an immutable
//! [`DatasetProfile`].
//!
//! ```no_run
//! use chartwise::profiler::{build_profile, io::load_dataset};
//!
//! # fn example() -> chartwise::error::Result<()> {
//! let df = load_dataset("sales.csv".as_ref())?;
//! let profile = build_profile(&df)?;
//! println!("{} rows, {} columns", profile.row_count, profile.column_count);
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod describe;
pub mod io;
pub mod profile;
pub mod types;

pub use classify::{classify, numeric_columns};
pub use describe::describe;
pub use profile::{SAMPLE_ROWS, build_profile};
pub use types::{ColumnType, ColumnTypes, DatasetProfile, NumericStats, Shape, TemporalRange};
