//! CSV ingestion and pre-transform profiling.

pub mod csv_table;
pub mod polars_utils;
pub mod profile;
pub mod stats;

pub use csv_table::{ColumnKind, CsvTable, column_kind, read_csv_table};
pub use polars_utils::{any_to_f64, any_to_string, format_numeric, parse_f64};
pub use profile::{duplicate_row_count, profile_table, write_profile};
pub use stats::{Describe, HistogramBin, describe, histogram, mean, median, value_counts};
