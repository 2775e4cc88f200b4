//! XLSX workbook output for the dataprep pipelines.

pub mod workbook;

pub use workbook::write_workbook;
