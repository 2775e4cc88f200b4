//! Shared model types for the dataprep pipelines.

pub mod error;
pub mod policy;
pub mod report;
pub mod schema;

pub use error::{DataprepError, Result};
pub use policy::MissingValuePolicy;
pub use report::{Report, ReportSection, truncate_sheet_name};
pub use schema::{ColumnSpec, PipelineSchema, products_schema, recruitment_schema};
