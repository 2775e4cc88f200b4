//! Declared input schemas for each pipeline.
//!
//! Inputs are schema-on-read CSV files; rather than coercing blindly, each
//! transform validates up front that the columns it is about to read exist.
//! Value-level cleaning stays lenient, column-level absence is a hard error.

use crate::error::{DataprepError, Result};

/// A single expected input column.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub name: &'static str,
    /// Required columns fail validation when absent; optional columns are
    /// passed through untouched when present.
    pub required: bool,
}

impl ColumnSpec {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }
}

/// The set of columns a pipeline expects in its input table.
#[derive(Debug, Clone)]
pub struct PipelineSchema {
    pub name: &'static str,
    pub columns: Vec<ColumnSpec>,
}

impl PipelineSchema {
    /// Check that every required column is present in `headers`.
    ///
    /// Header comparison is exact: the source files carry stable lowercase
    /// headers and silently matching near-misses would hide upstream drift.
    pub fn validate(&self, headers: &[String]) -> Result<()> {
        for column in &self.columns {
            if column.required && !headers.iter().any(|header| header == column.name) {
                return Err(DataprepError::MissingColumn(format!(
                    "{} (pipeline: {})",
                    column.name, self.name
                )));
            }
        }
        Ok(())
    }
}

/// Input schema for the product-listings pipeline.
pub fn products_schema() -> PipelineSchema {
    PipelineSchema {
        name: "products",
        columns: vec![
            ColumnSpec::required("name"),
            ColumnSpec::required("ratings"),
            ColumnSpec::required("no_of_ratings"),
            ColumnSpec::required("discount_price"),
            ColumnSpec::required("actual_price"),
        ],
    }
}

/// Input schema for the job-recruitment pipeline.
pub fn recruitment_schema() -> PipelineSchema {
    PipelineSchema {
        name: "recruitment",
        columns: vec![
            ColumnSpec::required("company"),
            ColumnSpec::required("job_title"),
            ColumnSpec::required("company_rating"),
            ColumnSpec::required("job_description"),
            ColumnSpec::required("salary_estimate"),
            ColumnSpec::required("company_size"),
            ColumnSpec::required("company_type"),
            ColumnSpec::required("company_sector"),
            ColumnSpec::required("company_industry"),
            ColumnSpec::required("company_founded"),
            ColumnSpec::required("company_revenue"),
            ColumnSpec::required("dates"),
        ],
    }
}
