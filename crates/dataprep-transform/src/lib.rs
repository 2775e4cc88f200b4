//! Cleaning, enrichment, and demographics for the dataprep pipelines.
//!
//! The two transforms are structurally identical: validate the declared
//! input schema, coerce and parse fields row by row, impute gaps, then
//! compute a demographics [`Report`](dataprep_model::Report) from the
//! cleaned table.

pub mod currency;
pub mod dates;
pub mod demographics;
pub mod products;
pub mod products_report;
pub mod recruitment;
pub mod recruitment_report;
pub mod salary;
pub mod text_mining;

pub use currency::{CurrencySplit, split_currency};
pub use dates::normalize_date;
pub use products::{ProductRecord, ProductTable, transform_products};
pub use products_report::product_demographics;
pub use recruitment::{JobPosting, recruitment_frame, transform_recruitment};
pub use recruitment_report::recruitment_demographics;
pub use salary::{ParsedSalary, impute_salaries, parse_salary};
pub use text_mining::{DescriptionSignals, parse_description};
