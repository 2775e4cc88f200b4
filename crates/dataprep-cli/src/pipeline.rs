//! Pipeline orchestration: extract, profile, transform, report, load.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use dataprep_ingest::csv_table::read_csv_table;
use dataprep_ingest::profile::write_profile;
use dataprep_model::MissingValuePolicy;
use dataprep_report::write_workbook;
use dataprep_transform::{
    product_demographics, recruitment_demographics, recruitment_frame, transform_products,
    transform_recruitment,
};

/// Shared run options for both pipelines.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub input: PathBuf,
    /// Defaults to `<input dir>/output` when unset.
    pub output_dir: Option<PathBuf>,
    /// Workbook file name; each pipeline has its own default.
    pub report_name: Option<String>,
    /// When false, the pre-transform profile dump is skipped.
    pub profile: bool,
}

/// What a pipeline run produced.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub pipeline: &'static str,
    pub rows_in: usize,
    pub rows_out: usize,
    pub sheets: usize,
    pub profile_path: Option<PathBuf>,
    pub workbook_path: PathBuf,
}

impl PipelineOptions {
    fn output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => self
                .input
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join("output"),
        }
    }

    fn workbook_path(&self, default_name: &str) -> PathBuf {
        let name = self.report_name.as_deref().unwrap_or(default_name);
        self.output_dir().join(name)
    }

    fn profile_path(&self, name: &str) -> Option<PathBuf> {
        self.profile.then(|| self.output_dir().join(name))
    }
}

/// Run the product-listings pipeline end to end.
pub fn run_products(options: &PipelineOptions) -> Result<PipelineOutcome> {
    info!(input = %options.input.display(), "products pipeline started");
    let table = read_csv_table(&options.input)
        .with_context(|| format!("read {}", options.input.display()))?;

    let profile_path = options.profile_path("inspect_data_products.txt");
    if let Some(path) = &profile_path {
        write_profile(&table, path)?;
    }

    let cleaned = transform_products(&table)?;
    let report = product_demographics(&cleaned)?;
    let frame = cleaned.to_frame()?;

    let workbook_path = options.workbook_path("products_report.xlsx");
    write_workbook(&workbook_path, &frame, &report)?;

    Ok(PipelineOutcome {
        pipeline: "products",
        rows_in: table.height(),
        rows_out: cleaned.height(),
        sheets: report.sheet_count() + 1,
        profile_path,
        workbook_path,
    })
}

/// Run the job-recruitment pipeline end to end.
pub fn run_recruitment(
    options: &PipelineOptions,
    policy: MissingValuePolicy,
) -> Result<PipelineOutcome> {
    info!(input = %options.input.display(), ?policy, "recruitment pipeline started");
    let table = read_csv_table(&options.input)
        .with_context(|| format!("read {}", options.input.display()))?;

    let profile_path = options.profile_path("inspect_data_recruitment.txt");
    if let Some(path) = &profile_path {
        write_profile(&table, path)?;
    }

    let postings = transform_recruitment(&table, policy)?;
    let report = recruitment_demographics(&postings)?;
    let frame = recruitment_frame(&postings)?;

    let workbook_path = options.workbook_path("recruitment_report.xlsx");
    write_workbook(&workbook_path, &frame, &report)?;

    Ok(PipelineOutcome {
        pipeline: "recruitment",
        rows_in: table.height(),
        rows_out: postings.len(),
        sheets: report.sheet_count() + 1,
        profile_path,
        workbook_path,
    })
}
