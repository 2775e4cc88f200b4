//! Job-recruitment transform.
//!
//! Cleans company names, mines the free-text description into categorical
//! signals, parses and imputes salaries, fills categorical company fields
//! within company groups, and normalizes posting dates. Whether leftover
//! gaps stay null or become sentinels is controlled by the
//! [`MissingValuePolicy`] parameter.

use std::sync::LazyLock;

use anyhow::{Context, Result};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use regex::Regex;
use tracing::info;

use dataprep_ingest::csv_table::CsvTable;
use dataprep_model::{MissingValuePolicy, schema::recruitment_schema};

use crate::dates::normalize_date;
use crate::salary::{impute_salaries, parse_salary};
use crate::text_mining::parse_description;

/// Trailing rating suffix glued onto company names ("Acme Corp 4.5").
static COMPANY_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\d+(\.\d+)?$").expect("company suffix regex"));

/// One cleaned job posting. The raw description is consumed during the
/// transform and not carried into the output.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobPosting {
    pub company: String,
    pub job_title: String,
    pub company_rating: Option<f64>,
    pub salary_estimate: Option<f64>,
    pub salary_unit: Option<String>,
    pub currency: Option<String>,
    pub skills: Option<String>,
    pub experience_level: Option<String>,
    pub job_type: Option<String>,
    pub benefits: Option<String>,
    pub company_size: Option<String>,
    pub company_type: Option<String>,
    pub company_sector: Option<String>,
    pub company_industry: Option<String>,
    pub company_founded: Option<i64>,
    pub company_revenue: Option<String>,
    pub dates: Option<String>,
}

/// Strip the trailing numeric suffix from a raw company name.
pub fn clean_company_name(raw: &str) -> String {
    COMPANY_SUFFIX_RE.replace(raw, "").trim().to_string()
}

/// Clean and enrich the raw recruitment table under the given policy.
pub fn transform_recruitment(
    table: &CsvTable,
    policy: MissingValuePolicy,
) -> Result<Vec<JobPosting>> {
    // The index-artifact column ("Unnamed: 0" or a blank header) is simply
    // never read; validation checks the columns we do read.
    recruitment_schema().validate(&table.headers)?;

    let col = |name: &str| {
        table
            .column_index(name)
            .with_context(|| format!("{name} column"))
    };
    let company_idx = col("company")?;
    let title_idx = col("job_title")?;
    let rating_idx = col("company_rating")?;
    let description_idx = col("job_description")?;
    let salary_idx = col("salary_estimate")?;
    let size_idx = col("company_size")?;
    let type_idx = col("company_type")?;
    let sector_idx = col("company_sector")?;
    let industry_idx = col("company_industry")?;
    let founded_idx = col("company_founded")?;
    let revenue_idx = col("company_revenue")?;
    let dates_idx = col("dates")?;

    let mut postings = Vec::with_capacity(table.height());
    let mut dropped_unnamed = 0usize;
    for row in 0..table.height() {
        let company = clean_company_name(table.cell(row, company_idx));
        if company.is_empty() {
            dropped_unnamed += 1;
            continue;
        }
        let signals = parse_description(table.cell(row, description_idx));
        let salary = parse_salary(table.cell(row, salary_idx));
        postings.push(JobPosting {
            company,
            job_title: table.cell(row, title_idx).trim().to_string(),
            company_rating: parse_rating(table.cell(row, rating_idx)),
            salary_estimate: salary.amount,
            salary_unit: salary.unit.map(String::from),
            currency: salary.currency.map(String::from),
            skills: signals.skills,
            experience_level: signals.experience_level,
            job_type: signals.job_type,
            benefits: signals.benefits,
            company_size: non_empty(table.cell(row, size_idx)),
            company_type: non_empty(table.cell(row, type_idx)),
            company_sector: non_empty(table.cell(row, sector_idx)),
            company_industry: non_empty(table.cell(row, industry_idx)),
            company_founded: parse_founded(table.cell(row, founded_idx)),
            company_revenue: non_empty(table.cell(row, revenue_idx)),
            dates: normalize_date(table.cell(row, dates_idx)),
        });
    }

    let imputed = impute_salaries(&mut postings);
    fill_company_fields(&mut postings);
    if policy == MissingValuePolicy::Sentinel {
        apply_sentinels(&mut postings, policy);
    }

    info!(
        rows_in = table.height(),
        rows_out = postings.len(),
        dropped_unnamed,
        salaries_imputed = imputed,
        ?policy,
        "recruitment transform complete"
    );
    Ok(postings)
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Company rating as a nullable f64. Literal "NaN"/"inf" text parses as a
/// float in Rust but is not a rating, so it stays missing.
fn parse_rating(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|rating| rating.is_finite())
}

/// Founding year as a nullable integer. A year of 0 is not valid, so
/// missing stays missing here; only the sentinel policy forces it to 0.
fn parse_founded(raw: &str) -> Option<i64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|year| year.is_finite())
        .map(|year| year as i64)
}

/// Forward-fill then back-fill the categorical company fields within each
/// group of rows sharing the same cleaned company name.
fn fill_company_fields(postings: &mut [JobPosting]) {
    let companies: Vec<String> = postings.iter().map(|p| p.company.clone()).collect();
    let mut order: Vec<&String> = Vec::new();
    for company in &companies {
        if !order.contains(&company) {
            order.push(company);
        }
    }
    for company in order {
        let indices: Vec<usize> = companies
            .iter()
            .enumerate()
            .filter(|(_, c)| *c == company)
            .map(|(idx, _)| idx)
            .collect();
        fill_field(postings, &indices, |p| &mut p.company_size);
        fill_field(postings, &indices, |p| &mut p.company_type);
        fill_field(postings, &indices, |p| &mut p.company_sector);
        fill_field(postings, &indices, |p| &mut p.company_industry);
    }
}

fn fill_field<F>(postings: &mut [JobPosting], indices: &[usize], mut field: F)
where
    F: FnMut(&mut JobPosting) -> &mut Option<String>,
{
    // Forward pass carries the last known value down the group.
    let mut last: Option<String> = None;
    for &idx in indices {
        let value = field(&mut postings[idx]);
        if let Some(known) = value.as_ref() {
            last = Some(known.clone());
        } else {
            *value = last.clone();
        }
    }
    // Backward pass fills leading gaps from the first known value.
    let mut next: Option<String> = None;
    for &idx in indices.iter().rev() {
        let value = field(&mut postings[idx]);
        if let Some(known) = value.as_ref() {
            next = Some(known.clone());
        } else {
            *value = next.clone();
        }
    }
}

/// Replace remaining gaps with sentinels (policy B). The salary magnitude
/// is deliberately left missing when imputation found no peer group.
fn apply_sentinels(postings: &mut [JobPosting], policy: MissingValuePolicy) {
    let text = policy.text_sentinel().unwrap_or_default().to_string();
    let category = policy.category_sentinel().unwrap_or_default().to_string();
    for posting in postings {
        for field in [
            &mut posting.skills,
            &mut posting.experience_level,
            &mut posting.job_type,
            &mut posting.benefits,
        ] {
            if field.is_none() {
                *field = Some(text.clone());
            }
        }
        for field in [
            &mut posting.salary_unit,
            &mut posting.currency,
            &mut posting.company_size,
            &mut posting.company_type,
            &mut posting.company_sector,
            &mut posting.company_industry,
            &mut posting.company_revenue,
        ] {
            if field.is_none() {
                *field = Some(category.clone());
            }
        }
        if policy.zero_fills_numeric() {
            posting.company_rating.get_or_insert(0.0);
            posting.company_founded.get_or_insert(0);
        }
    }
}

/// Build the output frame with the declared column order.
pub fn recruitment_frame(postings: &[JobPosting]) -> Result<DataFrame> {
    let strings = |f: fn(&JobPosting) -> Option<String>| -> Vec<Option<String>> {
        postings.iter().map(f).collect()
    };
    let columns: Vec<Column> = vec![
        Series::new(
            "company".into(),
            postings.iter().map(|p| p.company.clone()).collect::<Vec<_>>(),
        )
        .into_column(),
        Series::new(
            "job_title".into(),
            postings
                .iter()
                .map(|p| p.job_title.clone())
                .collect::<Vec<_>>(),
        )
        .into_column(),
        Series::new(
            "company_rating".into(),
            postings
                .iter()
                .map(|p| p.company_rating)
                .collect::<Vec<_>>(),
        )
        .into_column(),
        Series::new(
            "salary_estimate".into(),
            postings
                .iter()
                .map(|p| p.salary_estimate)
                .collect::<Vec<_>>(),
        )
        .into_column(),
        Series::new("salary_unit".into(), strings(|p| p.salary_unit.clone())).into_column(),
        Series::new("currency".into(), strings(|p| p.currency.clone())).into_column(),
        Series::new("skills".into(), strings(|p| p.skills.clone())).into_column(),
        Series::new(
            "experience_level".into(),
            strings(|p| p.experience_level.clone()),
        )
        .into_column(),
        Series::new("job_type".into(), strings(|p| p.job_type.clone())).into_column(),
        Series::new("benefits".into(), strings(|p| p.benefits.clone())).into_column(),
        Series::new("company_size".into(), strings(|p| p.company_size.clone())).into_column(),
        Series::new("company_type".into(), strings(|p| p.company_type.clone())).into_column(),
        Series::new(
            "company_sector".into(),
            strings(|p| p.company_sector.clone()),
        )
        .into_column(),
        Series::new(
            "company_industry".into(),
            strings(|p| p.company_industry.clone()),
        )
        .into_column(),
        Series::new(
            "company_founded".into(),
            postings
                .iter()
                .map(|p| p.company_founded)
                .collect::<Vec<_>>(),
        )
        .into_column(),
        Series::new(
            "company_revenue".into(),
            strings(|p| p.company_revenue.clone()),
        )
        .into_column(),
        Series::new("dates".into(), strings(|p| p.dates.clone())).into_column(),
    ];
    DataFrame::new(columns).context("build recruitment frame")
}
