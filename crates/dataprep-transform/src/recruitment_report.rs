//! Recruitment demographics report.
//!
//! Adds the recruitment-specific sections on top of the shared technical
//! ones: per-pay-unit salary statistics and distributions as nested
//! sections, plus categorical breakdowns mined from the postings.

use anyhow::{Context, Result};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use dataprep_ingest::stats::{Describe, describe, histogram, mean, median, value_counts};
use dataprep_model::report::{Report, ReportSection};

use crate::demographics::{
    basic_info, count_table, data_types, metric_table, missing_by_column, numeric_stats,
};
use crate::recruitment::{JobPosting, recruitment_frame};

/// Categorical values that stand for "unknown", never counted as real.
const SENTINEL_LABELS: &[&str] = &["Not Specified", "-"];

/// Label used for missing experience levels in the distribution.
const NOT_SPECIFIED: &str = "Not Specified";

/// Build the recruitment demographics report, sections in fixed order.
pub fn recruitment_demographics(postings: &[JobPosting]) -> Result<Report> {
    let df = recruitment_frame(postings)?;
    let mut report = Report::new();
    report.push_table("Basic_Info", basic_info(&df)?);
    report.push_table("Data_Types", data_types(&df)?);
    report.push_table("Numeric_Stats", numeric_stats(&df, &["salary_estimate"])?);
    report.push(
        "Salary_Stats_By_Unit",
        ReportSection::Nested(salary_stats_by_unit(postings)?),
    );
    report.push_table("Missing_By_Column", missing_by_column(&df)?);
    report.push_table("Business_Summary", business_summary(postings)?);
    report.push_table(
        "Top_Skills",
        top_counts("Skill", split_counts(postings, |p| p.skills.as_deref()), 10)?,
    );
    report.push_table(
        "Experience_Distribution",
        experience_distribution(postings)?,
    );
    report.push_table(
        "JobType_Distribution",
        top_counts(
            "Job_Type",
            split_counts(postings, |p| p.job_type.as_deref()),
            usize::MAX,
        )?,
    );
    report.push_table("Top_Companies", top_companies(postings)?);
    report.push(
        "Salary_Distribution",
        ReportSection::Nested(salary_distribution(postings)?),
    );
    Ok(report)
}

/// Pay units in first-appearance order, skipping missing and sentinel.
fn pay_units(postings: &[JobPosting]) -> Vec<String> {
    let mut units: Vec<String> = Vec::new();
    for posting in postings {
        let Some(unit) = posting.salary_unit.as_deref() else {
            continue;
        };
        if SENTINEL_LABELS.contains(&unit) {
            continue;
        }
        if !units.iter().any(|u| u == unit) {
            units.push(unit.to_string());
        }
    }
    units
}

/// Non-missing salary magnitudes for one pay unit.
fn unit_salaries(postings: &[JobPosting], unit: &str) -> Vec<f64> {
    postings
        .iter()
        .filter(|p| p.salary_unit.as_deref() == Some(unit))
        .filter_map(|p| p.salary_estimate)
        .collect()
}

fn describe_frame(d: &Describe) -> Result<DataFrame> {
    let columns: Vec<Column> = vec![
        Series::new("count".into(), vec![d.count as f64]).into_column(),
        Series::new("mean".into(), vec![d.mean]).into_column(),
        Series::new("std".into(), vec![d.std]).into_column(),
        Series::new("min".into(), vec![d.min]).into_column(),
        Series::new("25%".into(), vec![d.q25]).into_column(),
        Series::new("50%".into(), vec![d.median]).into_column(),
        Series::new("75%".into(), vec![d.q75]).into_column(),
        Series::new("max".into(), vec![d.max]).into_column(),
    ];
    DataFrame::new(columns).context("build salary describe frame")
}

fn salary_stats_by_unit(postings: &[JobPosting]) -> Result<Vec<(String, DataFrame)>> {
    let mut subs = Vec::new();
    for unit in pay_units(postings) {
        let values = unit_salaries(postings, &unit);
        if let Some(d) = describe(&values) {
            subs.push((unit, describe_frame(&d)?));
        }
    }
    Ok(subs)
}

fn salary_distribution(postings: &[JobPosting]) -> Result<Vec<(String, DataFrame)>> {
    let mut subs = Vec::new();
    for unit in pay_units(postings) {
        let values = unit_salaries(postings, &unit);
        let entries: Vec<(String, usize)> = histogram(&values, 5)
            .into_iter()
            .map(|bin| (bin.label, bin.count))
            .collect();
        if entries.is_empty() {
            continue;
        }
        subs.push((unit.clone(), count_table("Salary_Range", "Count", &entries)?));
    }
    Ok(subs)
}

fn business_summary(postings: &[JobPosting]) -> Result<DataFrame> {
    let mut entries: Vec<(String, f64)> = Vec::new();
    let ratings: Vec<f64> = postings.iter().filter_map(|p| p.company_rating).collect();
    if let (Some(avg), Some(med)) = (mean(&ratings), median(&ratings)) {
        entries.push(("Avg Company Rating".to_string(), avg));
        entries.push(("Median Company Rating".to_string(), med));
    }
    let founded: Vec<i64> = postings.iter().filter_map(|p| p.company_founded).collect();
    // A sentinel-filled year of 0 is not a real founding year.
    let founded: Vec<i64> = founded.into_iter().filter(|&year| year > 0).collect();
    if let (Some(&earliest), Some(&latest)) = (founded.iter().min(), founded.iter().max()) {
        entries.push(("Earliest Founded".to_string(), earliest as f64));
        entries.push(("Latest Founded".to_string(), latest as f64));
    }
    for unit in pay_units(postings) {
        let values = unit_salaries(postings, &unit);
        if let (Some(med), Some(avg)) = (median(&values), mean(&values)) {
            entries.push((format!("Median Salary ({unit})"), med));
            entries.push((format!("Average Salary ({unit})"), avg));
        }
    }
    let borrowed: Vec<(&str, f64)> = entries
        .iter()
        .map(|(label, value)| (label.as_str(), *value))
        .collect();
    metric_table(&borrowed)
}

/// Split comma-joined multi-value cells and count each entry, skipping
/// missing values and sentinels.
fn split_counts<F>(postings: &[JobPosting], field: F) -> Vec<(String, usize)>
where
    F: Fn(&JobPosting) -> Option<&str>,
{
    let values = postings.iter().flat_map(|posting| {
        field(posting)
            .into_iter()
            .flat_map(|joined| joined.split(", "))
            .map(str::trim)
            .filter(|entry| !entry.is_empty() && !SENTINEL_LABELS.contains(entry))
            .map(String::from)
            .collect::<Vec<_>>()
    });
    value_counts(values)
}

fn top_counts(
    label_header: &str,
    mut entries: Vec<(String, usize)>,
    limit: usize,
) -> Result<DataFrame> {
    entries.truncate(limit);
    count_table(label_header, "Count", &entries)
}

/// Counts per experience level, missing reported as "Not Specified".
fn experience_distribution(postings: &[JobPosting]) -> Result<DataFrame> {
    let values = postings.iter().map(|posting| {
        posting
            .experience_level
            .clone()
            .unwrap_or_else(|| NOT_SPECIFIED.to_string())
    });
    count_table("Experience_Level", "Count", &value_counts(values))
}

/// Top 10 companies by posting count.
fn top_companies(postings: &[JobPosting]) -> Result<DataFrame> {
    let counts = value_counts(postings.iter().map(|p| p.company.clone()));
    top_counts("Company", counts, 10)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataprep_ingest::polars_utils::{any_to_f64, any_to_string};

    fn posting(
        company: &str,
        unit: Option<&str>,
        salary: Option<f64>,
        level: Option<&str>,
        skills: Option<&str>,
    ) -> JobPosting {
        JobPosting {
            company: company.to_string(),
            job_title: "Engineer".to_string(),
            company_rating: Some(4.0),
            salary_estimate: salary,
            salary_unit: unit.map(String::from),
            experience_level: level.map(String::from),
            skills: skills.map(String::from),
            company_founded: Some(1999),
            ..JobPosting::default()
        }
    }

    fn sample() -> Vec<JobPosting> {
        vec![
            posting(
                "Acme",
                Some("per year"),
                Some(40000.0),
                Some("Mid"),
                Some("Python, SQL"),
            ),
            posting(
                "Acme",
                Some("per year"),
                Some(60000.0),
                Some("Senior"),
                Some("Python"),
            ),
            posting("Beta", Some("per hour"), Some(25.0), None, None),
        ]
    }

    #[test]
    fn sections_appear_in_order() {
        let report = recruitment_demographics(&sample()).unwrap();
        let names: Vec<&str> = report
            .sections()
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Basic_Info",
                "Data_Types",
                "Numeric_Stats",
                "Salary_Stats_By_Unit",
                "Missing_By_Column",
                "Business_Summary",
                "Top_Skills",
                "Experience_Distribution",
                "JobType_Distribution",
                "Top_Companies",
                "Salary_Distribution",
            ]
        );
    }

    #[test]
    fn numeric_stats_excludes_salary_estimate() {
        let report = recruitment_demographics(&sample()).unwrap();
        let Some(ReportSection::Table(df)) = report.get("Numeric_Stats") else {
            panic!("missing section");
        };
        let columns: Vec<String> = (0..df.height())
            .map(|idx| any_to_string(df.column("Column").unwrap().get(idx).unwrap()))
            .collect();
        assert!(!columns.contains(&"salary_estimate".to_string()));
        assert!(columns.contains(&"company_rating".to_string()));
    }

    #[test]
    fn salary_stats_keep_first_appearance_unit_order() {
        let report = recruitment_demographics(&sample()).unwrap();
        let Some(ReportSection::Nested(subs)) = report.get("Salary_Stats_By_Unit") else {
            panic!("missing section");
        };
        let units: Vec<&str> = subs.iter().map(|(unit, _)| unit.as_str()).collect();
        assert_eq!(units, vec!["per year", "per hour"]);
        let yearly = &subs[0].1;
        assert_eq!(
            any_to_f64(yearly.column("50%").unwrap().get(0).unwrap()),
            Some(50000.0)
        );
    }

    #[test]
    fn sentinel_units_are_skipped() {
        let postings = vec![
            posting("Acme", Some("-"), Some(10.0), None, None),
            posting("Acme", Some("per year"), Some(50000.0), None, None),
        ];
        assert_eq!(pay_units(&postings), vec!["per year".to_string()]);
    }

    #[test]
    fn business_summary_reports_per_unit_salary_lines() {
        let report = recruitment_demographics(&sample()).unwrap();
        let Some(ReportSection::Table(df)) = report.get("Business_Summary") else {
            panic!("missing section");
        };
        let metrics: Vec<String> = (0..df.height())
            .map(|idx| any_to_string(df.column("Metric").unwrap().get(idx).unwrap()))
            .collect();
        assert!(metrics.contains(&"Median Salary (per year)".to_string()));
        assert!(metrics.contains(&"Average Salary (per hour)".to_string()));
        assert!(metrics.contains(&"Earliest Founded".to_string()));
    }

    #[test]
    fn top_skills_split_and_count_individually() {
        let report = recruitment_demographics(&sample()).unwrap();
        let Some(ReportSection::Table(df)) = report.get("Top_Skills") else {
            panic!("missing section");
        };
        assert_eq!(
            any_to_string(df.column("Skill").unwrap().get(0).unwrap()),
            "Python"
        );
        assert_eq!(
            any_to_f64(df.column("Count").unwrap().get(0).unwrap()),
            Some(2.0)
        );
    }

    #[test]
    fn experience_distribution_labels_missing_levels() {
        let report = recruitment_demographics(&sample()).unwrap();
        let Some(ReportSection::Table(df)) = report.get("Experience_Distribution") else {
            panic!("missing section");
        };
        let levels: Vec<String> = (0..df.height())
            .map(|idx| any_to_string(df.column("Experience_Level").unwrap().get(idx).unwrap()))
            .collect();
        assert!(levels.contains(&"Not Specified".to_string()));
        assert_eq!(levels.len(), 3);
    }

    #[test]
    fn empty_postings_produce_empty_nested_sections() {
        let report = recruitment_demographics(&[]).unwrap();
        let Some(ReportSection::Nested(subs)) = report.get("Salary_Distribution") else {
            panic!("missing section");
        };
        assert!(subs.is_empty());
    }
}
