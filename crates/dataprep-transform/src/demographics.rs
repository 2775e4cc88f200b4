//! Report sections shared by both pipelines.
//!
//! Everything here is a pure function of the cleaned frame: the technical
//! sections (shape, dtype counts, per-column describe, null counts) are
//! identical across pipelines and only the business sections differ.

use anyhow::{Context, Result};
use polars::prelude::{AnyValue, Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};

use dataprep_ingest::polars_utils::{any_to_f64, any_to_string};
use dataprep_ingest::stats::describe;

/// True when a cell counts as missing: null, or an empty/blank string.
pub fn is_missing(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::String(s) => s.trim().is_empty(),
        AnyValue::StringOwned(s) => s.as_str().trim().is_empty(),
        _ => false,
    }
}

/// Count of missing cells in one column.
fn column_missing_count(df: &DataFrame, name: &str) -> usize {
    let Ok(column) = df.column(name) else {
        return 0;
    };
    (0..df.height())
        .filter(|&idx| is_missing(&column.get(idx).unwrap_or(AnyValue::Null)))
        .count()
}

/// Non-missing numeric values of one column.
pub fn numeric_column_values(df: &DataFrame, name: &str) -> Vec<f64> {
    let Ok(column) = df.column(name) else {
        return Vec::new();
    };
    (0..df.height())
        .filter_map(|idx| any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)))
        .collect()
}

/// Rough in-memory footprint of the frame in kilobytes: string bytes plus
/// eight bytes per non-string cell, rounded to two decimals.
pub fn estimated_memory_kb(df: &DataFrame) -> f64 {
    let mut bytes = 0usize;
    for column in df.get_columns() {
        for idx in 0..df.height() {
            match column.get(idx).unwrap_or(AnyValue::Null) {
                AnyValue::String(s) => bytes += s.len(),
                AnyValue::StringOwned(s) => bytes += s.len(),
                _ => bytes += 8,
            }
        }
    }
    let kb = bytes as f64 / 1024.0;
    (kb * 100.0).round() / 100.0
}

/// Number of rows identical to an earlier row across all columns.
pub fn duplicate_frame_rows(df: &DataFrame) -> usize {
    let mut seen = std::collections::HashSet::new();
    let mut duplicates = 0usize;
    for idx in 0..df.height() {
        let key: Vec<String> = df
            .get_columns()
            .iter()
            .map(|column| any_to_string(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        if !seen.insert(key) {
            duplicates += 1;
        }
    }
    duplicates
}

/// Total missing cells across the frame.
pub fn total_missing(df: &DataFrame) -> usize {
    df.get_column_names()
        .iter()
        .map(|name| column_missing_count(df, name.as_str()))
        .sum()
}

/// `Basic_Info` section: shape, missing cells, duplicate rows, memory.
pub fn basic_info(df: &DataFrame) -> Result<DataFrame> {
    let metrics = [
        ("Total Rows", df.height() as f64),
        ("Total Columns", df.width() as f64),
        ("Missing Values", total_missing(df) as f64),
        ("Duplicate Rows", duplicate_frame_rows(df) as f64),
        ("Memory Usage (KB)", estimated_memory_kb(df)),
    ];
    metric_table(&metrics)
}

/// `Data_Types` section: number of columns per dtype, first-seen order.
pub fn data_types(df: &DataFrame) -> Result<DataFrame> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: Vec<i64> = Vec::new();
    for column in df.get_columns() {
        let dtype = column.dtype().to_string();
        match order.iter().position(|d| *d == dtype) {
            Some(pos) => counts[pos] += 1,
            None => {
                order.push(dtype);
                counts.push(1);
            }
        }
    }
    let columns: Vec<Column> = vec![
        Series::new("Dtype".into(), order).into_column(),
        Series::new("Count".into(), counts).into_column(),
    ];
    DataFrame::new(columns).context("build Data_Types section")
}

/// `Numeric_Stats` section: full describe per numeric column, excluding
/// any listed column names.
pub fn numeric_stats(df: &DataFrame, exclude: &[&str]) -> Result<DataFrame> {
    let mut names: Vec<String> = Vec::new();
    let mut count: Vec<f64> = Vec::new();
    let mut mean: Vec<Option<f64>> = Vec::new();
    let mut std: Vec<Option<f64>> = Vec::new();
    let mut min: Vec<Option<f64>> = Vec::new();
    let mut q25: Vec<Option<f64>> = Vec::new();
    let mut median: Vec<Option<f64>> = Vec::new();
    let mut q75: Vec<Option<f64>> = Vec::new();
    let mut max: Vec<Option<f64>> = Vec::new();
    for column in df.get_columns() {
        let name = column.name().to_string();
        if exclude.contains(&name.as_str()) {
            continue;
        }
        if !matches!(column.dtype(), DataType::Float64 | DataType::Int64) {
            continue;
        }
        let values = numeric_column_values(df, &name);
        names.push(name);
        match describe(&values) {
            Some(d) => {
                count.push(d.count as f64);
                mean.push(Some(d.mean));
                std.push(d.std);
                min.push(Some(d.min));
                q25.push(Some(d.q25));
                median.push(Some(d.median));
                q75.push(Some(d.q75));
                max.push(Some(d.max));
            }
            None => {
                count.push(0.0);
                mean.push(None);
                std.push(None);
                min.push(None);
                q25.push(None);
                median.push(None);
                q75.push(None);
                max.push(None);
            }
        }
    }
    let columns: Vec<Column> = vec![
        Series::new("Column".into(), names).into_column(),
        Series::new("count".into(), count).into_column(),
        Series::new("mean".into(), mean).into_column(),
        Series::new("std".into(), std).into_column(),
        Series::new("min".into(), min).into_column(),
        Series::new("25%".into(), q25).into_column(),
        Series::new("50%".into(), median).into_column(),
        Series::new("75%".into(), q75).into_column(),
        Series::new("max".into(), max).into_column(),
    ];
    DataFrame::new(columns).context("build Numeric_Stats section")
}

/// `Missing_By_Column` section.
pub fn missing_by_column(df: &DataFrame) -> Result<DataFrame> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let counts: Vec<i64> = names
        .iter()
        .map(|name| column_missing_count(df, name) as i64)
        .collect();
    let columns: Vec<Column> = vec![
        Series::new("Column".into(), names).into_column(),
        Series::new("Missing_Count".into(), counts).into_column(),
    ];
    DataFrame::new(columns).context("build Missing_By_Column section")
}

/// Two-column Metric/Value table.
pub fn metric_table(entries: &[(&str, f64)]) -> Result<DataFrame> {
    let metrics: Vec<String> = entries.iter().map(|(m, _)| (*m).to_string()).collect();
    let values: Vec<f64> = entries.iter().map(|(_, v)| *v).collect();
    let columns: Vec<Column> = vec![
        Series::new("Metric".into(), metrics).into_column(),
        Series::new("Value".into(), values).into_column(),
    ];
    DataFrame::new(columns).context("build metric table")
}

/// Two-column label/count table with caller-chosen headers.
pub fn count_table(
    label_header: &str,
    count_header: &str,
    entries: &[(String, usize)],
) -> Result<DataFrame> {
    let labels: Vec<String> = entries.iter().map(|(label, _)| label.clone()).collect();
    let counts: Vec<i64> = entries.iter().map(|(_, count)| *count as i64).collect();
    let columns: Vec<Column> = vec![
        Series::new(label_header.into(), labels).into_column(),
        Series::new(count_header.into(), counts).into_column(),
    ];
    DataFrame::new(columns).context("build count table")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataprep_ingest::polars_utils::any_to_string;

    fn mixed_frame() -> DataFrame {
        let columns: Vec<Column> = vec![
            Series::new(
                "name".into(),
                vec!["a".to_string(), "b".to_string(), String::new()],
            )
            .into_column(),
            Series::new("price".into(), vec![Some(1.0), Some(3.0), None]).into_column(),
        ];
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn basic_info_counts_missing_and_shape() {
        let df = mixed_frame();
        let info = basic_info(&df).unwrap();
        assert_eq!(info.height(), 5);
        let value = info.column("Value").unwrap().get(0).unwrap();
        assert_eq!(any_to_string(value), "3");
        // One empty string plus one null = 2 missing cells.
        let missing = info.column("Value").unwrap().get(2).unwrap();
        assert_eq!(any_to_string(missing), "2");
    }

    #[test]
    fn data_types_groups_columns_by_dtype() {
        let df = mixed_frame();
        let types = data_types(&df).unwrap();
        assert_eq!(types.height(), 2);
    }

    #[test]
    fn numeric_stats_skips_string_and_excluded_columns() {
        let df = mixed_frame();
        let stats = numeric_stats(&df, &[]).unwrap();
        assert_eq!(stats.height(), 1);
        assert_eq!(
            any_to_string(stats.column("Column").unwrap().get(0).unwrap()),
            "price"
        );
        assert_eq!(
            any_to_string(stats.column("mean").unwrap().get(0).unwrap()),
            "2"
        );
        let excluded = numeric_stats(&df, &["price"]).unwrap();
        assert_eq!(excluded.height(), 0);
    }

    #[test]
    fn missing_by_column_reports_both_columns() {
        let df = mixed_frame();
        let missing = missing_by_column(&df).unwrap();
        assert_eq!(missing.height(), 2);
        assert_eq!(
            any_to_string(missing.column("Missing_Count").unwrap().get(0).unwrap()),
            "1"
        );
    }

    #[test]
    fn duplicate_frame_rows_detects_repeats() {
        let columns: Vec<Column> = vec![
            Series::new("x".into(), vec!["1".to_string(), "1".to_string()]).into_column(),
        ];
        let df = DataFrame::new(columns).unwrap();
        assert_eq!(duplicate_frame_rows(&df), 1);
    }
}
