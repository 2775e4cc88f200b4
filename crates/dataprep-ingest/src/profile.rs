//! Pre-transform profiling dump.
//!
//! Before any cleaning runs, the raw table is summarized to a plain-text
//! file for eyeballing: shape, head rows, per-column describe, null counts,
//! and the number of duplicate rows.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::csv_table::{ColumnKind, CsvTable, column_kind};
use crate::stats::describe;

const HEAD_ROWS: usize = 5;

/// Render the profiling report for a raw table.
pub fn profile_table(table: &CsvTable) -> String {
    let mut out = String::new();

    out.push_str("=== INFO ===\n");
    out.push_str(&format!(
        "{} rows x {} columns\n",
        table.height(),
        table.width()
    ));
    let columns: Vec<(String, Vec<String>)> = table
        .headers
        .iter()
        .map(|header| {
            let values = table.column_values(header).unwrap_or_default();
            (header.clone(), values)
        })
        .collect();
    for (header, values) in &columns {
        let non_null = values.iter().filter(|v| !v.trim().is_empty()).count();
        let kind = match column_kind(values) {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Text => "text",
            ColumnKind::Empty => "empty",
        };
        out.push_str(&format!("{header}: {non_null} non-null ({kind})\n"));
    }

    out.push_str("\n=== HEAD ===\n");
    out.push_str(&table.headers.join(" | "));
    out.push('\n');
    for row in table.rows.iter().take(HEAD_ROWS) {
        out.push_str(&row.join(" | "));
        out.push('\n');
    }

    out.push_str("\n=== DESCRIBE ===\n");
    for (header, values) in &columns {
        out.push_str(&describe_column(header, values));
    }

    out.push_str("\n=== NULL VALUES ===\n");
    for (header, values) in &columns {
        let nulls = values.iter().filter(|v| v.trim().is_empty()).count();
        out.push_str(&format!("{header}: {nulls}\n"));
    }

    out.push_str("\n=== DUPLICATES ===\n");
    out.push_str(&format!("{}\n", duplicate_row_count(table)));

    out
}

/// Write the profiling report to `path`, creating parent directories.
pub fn write_profile(table: &CsvTable, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create profile dir: {}", parent.display()))?;
    }
    let report = profile_table(table);
    fs::write(path, report).with_context(|| format!("write profile: {}", path.display()))?;
    info!(path = %path.display(), "profile written");
    Ok(())
}

/// Number of rows identical to an earlier row across all columns.
pub fn duplicate_row_count(table: &CsvTable) -> usize {
    let mut seen: HashSet<&[String]> = HashSet::new();
    let mut duplicates = 0usize;
    for row in &table.rows {
        if !seen.insert(row.as_slice()) {
            duplicates += 1;
        }
    }
    duplicates
}

fn describe_column(header: &str, values: &[String]) -> String {
    match column_kind(values) {
        ColumnKind::Numeric => {
            let numeric: Vec<f64> = values
                .iter()
                .filter_map(|v| v.trim().parse::<f64>().ok())
                .collect();
            match describe(&numeric) {
                Some(d) => format!(
                    "{header}: count={} mean={:.4} std={} min={} 25%={} 50%={} 75%={} max={}\n",
                    d.count,
                    d.mean,
                    d.std.map_or("NaN".to_string(), |s| format!("{s:.4}")),
                    d.min,
                    d.q25,
                    d.median,
                    d.q75,
                    d.max
                ),
                None => format!("{header}: count=0\n"),
            }
        }
        ColumnKind::Text | ColumnKind::Empty => {
            let non_empty: Vec<&str> = values
                .iter()
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .collect();
            let unique: HashSet<&str> = non_empty.iter().copied().collect();
            let (top, freq) = most_frequent(&non_empty);
            format!(
                "{header}: count={} unique={} top={top} freq={freq}\n",
                non_empty.len(),
                unique.len()
            )
        }
    }
}

fn most_frequent(values: &[&str]) -> (String, usize) {
    let mut best: Option<(&str, usize)> = None;
    for value in values {
        let count = values.iter().filter(|v| *v == value).count();
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((value, count)),
        }
    }
    match best {
        Some((value, count)) => (value.to_string(), count),
        None => ("-".to_string(), 0),
    }
}
