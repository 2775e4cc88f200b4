use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

/// A raw CSV file in memory: header row plus string rows.
///
/// Values are read as-is; typing happens later in the transform stage.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Index of a column by exact header name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Cell value at (row, column index), empty string when out of range.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// All values of a named column, empty strings for ragged rows.
    pub fn column_values(&self, name: &str) -> Option<Vec<String>> {
        let idx = self.column_index(name)?;
        Some(
            (0..self.height())
                .map(|row| self.cell(row, idx).to_string())
                .collect(),
        )
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a CSV file into a [`CsvTable`].
///
/// The first record is the header row. Fully empty rows are skipped and
/// ragged rows are padded/truncated to the header width.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;
    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => {
            let record = record.with_context(|| format!("read header: {}", path.display()))?;
            record.iter().map(normalize_header).collect()
        }
        None => {
            return Ok(CsvTable {
                headers: Vec::new(),
                rows: Vec::new(),
            });
        }
    };
    let mut rows = Vec::new();
    for record in records {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            let value = record.get(idx).unwrap_or("");
            row.push(normalize_cell(value));
        }
        rows.push(row);
    }
    Ok(CsvTable { headers, rows })
}

/// Inferred kind of a string column, used for profiling and describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every non-empty value parses as a number.
    Numeric,
    /// At least one non-empty value is non-numeric text.
    Text,
    /// No non-empty values at all.
    Empty,
}

/// Infer the kind of one column from its raw string values.
pub fn column_kind(values: &[String]) -> ColumnKind {
    let mut non_empty = 0usize;
    let mut numeric = 0usize;
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            continue;
        }
        non_empty += 1;
        if trimmed.parse::<f64>().is_ok() {
            numeric += 1;
        }
    }
    if non_empty == 0 {
        ColumnKind::Empty
    } else if numeric == non_empty {
        ColumnKind::Numeric
    } else {
        ColumnKind::Text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_kind_all_numeric() {
        let values = vec!["1".to_string(), "2.5".to_string(), String::new()];
        assert_eq!(column_kind(&values), ColumnKind::Numeric);
    }

    #[test]
    fn column_kind_mixed_is_text() {
        let values = vec!["1".to_string(), "abc".to_string()];
        assert_eq!(column_kind(&values), ColumnKind::Text);
    }

    #[test]
    fn column_kind_empty() {
        let values = vec![String::new(), "  ".to_string()];
        assert_eq!(column_kind(&values), ColumnKind::Empty);
    }

    #[test]
    fn header_normalization_collapses_whitespace() {
        assert_eq!(normalize_header("  actual   price "), "actual price");
    }
}
