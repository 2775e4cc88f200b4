//! Multi-sheet workbook assembly.
//!
//! One `Cleaned_Data` sheet carries the full transformed frame, then each
//! report section becomes its own sheet, dispatched by section variant.
//! Nested sections expand to one sheet per sub-key.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{AnyValue, DataFrame};
use rust_xlsxwriter::{Workbook, Worksheet};
use tracing::info;

use dataprep_ingest::polars_utils::{any_to_f64, any_to_string};
use dataprep_model::report::{Report, ReportSection, SHEET_NAME_MAX, truncate_sheet_name};

/// Write the cleaned frame and the demographics report as one workbook.
pub fn write_workbook(path: &Path, cleaned: &DataFrame, report: &Report) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }

    let mut workbook = Workbook::new();
    let mut used_names: HashSet<String> = HashSet::new();

    let sheet = workbook.add_worksheet();
    sheet
        .set_name(unique_sheet_name("Cleaned_Data", &mut used_names))
        .context("name Cleaned_Data sheet")?;
    write_frame(sheet, cleaned)?;

    for (name, section) in report.sections() {
        match section {
            ReportSection::Table(df) => {
                let sheet = workbook.add_worksheet();
                sheet
                    .set_name(unique_sheet_name(name, &mut used_names))
                    .with_context(|| format!("name sheet {name}"))?;
                write_frame(sheet, df)?;
            }
            ReportSection::Scalar(value) => {
                let sheet = workbook.add_worksheet();
                sheet
                    .set_name(unique_sheet_name(name, &mut used_names))
                    .with_context(|| format!("name sheet {name}"))?;
                sheet.write_string(0, 0, "Value").context("write header")?;
                sheet.write_string(1, 0, value).context("write value")?;
            }
            ReportSection::Nested(subs) => {
                for (sub_key, df) in subs {
                    let full = format!("{name}_{sub_key}");
                    let sheet = workbook.add_worksheet();
                    sheet
                        .set_name(unique_sheet_name(&full, &mut used_names))
                        .with_context(|| format!("name sheet {full}"))?;
                    write_frame(sheet, df)?;
                }
            }
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("save {}", path.display()))?;
    info!(
        path = %path.display(),
        sheets = report.sheet_count() + 1,
        "workbook written"
    );
    Ok(())
}

/// Write a frame with a header row; numeric cells become numbers, nulls
/// stay blank.
fn write_frame(sheet: &mut Worksheet, df: &DataFrame) -> Result<()> {
    for (col_idx, name) in df.get_column_names().iter().enumerate() {
        sheet
            .write_string(0, col_idx as u16, name.as_str())
            .with_context(|| format!("write header {name}"))?;
    }
    for (col_idx, column) in df.get_columns().iter().enumerate() {
        for row_idx in 0..df.height() {
            let value = column.get(row_idx).unwrap_or(AnyValue::Null);
            write_cell(sheet, row_idx as u32 + 1, col_idx as u16, value)?;
        }
    }
    Ok(())
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, value: AnyValue<'_>) -> Result<()> {
    match value {
        AnyValue::Null => {}
        AnyValue::String(_) | AnyValue::StringOwned(_) | AnyValue::Boolean(_) => {
            sheet
                .write_string(row, col, any_to_string(value))
                .context("write cell")?;
        }
        other => match any_to_f64(other.clone()) {
            Some(number) if number.is_finite() => {
                sheet.write_number(row, col, number).context("write cell")?;
            }
            _ => {
                sheet
                    .write_string(row, col, any_to_string(other))
                    .context("write cell")?;
            }
        },
    }
    Ok(())
}

/// Truncate to the Excel limit and disambiguate collisions with a numeric
/// suffix, keeping the result within the limit.
fn unique_sheet_name(name: &str, used: &mut HashSet<String>) -> String {
    let base = truncate_sheet_name(name);
    if used.insert(base.clone()) {
        return base;
    }
    for n in 2.. {
        let suffix = format!("_{n}");
        let keep = SHEET_NAME_MAX.saturating_sub(suffix.chars().count());
        let candidate: String = base.chars().take(keep).collect::<String>() + &suffix;
        if used.insert(candidate.clone()) {
            return candidate;
        }
    }
    unreachable!("suffix search is unbounded")
}
