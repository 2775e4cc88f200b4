//! Demographics report structure.
//!
//! A report is an ordered list of named sections. Each section is a tagged
//! variant so the spreadsheet writer can dispatch by case instead of
//! inspecting the payload at runtime.

use polars::prelude::DataFrame;

/// Excel limits worksheet names to 31 characters.
pub const SHEET_NAME_MAX: usize = 31;

/// One section of a demographics report.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportSection {
    /// A tabular section written as a sheet with headers.
    Table(DataFrame),
    /// A bare scalar written as a single "Value" cell.
    Scalar(String),
    /// Sub-reports keyed by category (e.g. salary stats per pay unit).
    /// Each sub-key becomes its own sheet named `{section}_{subkey}`.
    Nested(Vec<(String, DataFrame)>),
}

/// An ordered collection of named report sections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    sections: Vec<(String, ReportSection)>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section, preserving insertion order.
    pub fn push(&mut self, name: impl Into<String>, section: ReportSection) {
        self.sections.push((name.into(), section));
    }

    /// Append a tabular section.
    pub fn push_table(&mut self, name: impl Into<String>, table: DataFrame) {
        self.push(name, ReportSection::Table(table));
    }

    pub fn sections(&self) -> &[(String, ReportSection)] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Look up a section by name.
    pub fn get(&self, name: &str) -> Option<&ReportSection> {
        self.sections
            .iter()
            .find(|(section, _)| section == name)
            .map(|(_, data)| data)
    }

    /// Total number of sheets this report expands to, counting one sheet
    /// per sub-key for nested sections.
    pub fn sheet_count(&self) -> usize {
        self.sections
            .iter()
            .map(|(_, section)| match section {
                ReportSection::Nested(subs) => subs.len(),
                _ => 1,
            })
            .sum()
    }
}

/// Truncate a sheet name to the Excel 31-character limit.
pub fn truncate_sheet_name(name: &str) -> String {
    if name.chars().count() <= SHEET_NAME_MAX {
        name.to_string()
    } else {
        name.chars().take(SHEET_NAME_MAX).collect()
    }
}
