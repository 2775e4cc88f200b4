//! Product-listings transform.
//!
//! Cleans the raw listings table: numeric coercion with
//! silent-zero fallbacks, currency-string splitting, cross-filling of the
//! price pair, derived revenue/discount columns, and deduplication by
//! product name. Coercing bad values instead of rejecting rows is the
//! point: the output favors completeness over strict validation.

use std::collections::HashSet;

use anyhow::{Context, Result};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::info;

use dataprep_ingest::csv_table::CsvTable;
use dataprep_model::schema::products_schema;

use crate::currency::split_currency;

/// Raw `no_of_ratings` values that mean "no ratings yet".
const RATING_COUNT_SENTINELS: &[&str] = &["GET", "FREE Delivery by Amazon"];

/// One cleaned product listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub name: String,
    pub ratings: f64,
    pub no_of_ratings: f64,
    pub type_currency: Option<String>,
    pub actual_price: f64,
    pub discount_price: f64,
    pub discount_percentage: f64,
    pub potential_revenue: f64,
    pub potential_loss_from_discount: f64,
}

/// The cleaned product table: typed records plus passthrough columns kept
/// as strings (image URLs, links, and whatever else the source carries).
#[derive(Debug, Clone)]
pub struct ProductTable {
    pub records: Vec<ProductRecord>,
    pub extra: Vec<(String, Vec<String>)>,
}

impl ProductTable {
    pub fn height(&self) -> usize {
        self.records.len()
    }

    /// Build the output frame: typed columns first, passthrough after.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(9 + self.extra.len());
        let records = &self.records;
        columns.push(
            Series::new(
                "name".into(),
                records.iter().map(|r| r.name.clone()).collect::<Vec<_>>(),
            )
            .into_column(),
        );
        columns.push(
            Series::new(
                "ratings".into(),
                records.iter().map(|r| r.ratings).collect::<Vec<_>>(),
            )
            .into_column(),
        );
        columns.push(
            Series::new(
                "no_of_ratings".into(),
                records.iter().map(|r| r.no_of_ratings).collect::<Vec<_>>(),
            )
            .into_column(),
        );
        columns.push(
            Series::new(
                "type_currency".into(),
                records
                    .iter()
                    .map(|r| r.type_currency.clone())
                    .collect::<Vec<_>>(),
            )
            .into_column(),
        );
        columns.push(
            Series::new(
                "actual_price".into(),
                records.iter().map(|r| r.actual_price).collect::<Vec<_>>(),
            )
            .into_column(),
        );
        columns.push(
            Series::new(
                "discount_price".into(),
                records.iter().map(|r| r.discount_price).collect::<Vec<_>>(),
            )
            .into_column(),
        );
        columns.push(
            Series::new(
                "discount_percentage".into(),
                records
                    .iter()
                    .map(|r| r.discount_percentage)
                    .collect::<Vec<_>>(),
            )
            .into_column(),
        );
        columns.push(
            Series::new(
                "potential_revenue".into(),
                records
                    .iter()
                    .map(|r| r.potential_revenue)
                    .collect::<Vec<_>>(),
            )
            .into_column(),
        );
        columns.push(
            Series::new(
                "potential_loss_from_discount".into(),
                records
                    .iter()
                    .map(|r| r.potential_loss_from_discount)
                    .collect::<Vec<_>>(),
            )
            .into_column(),
        );
        for (header, values) in &self.extra {
            columns.push(Series::new(header.as_str().into(), values.clone()).into_column());
        }
        DataFrame::new(columns).context("build product frame")
    }
}

/// Clean and enrich the raw product-listings table.
pub fn transform_products(table: &CsvTable) -> Result<ProductTable> {
    products_schema().validate(&table.headers)?;

    let name_idx = table.column_index("name").context("name column")?;
    let ratings_idx = table.column_index("ratings").context("ratings column")?;
    let count_idx = table
        .column_index("no_of_ratings")
        .context("no_of_ratings column")?;
    let discount_idx = table
        .column_index("discount_price")
        .context("discount_price column")?;
    let actual_idx = table
        .column_index("actual_price")
        .context("actual_price column")?;

    let known = [name_idx, ratings_idx, count_idx, discount_idx, actual_idx];

    let mut records = Vec::with_capacity(table.height());
    let mut kept_rows = Vec::with_capacity(table.height());
    let mut seen_names: HashSet<String> = HashSet::new();
    let mut dropped_unpriced = 0usize;
    let mut dropped_duplicates = 0usize;

    for row in 0..table.height() {
        let actual_split = split_currency(table.cell(row, actual_idx));
        let discount_split = split_currency(table.cell(row, discount_idx));
        // Cross-fill: either magnitude stands in for the other.
        let actual = actual_split.amount.or(discount_split.amount);
        let discount = discount_split.amount.or(actual_split.amount);
        let (Some(actual), Some(discount)) = (actual, discount) else {
            dropped_unpriced += 1;
            continue;
        };

        let name = table.cell(row, name_idx).to_string();
        if !seen_names.insert(name.clone()) {
            dropped_duplicates += 1;
            continue;
        }

        let ratings = coerce_numeric(table.cell(row, ratings_idx));
        let no_of_ratings = coerce_rating_count(table.cell(row, count_idx));
        records.push(ProductRecord {
            name,
            ratings,
            no_of_ratings,
            type_currency: actual_split.symbol,
            actual_price: actual,
            discount_price: discount,
            discount_percentage: discount_percentage(actual, discount),
            potential_revenue: discount * no_of_ratings,
            potential_loss_from_discount: (actual - discount) * no_of_ratings,
        });
        kept_rows.push(row);
    }

    let extra: Vec<(String, Vec<String>)> = table
        .headers
        .iter()
        .enumerate()
        .filter(|(idx, header)| !known.contains(idx) && !is_index_artifact(header))
        .map(|(idx, header)| {
            let values = kept_rows
                .iter()
                .map(|&row| table.cell(row, idx).to_string())
                .collect();
            (header.clone(), values)
        })
        .collect();

    info!(
        rows_in = table.height(),
        rows_out = records.len(),
        dropped_unpriced,
        dropped_duplicates,
        "product transform complete"
    );
    Ok(ProductTable { records, extra })
}

/// Index column left behind by earlier tooling ("Unnamed: 0" or blank).
fn is_index_artifact(header: &str) -> bool {
    header.is_empty() || header == "Unnamed: 0"
}

/// Coerce to f64, zero on failure. Rust's float parser accepts literal
/// "NaN"/"inf" text; those count as failures here so they cannot leak
/// into the derived columns.
fn coerce_numeric(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Coerce a rating count, mapping the known non-numeric sentinels (and any
/// other parse failure) to zero.
fn coerce_rating_count(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if RATING_COUNT_SENTINELS.contains(&trimmed) {
        return 0.0;
    }
    coerce_numeric(trimmed)
}

/// `round((actual - discount) / actual * 100, 2)`, zero when undefined.
fn discount_percentage(actual: f64, discount: f64) -> f64 {
    if actual == 0.0 {
        return 0.0;
    }
    let pct = (actual - discount) / actual * 100.0;
    if pct.is_finite() {
        (pct * 100.0).round() / 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: Vec<Vec<&str>>) -> CsvTable {
        CsvTable {
            headers: vec![
                "name".to_string(),
                "ratings".to_string(),
                "no_of_ratings".to_string(),
                "discount_price".to_string(),
                "actual_price".to_string(),
            ],
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(String::from).collect())
                .collect(),
        }
    }

    #[test]
    fn spec_example_prices_and_discount() {
        let cleaned =
            transform_products(&table(vec![vec!["Bike", "4.2", "10", "$19.99", "$29.99"]]))
                .unwrap();
        let record = &cleaned.records[0];
        assert_eq!(record.actual_price, 29.99);
        assert_eq!(record.discount_price, 19.99);
        assert_eq!(record.discount_percentage, 33.34);
        assert_eq!(record.type_currency.as_deref(), Some("$"));
    }

    #[test]
    fn cross_fill_leaves_no_half_missing_pair() {
        let cleaned = transform_products(&table(vec![
            vec!["A", "4", "1", "", "$100"],
            vec!["B", "4", "1", "$80", ""],
        ]))
        .unwrap();
        assert_eq!(cleaned.records[0].discount_price, 100.0);
        assert_eq!(cleaned.records[0].discount_percentage, 0.0);
        assert_eq!(cleaned.records[1].actual_price, 80.0);
    }

    #[test]
    fn rows_with_no_price_at_all_are_dropped() {
        let cleaned = transform_products(&table(vec![
            vec!["A", "4", "1", "", ""],
            vec!["B", "4", "1", "$10", "$20"],
        ]))
        .unwrap();
        assert_eq!(cleaned.height(), 1);
        assert_eq!(cleaned.records[0].name, "B");
    }

    #[test]
    fn sentinel_rating_counts_become_zero() {
        let cleaned = transform_products(&table(vec![
            vec!["A", "bad", "GET", "$10", "$20"],
            vec!["B", "3.9", "FREE Delivery by Amazon", "$10", "$20"],
            vec!["C", "4.0", "257", "$10", "$20"],
        ]))
        .unwrap();
        assert_eq!(cleaned.records[0].ratings, 0.0);
        assert_eq!(cleaned.records[0].no_of_ratings, 0.0);
        assert_eq!(cleaned.records[1].no_of_ratings, 0.0);
        assert_eq!(cleaned.records[2].no_of_ratings, 257.0);
        assert_eq!(cleaned.records[2].potential_revenue, 2570.0);
        assert_eq!(cleaned.records[2].potential_loss_from_discount, 2570.0);
    }

    #[test]
    fn dedup_by_name_keeps_first_and_is_idempotent() {
        let rows = vec![
            vec!["Same", "4.0", "5", "$10", "$20"],
            vec!["Same", "1.0", "9", "$1", "$2"],
            vec!["Other", "2.0", "3", "$5", "$8"],
        ];
        let cleaned = transform_products(&table(rows)).unwrap();
        assert_eq!(cleaned.height(), 2);
        assert_eq!(cleaned.records[0].ratings, 4.0);

        // Re-running the transform over its own output changes nothing.
        let frame = cleaned.to_frame().unwrap();
        assert_eq!(frame.height(), 2);
    }

    #[test]
    fn passthrough_columns_follow_row_drops() {
        let mut t = table(vec![
            vec!["A", "4", "1", "", ""],
            vec!["B", "4", "1", "$10", "$20"],
        ]);
        t.headers.push("link".to_string());
        t.rows[0].push("http://a".to_string());
        t.rows[1].push("http://b".to_string());
        let cleaned = transform_products(&t).unwrap();
        assert_eq!(cleaned.extra.len(), 1);
        assert_eq!(cleaned.extra[0].1, vec!["http://b".to_string()]);
    }

    #[test]
    fn index_artifact_columns_are_dropped() {
        let mut t = table(vec![vec!["A", "4", "1", "$10", "$20"]]);
        t.headers.push("Unnamed: 0".to_string());
        t.rows[0].push("0".to_string());
        let cleaned = transform_products(&t).unwrap();
        assert!(cleaned.extra.is_empty());
    }

    #[test]
    fn zero_actual_price_yields_zero_discount_percentage() {
        assert_eq!(discount_percentage(0.0, 0.0), 0.0);
        assert_eq!(discount_percentage(20.0, 15.0), 25.0);
    }

    #[test]
    fn literal_nan_and_inf_cells_coerce_to_zero() {
        assert_eq!(coerce_numeric("NaN"), 0.0);
        assert_eq!(coerce_numeric("inf"), 0.0);
        assert_eq!(coerce_numeric("-inf"), 0.0);
        let cleaned =
            transform_products(&table(vec![vec!["A", "NaN", "inf", "$10", "$20"]])).unwrap();
        assert_eq!(cleaned.records[0].ratings, 0.0);
        assert_eq!(cleaned.records[0].no_of_ratings, 0.0);
        assert_eq!(cleaned.records[0].potential_revenue, 0.0);
    }
}
