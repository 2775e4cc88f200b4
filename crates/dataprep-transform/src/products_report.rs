//! Product demographics report.

use anyhow::{Context, Result};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use dataprep_ingest::stats::{histogram, mean};
use dataprep_model::report::Report;

use crate::demographics::{
    basic_info, count_table, data_types, metric_table, missing_by_column, numeric_stats,
};
use crate::products::{ProductRecord, ProductTable};

/// Build the product demographics report, sections in fixed order.
pub fn product_demographics(table: &ProductTable) -> Result<Report> {
    let df = table.to_frame()?;
    let mut report = Report::new();
    report.push_table("Basic_Info", basic_info(&df)?);
    report.push_table("Data_Types", data_types(&df)?);
    report.push_table("Numeric_Stats", numeric_stats(&df, &[])?);
    report.push_table("Missing_By_Column", missing_by_column(&df)?);
    report.push_table("Business_Summary", business_summary(&table.records)?);
    if let Some(product) = max_discount_product(&table.records) {
        report.push_table("Max_Discount_Product", product?);
    }
    if let Some(product) = best_selling(&table.records) {
        report.push_table("Best_Selling", product?);
    }
    report.push_table("Top5_Revenue", top5_revenue(&table.records)?);
    report.push_table("Price_Distribution", price_distribution(&table.records)?);
    Ok(report)
}

fn business_summary(records: &[ProductRecord]) -> Result<DataFrame> {
    let actual: Vec<f64> = records.iter().map(|r| r.actual_price).collect();
    let discounts: Vec<f64> = records.iter().map(|r| r.discount_percentage).collect();
    let metrics = [
        ("Avg Price", mean(&actual).unwrap_or(0.0)),
        (
            "Median Price",
            dataprep_ingest::stats::median(&actual).unwrap_or(0.0),
        ),
        ("Avg Discount %", mean(&discounts).unwrap_or(0.0)),
        (
            "Total Potential Revenue",
            records.iter().map(|r| r.potential_revenue).sum(),
        ),
        (
            "Total Potential Loss (Discount)",
            records
                .iter()
                .map(|r| r.potential_loss_from_discount)
                .sum(),
        ),
    ];
    metric_table(&metrics)
}

/// First row achieving the maximum discount percentage; None when the
/// table is empty.
fn max_discount_product(records: &[ProductRecord]) -> Option<Result<DataFrame>> {
    let winner = records.iter().fold(None::<&ProductRecord>, |best, r| {
        match best {
            Some(b) if r.discount_percentage > b.discount_percentage => Some(r),
            Some(b) => Some(b),
            None => Some(r),
        }
    })?;
    let columns: Vec<Column> = vec![
        Series::new("Name".into(), vec![winner.name.clone()]).into_column(),
        Series::new("Discount%".into(), vec![winner.discount_percentage]).into_column(),
        Series::new("Price".into(), vec![winner.actual_price]).into_column(),
    ];
    Some(DataFrame::new(columns).context("build Max_Discount_Product section"))
}

/// First row achieving the maximum rating count; None when empty.
fn best_selling(records: &[ProductRecord]) -> Option<Result<DataFrame>> {
    let winner = records.iter().fold(None::<&ProductRecord>, |best, r| {
        match best {
            Some(b) if r.no_of_ratings > b.no_of_ratings => Some(r),
            Some(b) => Some(b),
            None => Some(r),
        }
    })?;
    let columns: Vec<Column> = vec![
        Series::new("Name".into(), vec![winner.name.clone()]).into_column(),
        Series::new("Ratings".into(), vec![winner.no_of_ratings]).into_column(),
        Series::new("Avg_Rating".into(), vec![winner.ratings]).into_column(),
    ];
    Some(DataFrame::new(columns).context("build Best_Selling section"))
}

/// Top five rows by potential revenue; ties keep input order.
fn top5_revenue(records: &[ProductRecord]) -> Result<DataFrame> {
    let mut ranked: Vec<&ProductRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.potential_revenue.total_cmp(&a.potential_revenue));
    ranked.truncate(5);
    let columns: Vec<Column> = vec![
        Series::new(
            "name".into(),
            ranked.iter().map(|r| r.name.clone()).collect::<Vec<_>>(),
        )
        .into_column(),
        Series::new(
            "potential_revenue".into(),
            ranked
                .iter()
                .map(|r| r.potential_revenue)
                .collect::<Vec<_>>(),
        )
        .into_column(),
    ];
    DataFrame::new(columns).context("build Top5_Revenue section")
}

/// Five equal-width price bins, counts descending.
fn price_distribution(records: &[ProductRecord]) -> Result<DataFrame> {
    let prices: Vec<f64> = records.iter().map(|r| r.actual_price).collect();
    let bins = histogram(&prices, 5);
    let entries: Vec<(String, usize)> = bins
        .into_iter()
        .map(|bin| (bin.label, bin.count))
        .collect();
    count_table("Price_Range", "Count", &entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataprep_ingest::polars_utils::{any_to_f64, any_to_string};
    use dataprep_model::report::ReportSection;

    fn record(name: &str, discount_pct: f64, no_of_ratings: f64, revenue: f64) -> ProductRecord {
        ProductRecord {
            name: name.to_string(),
            ratings: 4.0,
            no_of_ratings,
            type_currency: Some("$".to_string()),
            actual_price: 100.0,
            discount_price: 80.0,
            discount_percentage: discount_pct,
            potential_revenue: revenue,
            potential_loss_from_discount: 5.0,
        }
    }

    fn sample_table() -> ProductTable {
        ProductTable {
            records: vec![
                record("A", 20.0, 10.0, 800.0),
                record("B", 35.0, 40.0, 3200.0),
                record("C", 35.0, 40.0, 100.0),
            ],
            extra: Vec::new(),
        }
    }

    #[test]
    fn sections_appear_in_order() {
        let report = product_demographics(&sample_table()).unwrap();
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
                "Missing_By_Column",
                "Business_Summary",
                "Max_Discount_Product",
                "Best_Selling",
                "Top5_Revenue",
                "Price_Distribution",
            ]
        );
    }

    #[test]
    fn max_discount_tie_takes_first_row() {
        let report = product_demographics(&sample_table()).unwrap();
        let Some(ReportSection::Table(df)) = report.get("Max_Discount_Product") else {
            panic!("missing section");
        };
        assert_eq!(any_to_string(df.column("Name").unwrap().get(0).unwrap()), "B");
    }

    #[test]
    fn best_selling_tie_takes_first_row() {
        let report = product_demographics(&sample_table()).unwrap();
        let Some(ReportSection::Table(df)) = report.get("Best_Selling") else {
            panic!("missing section");
        };
        assert_eq!(any_to_string(df.column("Name").unwrap().get(0).unwrap()), "B");
    }

    #[test]
    fn top5_revenue_sorts_descending() {
        let report = product_demographics(&sample_table()).unwrap();
        let Some(ReportSection::Table(df)) = report.get("Top5_Revenue") else {
            panic!("missing section");
        };
        assert_eq!(df.height(), 3);
        let first = any_to_f64(df.column("potential_revenue").unwrap().get(0).unwrap());
        assert_eq!(first, Some(3200.0));
    }

    #[test]
    fn empty_table_skips_winner_sections() {
        let table = ProductTable {
            records: Vec::new(),
            extra: Vec::new(),
        };
        let report = product_demographics(&table).unwrap();
        assert!(report.get("Max_Discount_Product").is_none());
        assert!(report.get("Best_Selling").is_none());
        assert!(report.get("Price_Distribution").is_some());
    }

    #[test]
    fn price_distribution_covers_all_rows() {
        let report = product_demographics(&sample_table()).unwrap();
        let Some(ReportSection::Table(df)) = report.get("Price_Distribution") else {
            panic!("missing section");
        };
        let total: f64 = (0..df.height())
            .filter_map(|idx| any_to_f64(df.column("Count").unwrap().get(idx).unwrap()))
            .sum();
        assert_eq!(total, 3.0);
    }
}
