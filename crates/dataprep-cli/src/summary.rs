//! Post-run summary table.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dataprep_cli::pipeline::PipelineOutcome;

pub fn print_summary(outcome: &PipelineOutcome) {
    println!("Pipeline: {}", outcome.pipeline);
    println!("Output: {}", outcome.workbook_path.display());
    if let Some(path) = &outcome.profile_path {
        println!("Profile: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows In"),
        header_cell("Rows Out"),
        header_cell("Dropped"),
        header_cell("Sheets"),
    ]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    for index in 0..table.column_count() {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    let dropped = outcome.rows_in.saturating_sub(outcome.rows_out);
    table.add_row(vec![
        Cell::new(outcome.rows_in),
        Cell::new(outcome.rows_out),
        dropped_cell(dropped),
        Cell::new(outcome.sheets),
    ]);
    println!("{table}");
}

fn dropped_cell(dropped: usize) -> Cell {
    if dropped > 0 {
        Cell::new(dropped).fg(Color::Yellow)
    } else {
        Cell::new(dropped).fg(Color::DarkGrey)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
