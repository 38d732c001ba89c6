use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{RunResult, SheetSummary};

pub fn print_summary(result: &RunResult) {
    if result.written {
        println!("Feed: {} ({} bytes)", result.output.display(), result.bytes);
    } else {
        println!("Feed: dry run ({} bytes, not written)", result.bytes);
    }
    println!("Categories: {}", result.categories);
    if result.dropped_bindings > 0 {
        println!("Dropped bindings: {}", result.dropped_bindings);
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Rows"),
        header_cell("Offers"),
        header_cell("Available"),
        header_cell("Filtered"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for sheet in &result.sheets {
        table.add_row(vec![
            Cell::new(&sheet.sheet),
            Cell::new(sheet.rows),
            Cell::new(sheet.offers),
            Cell::new(sheet.available),
            filtered_cell(sheet.filtered),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total(&result.sheets, |sheet| sheet.rows)).add_attribute(Attribute::Bold),
        Cell::new(result.offers).add_attribute(Attribute::Bold),
        Cell::new(total(&result.sheets, |sheet| sheet.available)).add_attribute(Attribute::Bold),
        filtered_cell(total(&result.sheets, |sheet| sheet.filtered))
            .add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if !result.duplicate_ids.is_empty() {
        println!("Duplicate offer ids: {}", result.duplicate_ids.join(", "));
    }
    if !result.corrections.is_empty() {
        println!("Escaped residual entities:");
        for (entity, count) in &result.corrections {
            println!("- &{entity}; x{count}");
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn filtered_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn total(sheets: &[SheetSummary], field: impl Fn(&SheetSummary) -> usize) -> usize {
    sheets.iter().map(field).sum()
}
