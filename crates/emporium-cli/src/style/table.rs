//! Table formatting using comfy-table.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use super::colors::SemanticStyle;

/// Creates a styled table with a bold header row.
pub fn styled_table(columns: &[&str], rows: &[Vec<String>]) -> Table {
    let mut table = Table::new();

    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = columns
        .iter()
        .map(|col| {
            if super::no_color() {
                Cell::new(col)
            } else {
                Cell::new(col)
                    .add_attribute(Attribute::Bold)
                    .fg(Color::Cyan)
            }
        })
        .collect();
    table.set_header(header_cells);

    for row in rows {
        table.add_row(row);
    }

    table
}

/// Prints rows as a formatted table followed by a count footer.
///
/// `noun` is the singular and plural of what a row holds.
pub fn print_table(columns: &[&str], rows: &[Vec<String>], noun: (&str, &str)) {
    let (singular, plural) = noun;
    if rows.is_empty() {
        println!("{}", format!("No {plural}.").muted());
        return;
    }

    let table = styled_table(columns, rows);
    println!("{table}");

    let count = rows.len();
    let word = if count == 1 { singular } else { plural };
    println!("{}", format!("({count} {word})").muted());
}
