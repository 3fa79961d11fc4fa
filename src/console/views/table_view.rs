//! Table layout for the list view.
//!
//! Produces plain text lines; the renderer decides how they reach the screen.

use crate::console::models::{Record, RowActionKind, TableModel};
use crate::console::schema::EntitySchema;
use unicode_width::UnicodeWidthStr;

const COLUMN_SEPARATOR: &str = " | ";
const ROW_NUMBER_HEADER: &str = "#";
const ACTIONS_HEADER: &str = "Actions";

/// Label of the trailing action cell, e.g. `Edit Delete`
pub fn actions_cell() -> String {
    [RowActionKind::Edit, RowActionKind::Delete]
        .iter()
        .map(|kind| kind.label())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Column labels followed by the actions header
pub fn header_cells(schema: &EntitySchema) -> Vec<String> {
    schema
        .columns()
        .map(|field| field.label.to_string())
        .chain(std::iter::once(ACTIONS_HEADER.to_string()))
        .collect()
}

/// Cells of one record: listed fields in schema order, then the actions
pub fn row_cells(schema: &EntitySchema, record: &Record) -> Vec<String> {
    schema
        .columns()
        .map(|field| record.display_value(field.name))
        .chain(std::iter::once(actions_cell()))
        .collect()
}

/// Render the whole table as aligned lines
pub fn table_lines(schema: &EntitySchema, table: &TableModel) -> Vec<String> {
    if table.is_empty() {
        return vec![format!("No {} found.", schema.plural)];
    }

    let mut grid: Vec<Vec<String>> = Vec::with_capacity(table.len() + 1);
    let mut header = vec![ROW_NUMBER_HEADER.to_string()];
    header.extend(header_cells(schema));
    grid.push(header);
    for (index, record) in table.rows().iter().enumerate() {
        let mut cells = vec![(index + 1).to_string()];
        cells.extend(row_cells(schema, record));
        grid.push(cells);
    }

    let columns = grid[0].len();
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            grid.iter()
                .map(|cells| UnicodeWidthStr::width(cells[col].as_str()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(grid.len() + 1);
    for (index, cells) in grid.iter().enumerate() {
        lines.push(join_padded(cells, &widths));
        if index == 0 {
            lines.push(separator_line(&widths));
        }
    }
    lines
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    let last = cells.len().saturating_sub(1);
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(col, (cell, width))| {
            if col == last {
                // No trailing padding on the last column
                cell.clone()
            } else {
                pad(cell, *width)
            }
        })
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR)
}

fn separator_line(widths: &[usize]) -> String {
    widths
        .iter()
        .map(|width| "-".repeat(*width))
        .collect::<Vec<_>>()
        .join("-+-")
}

fn pad(cell: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(cell);
    format!("{cell}{}", " ".repeat(width.saturating_sub(used)))
}
