use itertools::Itertools;
use serde_json::{Map, Value};

use crate::domain::Table;

/// CSV rendition of one table: header line first, one line per row,
/// RFC 4180 quoting for cells carrying delimiters, quotes or newlines.
pub fn table_to_csv(table: &Table) -> String {
    let mut lines = Vec::with_capacity(table.rows.len() + 1);
    lines.push(table.columns.iter().map(|cell| escape_csv_cell(cell)).join(","));
    for row in &table.rows {
        lines.push(row.iter().map(|cell| escape_csv_cell(cell)).join(","));
    }

    let mut csv = lines.join("\n");
    csv.push('\n');
    csv
}

fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// JSON rendition of one table: an array with one object per row, keyed
/// by column label.
pub fn table_to_json(table: &Table) -> Value {
    Value::Array(
        table
            .rows
            .iter()
            .map(|row| {
                let mut object = Map::new();
                for (column, cell) in table.columns.iter().zip(row) {
                    object.insert(column.clone(), Value::String(cell.clone()));
                }
                Value::Object(object)
            })
            .collect(),
    )
}
