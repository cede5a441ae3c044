use crate::table::Table;
use comfy_table::Cell;
use serde_json::Value;

/// Renders the first `rows` rows of `table` for display, with a leading column of row indices.
pub fn preview(table: &Table, rows: usize) -> comfy_table::Table {
    let mut out = comfy_table::Table::new();
    out.load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .apply_modifier(comfy_table::modifiers::UTF8_SOLID_INNER_BORDERS);

    let mut headers = vec![String::new()];
    headers.extend(table.column_names().map(str::to_string));
    out.set_header(headers);

    for (index, row) in table.rows().iter().take(rows).enumerate() {
        let mut cells = vec![Cell::new(index)];
        cells.extend(row.iter().map(|value| JsonCell(value).into()));
        out.add_row(cells);
    }
    out
}

/// Wraps a cell value for conversion into a table cell. Strings are shown without quotes.
struct JsonCell<'a>(&'a Value);

impl Into<Cell> for JsonCell<'_> {
    fn into(self) -> Cell {
        match self.0 {
            Value::String(s) => Cell::new(s),
            other => Cell::new(other),
        }
    }
}
