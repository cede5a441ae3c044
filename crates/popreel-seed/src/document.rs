use mongodb::bson::{Bson, Document};
use serde_json::Value;
use tabular::{Column, Row, Table};

/// Converts every row of `table` into a document, in row order.
pub fn to_documents(table: &Table) -> Vec<Document> {
    table
        .rows()
        .iter()
        .map(|row| to_document(table.columns(), row))
        .collect()
}

/// Converts a single row into a document having one field per column, in column order.
/// No `_id` is added; one is assigned when the document is inserted.
pub fn to_document(columns: &[Column], row: &Row) -> Document {
    columns
        .iter()
        .zip(row)
        .map(|(column, value)| (column.name.clone(), to_bson(value)))
        .collect()
}

/// Maps a cell value onto its BSON counterpart. Integral numbers become 64-bit integers and all
/// other numbers become doubles.
pub fn to_bson(value: &Value) -> Bson {
    match value {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Bson::Int64(i),
            None => Bson::Double(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => Bson::String(s.clone()),
        Value::Array(items) => Bson::Array(items.iter().map(to_bson).collect()),
        Value::Object(fields) => Bson::Document(
            fields
                .iter()
                .map(|(name, value)| (name.clone(), to_bson(value)))
                .collect(),
        ),
    }
}
