use crate::config::{CsvConfig, Delimiter, Quote};
use crate::detection::{detect_delimiter, detect_quote_char, PEEK_LEN};
use csv::{StringRecord, Terminator};
use serde_json::Value;
use std::collections::HashSet;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse character-separated content: {0}")]
    InvalidContent(#[from] csv::Error),

    #[error("no columns to parse: the content has no header row")]
    NoColumns,

    #[error("row {0} has {1} columns, but the headers only define {2} columns")]
    ExtraColumn(u64, usize, usize),

    #[error("content is not valid {0}")]
    Encoding(&'static str),
}

/// Cell values which are read as null, regardless of the column's type.
pub const NULL_SENTINELS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const TRUE_VALUES: &[&str] = &["True", "TRUE", "true"];
const FALSE_VALUES: &[&str] = &["False", "FALSE", "false"];

/// The type of a column, inferred from every non-null cell of the column.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ColumnType {
    /// Every cell is null, or there are no rows.
    Null,
    Boolean,
    Integer,
    Float,
    /// Cells are kept as their original text.
    String,
}

impl ColumnType {
    /// Returns the narrowest type able to represent `cell`.
    fn of(cell: &str) -> ColumnType {
        if NULL_SENTINELS.contains(&cell) {
            ColumnType::Null
        } else if cell.parse::<i64>().is_ok() {
            ColumnType::Integer
        } else if cell.parse::<f64>().map_or(false, f64::is_finite) {
            ColumnType::Float
        } else if parse_bool(cell).is_some() {
            ColumnType::Boolean
        } else {
            ColumnType::String
        }
    }

    /// Returns the narrowest type able to represent values of both `self` and `other`.
    fn widen(self, other: ColumnType) -> ColumnType {
        match (self, other) {
            (ColumnType::Null, t) | (t, ColumnType::Null) => t,
            (a, b) if a == b => a,
            (ColumnType::Integer, ColumnType::Float) | (ColumnType::Float, ColumnType::Integer) => {
                ColumnType::Float
            }
            _ => ColumnType::String,
        }
    }
}

fn parse_bool(cell: &str) -> Option<bool> {
    if TRUE_VALUES.contains(&cell) {
        Some(true)
    } else if FALSE_VALUES.contains(&cell) {
        Some(false)
    } else {
        None
    }
}

/// A named column of a `Table`, and the type of its values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
}

impl Column {
    /// Converts a raw `cell` of this column into a typed value. The column type was inferred
    /// from this very cell, so conversion cannot fail. Should it anyway, the text is kept.
    fn parse(&self, cell: &str) -> Value {
        if NULL_SENTINELS.contains(&cell) {
            return Value::Null;
        }
        let parsed = match self.column_type {
            ColumnType::Null => None,
            ColumnType::Boolean => parse_bool(cell).map(Value::Bool),
            ColumnType::Integer => cell.parse::<i64>().ok().map(Value::from),
            ColumnType::Float => cell
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            ColumnType::String => None,
        };
        parsed.unwrap_or_else(|| Value::String(cell.to_string()))
    }
}

/// The cells of a single row, in column order. A row always has one cell per column.
pub type Row = Vec<Value>;

/// Tabular data read from character-separated content: one `Row` per data record, in the order
/// the records appear, with columns named by the header record.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Table {
    /// Parses `content` into a table. The first record is the header. Column types are inferred
    /// from all rows before any cell is converted, so every cell of a column has the same type
    /// (or is null).
    #[tracing::instrument(level = "debug", skip_all, fields(len = content.len()), err)]
    pub fn parse(content: &[u8], config: &CsvConfig) -> Result<Table, Error> {
        let text = crate::encoding::decode(content)?;
        let peek = &text.as_bytes()[..text.len().min(PEEK_LEN)];

        let (delimiter, quote) = if config.sniff {
            let delimiter = detect_delimiter(peek);
            let quote = detect_quote_char(delimiter.byte_value(), peek).unwrap_or(Quote::DoubleQuote);
            tracing::debug!(quote_char = quote.string_title(), "detected quote char");
            (delimiter, quote)
        } else {
            (config.delimiter, config.quote)
        };

        let mut reader = reader_builder(delimiter, quote).from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(Error::NoColumns);
        }
        let names = dedupe_names(&headers);
        tracing::debug!(nColumns = names.len(), "parsed headers");

        let mut records = Vec::new();
        let mut column_types = vec![ColumnType::Null; names.len()];
        let mut record = StringRecord::new();
        let mut row_num = 0u64;

        while reader.read_record(&mut record)? {
            row_num += 1;
            if record.len() > names.len() {
                return Err(Error::ExtraColumn(row_num, record.len(), names.len()));
            }
            for (ty, cell) in column_types.iter_mut().zip(record.iter()) {
                *ty = ty.widen(ColumnType::of(cell));
            }
            records.push(record.clone());
        }

        let columns: Vec<Column> = names
            .into_iter()
            .zip(column_types)
            .map(|(name, column_type)| Column { name, column_type })
            .collect();
        tracing::info!(headers = ?columns, "resolved columns");

        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(i, column)| record.get(i).map_or(Value::Null, |cell| column.parse(cell)))
                    .collect()
            })
            .collect::<Vec<Row>>();
        tracing::info!(nRows = rows.len(), "parsed rows");

        Ok(Table { columns, rows })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

fn reader_builder(delimiter: Delimiter, quote: Quote) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    // Rows are permitted to have more columns than the header row, so that `Table::parse` can
    // report the offending row itself. Short rows are padded with nulls.
    builder.flexible(true);
    builder.has_headers(true);
    builder.delimiter(delimiter.byte_value());
    // CRLF also permits lone CR or LF characters.
    builder.terminator(Terminator::CRLF);
    match quote.byte_value() {
        Some(q) => builder.quote(q),
        None => builder.quoting(false),
    };
    builder
}

/// Disambiguates repeated header names by suffixing `.1`, `.2`, ... onto later occurrences.
fn dedupe_names(headers: &StringRecord) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(headers.len());

    for header in headers.iter() {
        let mut name = header.to_string();
        let mut suffix = 0;
        while !seen.insert(name.clone()) {
            suffix += 1;
            name = format!("{header}.{suffix}");
        }
        names.push(name);
    }
    names
}
