//! Reads character-separated text into an in-memory, column-typed table.
mod config;
mod detection;
mod encoding;
mod preview;
mod table;

pub use self::config::{CsvConfig, Delimiter, Quote};
pub use self::encoding::decode;
pub use self::preview::preview;
pub use self::table::{Column, ColumnType, Error, Row, Table, NULL_SENTINELS};
