use std::fmt;
use strum::{EnumIter, IntoEnumIterator};

/// Settings of the CSV reader. The defaults read plain comma-separated files with double-quoted
/// fields, which is what nearly every published dataset uses.
#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub struct CsvConfig {
    /// The delimiter that separates values within each row. Only single-byte delimiters are
    /// supported.
    #[clap(long, value_enum, default_value_t = Delimiter::Comma, env = "SEED_CSV_DELIMITER")]
    pub delimiter: Delimiter,

    /// The character used to quote fields.
    #[clap(long, value_enum, default_value_t = Quote::DoubleQuote, env = "SEED_CSV_QUOTE")]
    pub quote: Quote,

    /// Guess the delimiter and quote character from a prefix of the content, instead of using
    /// `--delimiter` and `--quote`.
    #[clap(long)]
    pub sniff: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        CsvConfig {
            delimiter: Delimiter::Comma,
            quote: Quote::DoubleQuote,
            sniff: false,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, EnumIter, clap::ValueEnum)]
pub enum Quote {
    DoubleQuote,
    SingleQuote,
    None,
}

impl Quote {
    pub fn byte_value(&self) -> Option<u8> {
        match *self {
            Quote::DoubleQuote => Some(b'"'),
            Quote::SingleQuote => Some(b'\''),
            Quote::None => None,
        }
    }

    pub fn string_title(&self) -> &'static str {
        match *self {
            Quote::DoubleQuote => "Double Quote (\")",
            Quote::SingleQuote => "Single Quote (')",
            Quote::None => "Disable Quoting",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, EnumIter, clap::ValueEnum)]
pub enum Delimiter {
    Comma,
    Pipe,
    Space,
    Semicolon,
    Tab,
    Tilde,
    VerticalTab,
    UnitSeparator,
    Soh,
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.string_title())
    }
}

impl Delimiter {
    pub fn byte_value(&self) -> u8 {
        match *self {
            Delimiter::Comma => b',',
            Delimiter::Pipe => b'|',
            Delimiter::Space => b' ',
            Delimiter::Semicolon => b';',
            Delimiter::Tab => b'\t',
            Delimiter::Tilde => b'~',
            Delimiter::VerticalTab => 0x0B,
            Delimiter::UnitSeparator => 0x1F,
            Delimiter::Soh => 0x01,
        }
    }

    pub fn string_title(&self) -> &'static str {
        match *self {
            Delimiter::Comma => "Comma (,)",
            Delimiter::Pipe => "Pipe (|)",
            Delimiter::Space => "Space (0x20)",
            Delimiter::Semicolon => "Semicolon (;)",
            Delimiter::Tab => "Tab (0x09)",
            Delimiter::Tilde => "Tilde (~)",
            Delimiter::VerticalTab => "Vertical Tab (0x0B)",
            Delimiter::UnitSeparator => "Unit Separator (0x1F)",
            Delimiter::Soh => "SOH (0x01)",
        }
    }

    pub fn possible_values() -> Vec<Self> {
        Delimiter::iter().collect()
    }
}
