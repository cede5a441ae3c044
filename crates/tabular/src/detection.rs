//! Best-effort guesses of the dialect of a CSV file, based on a prefix of its content.

use crate::config::{Delimiter, Quote};

/// Number of leading bytes inspected when sniffing the dialect.
pub const PEEK_LEN: usize = 8096;

/// Determines the quote character by counting fields which begin or end with either candidate.
/// Returns `None` when neither is observed often enough to be meaningful.
pub fn detect_quote_char(delimiter: u8, peeked: &[u8]) -> Option<Quote> {
    let mut n_double = 0;
    let mut n_single = 0;

    for line in peeked.split(|&b| b == b'\n' || b == b'\r') {
        for field in line.split(|&b| b == delimiter) {
            match field.first() {
                Some(b'"') => n_double += 1,
                Some(b'\'') => n_single += 1,
                _ => {}
            }
            match field.last() {
                Some(b'"') => n_double += 1,
                Some(b'\'') => n_single += 1,
                _ => {}
            }
        }
    }

    if n_double < 2 && n_single < 2 {
        None
    } else if n_double >= n_single {
        // Ties go to double quotes.
        Some(Quote::DoubleQuote)
    } else {
        Some(Quote::SingleQuote)
    }
}

/// Counts the occurrences of every candidate delimiter within `peeked` and returns the most
/// frequent one.
///
/// This never fails, even if no candidate is observed. That's the case of a single-column file,
/// which contains no delimiters at all, and where any delimiter will do.
pub fn detect_delimiter(peeked: &[u8]) -> Delimiter {
    let mut delims: Vec<(Delimiter, usize)> = Delimiter::possible_values()
        .into_iter()
        .map(|candidate| (candidate, bytecount::count(peeked, candidate.byte_value())))
        .collect();

    // Most matches first. Ties are broken by the byte value of the delimiter so that the
    // selection is deterministic.
    delims.sort_by_key(|(delim, n)| (std::cmp::Reverse(*n), delim.byte_value()));

    let (best, _) = delims[0];
    tracing::debug!(delimiter = best.string_title(), "detected delimiter");
    best
}
