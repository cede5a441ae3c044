//! Decoding of raw content into UTF-8 text.
//!
//! UTF-32 is not supported, because `encoding_rs` doesn't support it. UTF-16 is only recognized
//! when the content begins with a BOM.

use crate::table::Error;
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use std::borrow::Cow;
use unicode_bom::Bom;

/// Decodes `content` into UTF-8 text, removing any byte order mark.
///
/// Content that is valid UTF-8 is borrowed as-is. Otherwise the encoding is taken from the BOM,
/// if there is one, or else guessed from the content. Decoding is strict: a byte sequence that's
/// malformed in the chosen encoding is an error rather than a replacement character.
#[tracing::instrument(level = "debug", skip_all, fields(len = content.len()))]
pub fn decode(content: &[u8]) -> Result<Cow<'_, str>, Error> {
    let (from_bom, bom_len) = match Bom::from(content) {
        Bom::Utf8 => (Some(encoding_rs::UTF_8), 3),
        Bom::Utf16Be => (Some(encoding_rs::UTF_16BE), 2),
        Bom::Utf16Le => (Some(encoding_rs::UTF_16LE), 2),
        _ => (None, 0),
    };
    let body = &content[bom_len..];

    if from_bom.map_or(true, |enc| enc == encoding_rs::UTF_8) {
        if let Ok(text) = std::str::from_utf8(body) {
            return Ok(Cow::Borrowed(text));
        }
    }

    let encoding = from_bom.unwrap_or_else(|| guess_encoding(body));
    tracing::debug!(
        encoding = encoding.name(),
        fromBOM = from_bom.is_some(),
        "transcoding content into UTF-8"
    );

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| Cow::Owned(text.into_owned()))
        .ok_or_else(|| Error::Encoding(encoding.name()))
}

fn guess_encoding(content: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(content, true);
    detector.guess(None, true)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn utf8_is_borrowed_and_bom_is_removed() {
        let decoded = decode(b"\xEF\xBB\xBFid,title\n1,Alpha\n").unwrap();
        assert!(matches!(decoded, Cow::Borrowed(_)));
        assert_eq!("id,title\n1,Alpha\n", decoded);
    }

    #[test]
    fn utf16_with_bom_is_transcoded() {
        let mut content = vec![0xFF, 0xFE];
        for unit in "a,b\n1,2\n".encode_utf16() {
            content.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!("a,b\n1,2\n", decode(&content).unwrap());
    }

    #[test]
    fn legacy_single_byte_encoding_is_detected() {
        // "titre,ville\nCafé crème,Genève\nRésumé,Zürich\n" in windows-1252.
        let content = b"titre,ville\nCaf\xe9 cr\xe8me,Gen\xe8ve\nR\xe9sum\xe9,Z\xfcrich\n";
        let decoded = decode(content).unwrap();
        assert!(decoded.contains("Café crème"), "decoded: {decoded}");
        assert!(decoded.contains("Zürich"), "decoded: {decoded}");
    }
}
