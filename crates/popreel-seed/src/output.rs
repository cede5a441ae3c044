use crate::Error;
use mongodb::bson::{Bson, Document};
use std::io::Write;

#[derive(clap::ValueEnum, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SampleFormat {
    /// The driver's display form of each document.
    #[default]
    Text,
    /// Relaxed Extended JSON, one document per line.
    Json,
}

/// Writes each of `documents` to `out` on its own line.
pub fn write_documents(
    out: &mut impl Write,
    documents: &[Document],
    format: SampleFormat,
) -> Result<(), Error> {
    for doc in documents {
        match format {
            SampleFormat::Text => writeln!(out, "{doc}")?,
            SampleFormat::Json => {
                let json = Bson::Document(doc.clone()).into_relaxed_extjson();
                serde_json::to_writer(&mut *out, &json)?;
                out.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use mongodb::bson::{doc, oid::ObjectId};

    fn render(documents: &[Document], format: SampleFormat) -> String {
        let mut out = Vec::new();
        write_documents(&mut out, documents, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn documents_are_written_one_per_line() {
        let id = ObjectId::parse_str("65f0c0ffee0000000000abcd").unwrap();
        let docs = vec![
            doc! { "_id": id, "id": 1_i64, "title": "Alpha", "year": 2001_i64 },
            doc! { "id": 2_i64, "rating": 3.5, "title": "Beta" },
        ];

        let text = render(&docs, SampleFormat::Text);
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(2, lines.len());
        assert!(lines[0].contains("65f0c0ffee0000000000abcd"), "{}", lines[0]);
        assert!(lines[0].contains("\"Alpha\""), "{}", lines[0]);

        let json = render(&docs, SampleFormat::Json);
        insta::assert_snapshot!(json, @r###"
        {"_id":{"$oid":"65f0c0ffee0000000000abcd"},"id":1,"title":"Alpha","year":2001}
        {"id":2,"rating":3.5,"title":"Beta"}
        "###);
    }
}
