use crate::{document, fetch, output, store, Error, SeedArgs};
use std::io::Write;

/// Printed once the bulk insert is acknowledged.
pub const INSERTED_MESSAGE: &str = "Data inserted successfully!";

/// Counts observed by a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Data rows parsed from the CSV resource.
    pub rows: usize,
    /// Documents acknowledged by the bulk insert.
    pub inserted: u64,
    /// Documents read back and printed.
    pub sampled: usize,
}

/// Runs the seeding job, writing operator output to `out`.
///
/// Stages run strictly in order and the first failure ends the run. Output written before a
/// failure (such as the preview of parsed rows) is kept.
#[tracing::instrument(
    skip_all,
    fields(
        source = %args.source_url,
        database = %args.database,
        collection = %args.collection,
    ),
    err
)]
pub async fn run(args: &SeedArgs, out: &mut impl Write) -> Result<Summary, Error> {
    // Fetch.
    let http = fetch::http_client()?;
    let table = fetch::fetch_table(&http, &args.source_url, &args.csv).await?;
    writeln!(out, "{}", tabular::preview(&table, args.preview_rows))?;
    out.flush()?;

    // Connect.
    let collection = store::connect(&args.mongodb_uri, &args.database, &args.collection).await?;

    // Transform.
    let documents = document::to_documents(&table);

    // Load & verify.
    let inserted = store::insert_all(&collection, documents).await?;
    writeln!(out, "{INSERTED_MESSAGE}")?;

    let sampled = store::sample(&collection, args.sample_size).await?;
    output::write_documents(out, &sampled, args.output)?;

    Ok(Summary {
        rows: table.len(),
        inserted,
        sampled: sampled.len(),
    })
}
