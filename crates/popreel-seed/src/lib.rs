//! Seeds the Popreel `videos` collection from a published CSV dataset.
//!
//! The job runs as a fixed sequence of stages: fetch the CSV into a `tabular::Table`, connect to
//! MongoDB, turn each row into a document, insert every document with a single bulk insert, and
//! read back a handful of documents for the operator to eyeball.
mod config;
mod document;
mod fetch;
mod output;
mod pipeline;
mod store;

pub use config::{
    SeedArgs, DEFAULT_COLLECTION, DEFAULT_DATABASE, DEFAULT_MONGODB_URI, DEFAULT_SOURCE_URL,
};
pub use document::{to_bson, to_document, to_documents};
pub use fetch::{fetch_table, http_client};
pub use output::{write_documents, SampleFormat};
pub use pipeline::{run, Summary, INSERTED_MESSAGE};
pub use store::{connect, insert_all, sample};

/// Error type returned by all stages of the seeding job.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to fetch CSV resource: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("fetching '{0}' returned HTTP status {1}")]
    Status(String, u16),

    #[error("failed to parse CSV resource: {0}")]
    Parse(#[from] tabular::Error),

    #[error("invalid MongoDB connection: {0}")]
    Connect(#[source] mongodb::error::Error),

    #[error("MongoDB server is unreachable: {0}")]
    Unreachable(#[source] mongodb::error::Error),

    #[error("bulk insert was rejected: {0}")]
    Insert(#[source] mongodb::error::Error),

    #[error("refusing to insert an empty batch: the CSV resource has no data rows")]
    EmptyBatch,

    #[error("failed to read back inserted documents: {0}")]
    Query(#[source] mongodb::error::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to encode document as JSON: {0}")]
    Json(#[from] serde_json::Error),
}
