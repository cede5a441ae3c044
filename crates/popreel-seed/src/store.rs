use crate::Error;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::ErrorKind;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};

/// Resolves a handle to `collection` within `database` of the server at `uri`.
///
/// This doesn't talk to the server: the driver connects lazily, so an unreachable server is
/// only observed by the first operation which uses the handle.
#[tracing::instrument(skip(uri), err)]
pub async fn connect(
    uri: &str,
    database: &str,
    collection: &str,
) -> Result<Collection<Document>, Error> {
    let mut options = ClientOptions::parse(uri).await.map_err(Error::Connect)?;
    options
        .app_name
        .get_or_insert_with(|| env!("CARGO_PKG_NAME").to_string());

    let client = Client::with_options(options).map_err(Error::Connect)?;
    Ok(client.database(database).collection(collection))
}

/// Inserts all `documents` with a single bulk insert, returning the number of documents the
/// server acknowledged. An empty batch is rejected without contacting the server.
#[tracing::instrument(skip_all, fields(collection = %collection.namespace(), documents = documents.len()), err)]
pub async fn insert_all(
    collection: &Collection<Document>,
    documents: Vec<Document>,
) -> Result<u64, Error> {
    if documents.is_empty() {
        return Err(Error::EmptyBatch);
    }
    let submitted = documents.len();

    let result = collection
        .insert_many(documents)
        .await
        .map_err(|err| classify(err, Error::Insert))?;

    let inserted = result.inserted_ids.len() as u64;
    tracing::info!(submitted, inserted, "bulk insert acknowledged");
    Ok(inserted)
}

/// Reads up to `limit` documents of `collection`, in whatever order the server returns them.
#[tracing::instrument(skip(collection), fields(collection = %collection.namespace()), err)]
pub async fn sample(collection: &Collection<Document>, limit: u32) -> Result<Vec<Document>, Error> {
    // A limit of zero means "no limit" to the server.
    if limit == 0 {
        return Ok(Vec::new());
    }

    let cursor = collection
        .find(doc! {})
        .limit(i64::from(limit))
        .await
        .map_err(|err| classify(err, Error::Query))?;

    cursor.try_collect().await.map_err(Error::Query)
}

/// Failures to select a server are reported as `Error::Unreachable`, and all others via `or`.
fn classify(err: mongodb::error::Error, or: fn(mongodb::error::Error) -> Error) -> Error {
    if matches!(*err.kind, ErrorKind::ServerSelection { .. }) {
        Error::Unreachable(err)
    } else {
        or(err)
    }
}
