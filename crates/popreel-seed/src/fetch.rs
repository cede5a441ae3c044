use crate::Error;
use tabular::{CsvConfig, Table};

/// Returns the HTTP client used for fetching source data.
pub fn http_client() -> Result<reqwest::Client, Error> {
    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Downloads the CSV resource at `url` in full and parses it into a `Table`.
/// Any status other than a success is an error, as is content that doesn't parse.
#[tracing::instrument(skip(client, config), err)]
pub async fn fetch_table(
    client: &reqwest::Client,
    url: &str,
    config: &CsvConfig,
) -> Result<Table, Error> {
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status(url.to_string(), status.as_u16()));
    }

    let body = response.bytes().await?;
    tracing::debug!(len = body.len(), "downloaded CSV resource");

    let table = Table::parse(&body, config)?;
    tracing::info!(
        rows = table.len(),
        columns = table.columns().len(),
        "loaded CSV resource"
    );
    Ok(table)
}
