
use mongodb::bson::doc;
use popreel_seed::{fetch_table, http_client, run, to_documents, Error, SeedArgs, INSERTED_MESSAGE};
use pretty_assertions::assert_eq;
use tabular::CsvConfig;
use testutil::{serve, unreachable_url, SCENARIO_CSV, UNREACHABLE_MONGODB_URI};

#[tokio::test]
async fn served_csv_becomes_documents() {
    let url = serve("200 OK", SCENARIO_CSV).await;
    let table = fetch_table(&http_client().unwrap(), &url, &CsvConfig::default())
        .await
        .expect("fetch failed");

    assert_eq!(
        vec![
            doc! { "id": 1_i64, "title": "Alpha", "year": 2001_i64 },
            doc! { "id": 2_i64, "title": "Beta", "year": 2002_i64 },
        ],
        to_documents(&table)
    );
}

#[tokio::test]
async fn fetch_and_transform_are_deterministic() {
    let url = serve("200 OK", SCENARIO_CSV).await;
    let client = http_client().unwrap();

    let first = fetch_table(&client, &url, &CsvConfig::default()).await.unwrap();
    let second = fetch_table(&client, &url, &CsvConfig::default()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(to_documents(&first), to_documents(&second));
}

#[tokio::test]
async fn error_status_fails_the_fetch() {
    let url = serve("404 Not Found", "missing").await;
    let err = fetch_table(&http_client().unwrap(), &url, &CsvConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Status(_, 404)), "unexpected error: {err}");
}

#[tokio::test]
async fn unreachable_source_fails_the_fetch() {
    let err = fetch_table(&http_client().unwrap(), &unreachable_url(), &CsvConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Fetch(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn malformed_csv_fails_the_fetch() {
    let url = serve("200 OK", "a,b\n1,2\n3,4,5\n").await;
    let err = fetch_table(&http_client().unwrap(), &url, &CsvConfig::default())
        .await
        .unwrap_err();
    assert!(
        matches!(err, Error::Parse(tabular::Error::ExtraColumn(2, 3, 2))),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn unreachable_database_fails_after_preview() {
    let args = SeedArgs {
        source_url: serve("200 OK", SCENARIO_CSV).await,
        mongodb_uri: UNREACHABLE_MONGODB_URI.to_string(),
        ..Default::default()
    };
    let mut out = Vec::new();

    let err = run(&args, &mut out).await.unwrap_err();
    assert!(matches!(err, Error::Unreachable(_)), "unexpected error: {err}");

    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("Alpha") && out.contains("Beta"), "missing preview:\n{out}");
    assert!(!out.contains(INSERTED_MESSAGE), "unexpected output:\n{out}");
}

#[tokio::test]
async fn header_only_csv_is_rejected_as_empty_batch() {
    let args = SeedArgs {
        source_url: serve("200 OK", "id,title,year\n").await,
        mongodb_uri: UNREACHABLE_MONGODB_URI.to_string(),
        ..Default::default()
    };
    let mut out = Vec::new();

    let err = run(&args, &mut out).await.unwrap_err();
    assert!(matches!(err, Error::EmptyBatch), "unexpected error: {err}");
}

/// Runs against a live server, given by `SEED_TEST_MONGODB_URI`:
/// `SEED_TEST_MONGODB_URI=mongodb://localhost:27017/ cargo test -- --ignored`
#[tokio::test]
#[ignore]
async fn documents_are_inserted_into_live_server() {
    let uri = std::env::var("SEED_TEST_MONGODB_URI").expect("SEED_TEST_MONGODB_URI must be set");
    let collection_name = format!("seed_test_{}", std::process::id());

    let args = SeedArgs {
        source_url: serve("200 OK", SCENARIO_CSV).await,
        mongodb_uri: uri.clone(),
        database: "popreel_seed_test".to_string(),
        collection: collection_name.clone(),
        ..Default::default()
    };
    let collection =
        popreel_seed::connect(&uri, &args.database, &args.collection).await.unwrap();

    let mut out = Vec::new();
    let summary = run(&args, &mut out).await.expect("seeding failed");

    assert_eq!(2, summary.rows);
    assert_eq!(2, summary.inserted);
    assert_eq!(2, summary.sampled);
    assert_eq!(2, collection.count_documents(doc! {}).await.unwrap());

    for expect in [
        doc! { "id": 1_i64, "title": "Alpha", "year": 2001_i64 },
        doc! { "id": 2_i64, "title": "Beta", "year": 2002_i64 },
    ] {
        let mut found = collection
            .find_one(expect.clone())
            .await
            .unwrap()
            .expect("inserted document not found");
        found.remove("_id").expect("document has an _id");
        assert_eq!(expect, found);
    }

    let out = String::from_utf8(out).unwrap();
    assert!(out.contains(INSERTED_MESSAGE), "missing message:\n{out}");

    collection.drop().await.unwrap();
}
