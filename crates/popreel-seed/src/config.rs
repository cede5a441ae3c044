use crate::output::SampleFormat;

pub const DEFAULT_SOURCE_URL: &str =
    "https://s3-us-west-2.amazonaws.com/recommender-tutorial/movies.csv";
pub const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017/";
pub const DEFAULT_DATABASE: &str = "Popreel";
pub const DEFAULT_COLLECTION: &str = "videos";

/// Arguments of a seeding run. Every argument has a default, and running without any of them
/// loads the movies dataset into `Popreel.videos` on a local server.
#[derive(Debug, Clone, clap::Args)]
pub struct SeedArgs {
    /// URL of the CSV resource to load.
    #[clap(long, default_value = DEFAULT_SOURCE_URL, env = "SEED_SOURCE_URL")]
    pub source_url: String,

    /// MongoDB connection string.
    #[clap(long, default_value = DEFAULT_MONGODB_URI, env = "SEED_MONGODB_URI")]
    pub mongodb_uri: String,

    /// Name of the database to insert into.
    #[clap(long, default_value = DEFAULT_DATABASE, env = "SEED_DATABASE")]
    pub database: String,

    /// Name of the collection to insert into.
    #[clap(long, default_value = DEFAULT_COLLECTION, env = "SEED_COLLECTION")]
    pub collection: String,

    /// Number of parsed rows to print before inserting.
    #[clap(long, default_value_t = 5)]
    pub preview_rows: usize,

    /// Number of documents to read back and print after inserting.
    #[clap(long, default_value_t = 5)]
    pub sample_size: u32,

    /// How to print the documents that are read back.
    #[clap(long, value_enum, default_value_t = SampleFormat::Text)]
    pub output: SampleFormat,

    #[clap(flatten)]
    pub csv: tabular::CsvConfig,
}

impl Default for SeedArgs {
    fn default() -> Self {
        SeedArgs {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            mongodb_uri: DEFAULT_MONGODB_URI.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            preview_rows: 5,
            sample_size: 5,
            output: SampleFormat::Text,
            csv: tabular::CsvConfig::default(),
        }
    }
}
