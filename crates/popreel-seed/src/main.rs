use anyhow::Context;
use clap::Parser;

/// Loads a CSV dataset into a MongoDB collection, then prints a few of the inserted documents.
#[derive(Debug, clap::Parser)]
#[clap(author, about, version)]
struct Args {
    #[clap(flatten)]
    log: cli_common::LogArgs,

    #[clap(flatten)]
    seed: popreel_seed::SeedArgs,
}

fn main() {
    let args = Args::parse();
    cli_common::init_logging(&args.log);

    cli_common::run_cli_main(args.seed, |seed| {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to start runtime")?;

        let mut stdout = std::io::stdout().lock();
        let summary = runtime
            .block_on(popreel_seed::run(&seed, &mut stdout))
            .context("seeding failed")?;

        tracing::info!(?summary, "seeding completed");
        Ok(())
    });
}
