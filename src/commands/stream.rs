//! Stream command: replay a dataset into the lake as a simulated feed.

use std::time::Duration;

use anyhow::Result;

use crate::{
    StreamArgs,
    dataset::Dataset,
    error::FeedError,
    simulator::{SimulationConfig, Simulator},
    stores::AzureLakeStore,
};

const ACCOUNT_KEY_VAR: &str = "AZURE_STORAGE_ACCOUNT_KEY";

pub async fn run(args: StreamArgs) -> Result<()> {
    let StreamArgs {
        source,
        batch_size,
        row_limit,
        delay,
        account,
        container,
        directory,
        prefix,
    } = args;

    println!("--- starting stream simulation from {source} ---");
    let dataset = Dataset::load(&source)?;
    println!("loaded {} rows", dataset.num_rows());

    let access_key = std::env::var(ACCOUNT_KEY_VAR)
        .map_err(|_| FeedError::MissingCredentials(ACCOUNT_KEY_VAR.to_string()))?;
    let store = AzureLakeStore::connect(&account, &access_key, &container, &directory).await?;
    println!("connected to {account}/{container}/{directory}");

    let config = SimulationConfig {
        batch_size,
        row_limit,
        delay: Duration::from_secs(delay),
        prefix,
    };
    let report = Simulator::new(&store, config).run(&dataset).await?;

    println!(
        "--- simulation complete: {}/{} batches uploaded ---",
        report.uploaded, report.attempted
    );
    Ok(())
}
