use anyhow::Result;
use clap::Parser;
use lakefeed::{Cli, Commands, commands};

#[tokio::main]
async fn main() -> Result<()> {
    // credentials may live in an untracked .env next to the data
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Inspect(args) => commands::inspect::run(args)?,
        Commands::Stream(args) => commands::stream::run(args).await?,
        Commands::Completions { shell } => Commands::generate_completions(shell),
    }
    Ok(())
}
