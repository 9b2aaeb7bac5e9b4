use anyhow::Result;
use clap::Parser;
use kadrovik_bot::{handle_cache, load_config, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = load_config(token)?;
            run_bot(config).await
        }
        Commands::Cache { cache_file } => handle_cache(cache_file).await,
    }
}
