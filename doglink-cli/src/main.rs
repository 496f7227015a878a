use std::path::PathBuf;

use clap::Parser;
use doglink::AppConfig;

mod commands;
mod error;
mod launcher;
mod sink;

pub use error::AppError;

#[derive(Parser, Debug)]
#[clap(name = "doglink", version)]
#[clap(about = "Fetch a dog picture and a permalink that brings it back", long_about = None)]
struct Cli {
    #[clap(
        long,
        global = true,
        value_parser,
        help = "Config file to use instead of the default location"
    )]
    config: Option<PathBuf>,

    #[clap(
        long,
        global = true,
        help = "Page address permalinks are built on, may carry ?id="
    )]
    page: Option<String>,

    #[clap(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => AppConfig::config_file()?,
    };
    let mut config = AppConfig::load_from(&config_path)?;
    if let Some(page) = &cli.page {
        config.set_page_address(page)?;
    }

    cli.command.run(config, &config_path).await?;
    Ok(())
}
