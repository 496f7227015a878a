use std::path::Path;

use clap::Subcommand;
use doglink::AppConfig;

use crate::AppError;

#[derive(Debug, Subcommand)]
pub enum Config {
    #[command(about = "Print the configuration in use")]
    Show,
    #[command(about = "Change the page address permalinks are built on")]
    SetPage {
        #[clap(help = "Page address, e.g. https://pups.example/")]
        address: String,
    },
}

impl Config {
    pub fn run(
        &self,
        mut config: AppConfig,
        path: &Path,
    ) -> Result<(), AppError> {
        match self {
            Config::Show => {
                println!("# {}", path.display());
                print!("{}", toml::to_string_pretty(&config)?);
            }
            Config::SetPage { address } => {
                config.set_page_address(address)?;
                config.save_to(path)?;
                println!("Page address set to {}", config.page_address);
            }
        }
        Ok(())
    }
}
