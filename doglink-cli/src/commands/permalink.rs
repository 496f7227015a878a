use doglink::{AppConfig, AssetLocator, PermalinkBuilder};

use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "permalink", about = "Print the permalink for an image locator")]
pub struct Permalink {
    #[clap(help = "Image locator, e.g. https://images.dog.ceo/breeds/pug/1.jpg")]
    locator: String,
}

impl Permalink {
    pub fn run(&self, config: &AppConfig) -> Result<(), AppError> {
        let locator = AssetLocator::parse(self.locator.as_str())?;
        let permalink = PermalinkBuilder::build(&config.page_address, &locator);
        println!("{}", permalink);
        Ok(())
    }
}
