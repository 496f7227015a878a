use doglink::{
    query_identifier, AppConfig, AssetLocator, Identifier, IdentifierCodec,
    PermalinkBuilder, SharePlatform,
};

use super::dispatcher;
use crate::launcher::{PrintLauncher, SystemLauncher};
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "share", about = "Build a share link for facebook or twitter")]
pub struct Share {
    #[clap(help = "Where to share: facebook or twitter")]
    platform: SharePlatform,
    #[clap(long, conflicts_with = "locator", help = "Identifier to share")]
    id: Option<String>,
    #[clap(long, help = "Image locator to share")]
    locator: Option<String>,
    #[clap(long, action, help = "Open the share page in a browser")]
    open: bool,
}

impl Share {
    pub fn run(&self, config: &AppConfig) -> Result<(), AppError> {
        let codec = IdentifierCodec::new(config.image_base.as_str());
        let locator = match (&self.locator, &self.id) {
            (Some(raw), _) => AssetLocator::parse(raw.as_str())?,
            (None, Some(id)) => {
                codec.build_locator(&Identifier::new(id.as_str())?)
            }
            (None, None) => {
                let id = query_identifier(&config.page_address)
                    .ok_or(AppError::NothingToShare)?;
                codec.pin_locator(&id)
            }
        };
        let permalink = PermalinkBuilder::build(&config.page_address, &locator);

        if self.open {
            dispatcher(SystemLauncher, config)
                .share_to(self.platform, &permalink)?;
        } else {
            dispatcher(PrintLauncher, config)
                .share_to(self.platform, &permalink)?;
        }
        Ok(())
    }
}
