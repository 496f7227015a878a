use std::path::Path;

use clap::Subcommand;
use doglink::{AppConfig, PopupLauncher, ShareLinkDispatcher, ID_PARAM};
use url::Url;

use crate::AppError;

mod config;
mod permalink;
mod resolve;
mod share;
mod watch;

#[derive(Debug, Subcommand)]
pub enum Commands {
    Resolve(resolve::Resolve),
    Permalink(permalink::Permalink),
    Share(share::Share),
    Watch(watch::Watch),
    #[command(about = "Show or change the configuration")]
    Config {
        #[clap(subcommand)]
        subcommand: config::Config,
    },
}

impl Commands {
    pub async fn run(
        &self,
        config: AppConfig,
        config_path: &Path,
    ) -> Result<(), AppError> {
        match self {
            Commands::Resolve(resolve) => resolve.run(&config).await,
            Commands::Permalink(permalink) => permalink.run(&config),
            Commands::Share(share) => share.run(&config),
            Commands::Watch(watch) => watch.run(&config).await,
            Commands::Config { subcommand } => {
                subcommand.run(config, config_path)
            }
        }
    }
}

/// The page address as if it had been opened with `?id=<id>`.
fn pin_identifier(page: &Url, id: &str) -> Url {
    let mut pinned = page.clone();
    pinned
        .query_pairs_mut()
        .clear()
        .append_pair(ID_PARAM, id);
    pinned
}

fn dispatcher<L: PopupLauncher>(
    launcher: L,
    config: &AppConfig,
) -> ShareLinkDispatcher<L> {
    ShareLinkDispatcher::new(launcher)
        .with_twitter_related(config.twitter_related.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use doglink::query_identifier;

    #[test]
    fn pinning_replaces_the_page_query() {
        let page = Url::parse("https://pups.example/app/?id=pug&x=1").unwrap();
        let pinned = pin_identifier(&page, "hound/afghan");

        assert_eq!(
            query_identifier(&pinned).as_deref(),
            Some("hound/afghan")
        );
        assert_eq!(pinned.path(), "/app/");
    }
}
