use std::io::Write;

use doglink::{
    AppConfig, AssetProvider, DogApiProvider, PopupLauncher,
    PresentationController, SharePlatform, ShareLinkDispatcher,
};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::dispatcher;
use crate::launcher::{PrintLauncher, SystemLauncher};
use crate::sink::{render_pending, settled_output, ImageProbe, TerminalSink};
use crate::AppError;

const QUIT_KEY: char = 'q';
const FACEBOOK_KEY: char = 'f';
const TWITTER_KEY: char = 't';

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "watch", about = "Keep showing dogs, re-roll from the keyboard")]
pub struct Watch {
    #[clap(long, action, help = "Trust images without downloading them")]
    no_verify: bool,
    #[clap(long, action, help = "Open share pages in a browser")]
    open: bool,
}

impl Watch {
    pub async fn run(&self, config: &AppConfig) -> Result<(), AppError> {
        let provider = DogApiProvider::new(config)?;
        let probe = ImageProbe::new(config, !self.no_verify)?;
        let mut controller = PresentationController::from_config(
            TerminalSink::new(false),
            provider,
            config,
        );
        let launcher: Box<dyn PopupLauncher> = if self.open {
            Box::new(SystemLauncher)
        } else {
            Box::new(PrintLauncher)
        };
        let dispatcher = dispatcher(launcher, config);

        let outcome = controller.load(false).await.map(|_| ());
        settle(&mut controller, &probe, outcome).await;
        print_keys(config.reroll_key)?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let Some(key) = line.trim().chars().next() else {
                continue;
            };
            if key == QUIT_KEY {
                break;
            }

            match controller.handle_key(key).await {
                Ok(Some(_)) => settle(&mut controller, &probe, Ok(())).await,
                Ok(None) => share_on(key, &dispatcher, &controller)?,
                Err(e) => settle(&mut controller, &probe, Err(e)).await,
            }
        }
        Ok(())
    }
}

async fn settle<P: AssetProvider>(
    controller: &mut PresentationController<TerminalSink, P>,
    probe: &ImageProbe,
    outcome: doglink::Result<()>,
) {
    if let Err(e) = outcome {
        log::error!("Resolution failed: {}", e);
        eprintln!("{}", e);
        return;
    }

    render_pending(controller, probe).await;
    match settled_output(controller) {
        Ok(shown) => {
            if let Err(e) = shown.print(false) {
                eprintln!("{}", e);
            }
        }
        Err(e) => eprintln!("{}", e),
    }
}

fn share_on<L: PopupLauncher, P: AssetProvider>(
    key: char,
    dispatcher: &ShareLinkDispatcher<L>,
    controller: &PresentationController<TerminalSink, P>,
) -> Result<(), AppError> {
    let platform = match key {
        FACEBOOK_KEY => SharePlatform::Facebook,
        TWITTER_KEY => SharePlatform::Twitter,
        other => {
            eprintln!("Unknown key '{}'", other);
            return Ok(());
        }
    };
    if !dispatcher.share_current(platform, controller)? {
        eprintln!("Nothing to share yet");
    }
    Ok(())
}

fn print_keys(reroll_key: char) -> Result<(), AppError> {
    println!(
        "Press '{}' + Enter for another dog, '{}'/'{}' to share, '{}' to quit",
        reroll_key, FACEBOOK_KEY, TWITTER_KEY, QUIT_KEY
    );
    std::io::stdout().flush()?;
    Ok(())
}
