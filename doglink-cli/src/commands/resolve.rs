use doglink::{AppConfig, DogApiProvider, PresentationController};

use super::pin_identifier;
use crate::sink::{render_pending, settled_output, ImageProbe, TerminalSink};
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "resolve", about = "Resolve one image and print its permalink")]
pub struct Resolve {
    #[clap(long, help = "Identifier to pin instead of the page's id")]
    id: Option<String>,
    #[clap(long, action, help = "Ignore any identifier, fetch a random image")]
    new: bool,
    #[clap(long, action, help = "Trust the image without downloading it")]
    no_verify: bool,
    #[clap(long, action, help = "Print the result as JSON")]
    json: bool,
}

impl Resolve {
    pub async fn run(&self, config: &AppConfig) -> Result<(), AppError> {
        let mut config = config.clone();
        if let Some(id) = &self.id {
            config.page_address = pin_identifier(&config.page_address, id);
        }

        let provider = DogApiProvider::new(&config)?;
        let probe = ImageProbe::new(&config, !self.no_verify)?;
        let mut controller = PresentationController::from_config(
            TerminalSink::new(self.json),
            provider,
            &config,
        );

        if let Err(e) = controller.load(self.new).await {
            log::error!("Resolution failed: {}", e);
            return Err(e.into());
        }
        render_pending(&mut controller, &probe).await;

        settled_output(&controller)?.print(self.json)
    }
}
