use std::time::Duration;

use doglink::{
    AppConfig, AssetLocator, AssetProvider, LoadFailure, LoadTicket,
    Permalink, PresentationController, PresentationSink, PresentationState,
    Region, SinkSignal,
};
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use crate::AppError;

/// Collects what a page would display and prints progress to stderr.
#[derive(Debug, Default)]
pub struct TerminalSink {
    pending: Option<(AssetLocator, LoadTicket)>,
    image: Option<String>,
    breed: Option<String>,
    permalink: Option<String>,
    failure: Option<LoadFailure>,
    quiet: bool,
}

impl TerminalSink {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            ..Self::default()
        }
    }

    /// The image source waiting for a load or failure signal.
    pub fn take_pending(&mut self) -> Option<(AssetLocator, LoadTicket)> {
        self.pending.take()
    }

    pub fn failure(&self) -> Option<&LoadFailure> {
        self.failure.as_ref()
    }

    pub fn snapshot(&self) -> Option<Displayed> {
        Some(Displayed {
            image: self.image.clone()?,
            breed: self.breed.clone()?,
            permalink: self.permalink.clone()?,
        })
    }
}

impl PresentationSink for TerminalSink {
    fn show(&mut self, region: Region) {
        if region == Region::Loading && !self.quiet {
            eprintln!("Loading...");
        }
    }

    fn hide(&mut self, region: Region) {
        log::trace!("Hiding {:?}", region);
    }

    fn set_image_source(&mut self, locator: &AssetLocator, ticket: LoadTicket) {
        self.failure = None;
        self.image = Some(locator.to_string());
        self.pending = Some((locator.clone(), ticket));
    }

    fn set_breed_label(&mut self, breed: &str) {
        self.breed = Some(breed.to_owned());
    }

    fn set_permalink(&mut self, permalink: &Permalink) {
        self.permalink = Some(permalink.to_string());
    }

    fn show_failure(&mut self, failure: &LoadFailure) {
        self.failure = Some(failure.clone());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Displayed {
    pub image: String,
    pub breed: String,
    pub permalink: String,
}

impl Displayed {
    pub fn print(&self, json: bool) -> Result<(), AppError> {
        if json {
            println!("{}", serde_json::to_string_pretty(self)?);
        } else {
            println!("image:     {}", self.image);
            println!("breed:     {}", self.breed);
            println!("permalink: {}", self.permalink);
        }
        Ok(())
    }
}

/// Decides whether an image source actually renders. Without a client every
/// source is trusted.
pub struct ImageProbe {
    client: Option<reqwest::Client>,
}

impl ImageProbe {
    pub fn new(config: &AppConfig, verify: bool) -> Result<Self, AppError> {
        if !verify {
            return Ok(Self::trusting());
        }

        let mut builder = reqwest::Client::builder();
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.as_str());
        }
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(doglink::DoglinkError::from)?;
        Ok(Self {
            client: Some(client),
        })
    }

    pub fn trusting() -> Self {
        Self { client: None }
    }

    pub async fn check(&self, locator: &AssetLocator) -> SinkSignal {
        let Some(client) = &self.client else {
            return SinkSignal::Loaded;
        };

        let response = match client.get(locator.as_str()).send().await {
            Ok(response) => response,
            Err(e) => {
                log::debug!("Fetching {} failed: {}", locator, e);
                return SinkSignal::Failed;
            }
        };

        let is_image = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("image/"))
            .unwrap_or(false);

        if response.status().is_success() && is_image {
            SinkSignal::Loaded
        } else {
            log::debug!(
                "{} answered {} (image: {})",
                locator,
                response.status(),
                is_image
            );
            SinkSignal::Failed
        }
    }
}

/// Feeds the pending image source through the probe and reports the outcome
/// back to the controller.
pub async fn render_pending<P: AssetProvider>(
    controller: &mut PresentationController<TerminalSink, P>,
    probe: &ImageProbe,
) -> PresentationState {
    if let Some((locator, ticket)) = controller.sink_mut().take_pending() {
        let signal = probe.check(&locator).await;
        controller.handle_signal(ticket, signal);
    }
    controller.state()
}

/// Turns the settled controller into printable output.
pub fn settled_output<P: AssetProvider>(
    controller: &PresentationController<TerminalSink, P>,
) -> Result<Displayed, AppError> {
    match controller.state() {
        PresentationState::Ready => {
            controller.sink().snapshot().ok_or(AppError::Unresolved)
        }
        PresentationState::Error => {
            let message = controller
                .sink()
                .failure()
                .map(|failure| failure.to_string())
                .unwrap_or_else(|| LoadFailure::HEADLINE.to_owned());
            Err(AppError::LoadFailed(message))
        }
        PresentationState::Loading => Err(AppError::Unresolved),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doglink::{DoglinkError, IdentifierCodec, Result};
    use url::Url;

    struct NoNetwork;

    #[async_trait::async_trait]
    impl AssetProvider for NoNetwork {
        async fn random_locator(&self) -> Result<AssetLocator> {
            Err(DoglinkError::MalformedResponse("offline".to_owned()))
        }
    }

    fn controller(page: &str) -> PresentationController<TerminalSink, NoNetwork> {
        PresentationController::new(
            TerminalSink::new(true),
            doglink::AssetResolver::new(IdentifierCodec::default(), NoNetwork),
            Url::parse(page).unwrap(),
            'r',
        )
    }

    #[tokio::test]
    async fn trusted_source_settles_ready() {
        let mut controller = controller("https://pups.example/?id=terrier");
        controller.load(false).await.unwrap();

        let state = render_pending(&mut controller, &ImageProbe::trusting()).await;
        assert_eq!(state, PresentationState::Ready);

        let shown = settled_output(&controller).unwrap();
        assert_eq!(shown.image, "https://images.dog.ceo/breeds/terrier");
        assert_eq!(shown.breed, "terrier");
        assert_eq!(shown.permalink, "https://pups.example/?id=terrier");
    }

    #[tokio::test]
    async fn nothing_pending_keeps_loading() {
        let mut controller = controller("https://pups.example/");
        assert!(controller.load(false).await.is_err());

        let state = render_pending(&mut controller, &ImageProbe::trusting()).await;
        assert_eq!(state, PresentationState::Loading);
        assert!(matches!(
            settled_output(&controller),
            Err(AppError::Unresolved)
        ));
    }

    #[test]
    fn failure_becomes_load_failed() {
        let mut controller = controller("https://pups.example/?id=nope");
        let request = controller.begin(false);
        let locator = controller
            .resolver()
            .codec()
            .build_locator(&"nope".parse().unwrap());
        controller.complete(request.ticket, Ok(locator)).unwrap();
        controller.handle_signal(request.ticket, SinkSignal::Failed);

        match settled_output(&controller) {
            Err(AppError::LoadFailed(message)) => {
                assert!(message.ends_with("(nope)"))
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
