//! Resolve a dog picture from an identifier or at random, and build the
//! permalink that reproduces it.
//!
//! ```no_run
//! use doglink::{AppConfig, DogApiProvider, PresentationController};
//! # use doglink::{AssetLocator, LoadFailure, LoadTicket, Permalink, PresentationSink, Region};
//! # struct Sink;
//! # impl PresentationSink for Sink {
//! #     fn show(&mut self, _: Region) {}
//! #     fn hide(&mut self, _: Region) {}
//! #     fn set_image_source(&mut self, _: &AssetLocator, _: LoadTicket) {}
//! #     fn set_breed_label(&mut self, _: &str) {}
//! #     fn set_permalink(&mut self, _: &Permalink) {}
//! #     fn show_failure(&mut self, _: &LoadFailure) {}
//! # }
//! # async fn demo() -> doglink::Result<()> {
//! let config = AppConfig::load()?;
//! let provider = DogApiProvider::new(&config)?;
//! let mut controller = PresentationController::from_config(Sink, provider, &config);
//! controller.load(false).await?;
//! println!("{:?}", controller.permalink());
//! # Ok(())
//! # }
//! ```

pub mod config;
mod errors;
pub mod locator;
pub mod permalink;
pub mod presentation;
pub mod provider;
pub mod resolver;
pub mod share;

pub use config::AppConfig;
pub use errors::{DoglinkError, Result};
pub use locator::{
    extract_breed_name, extract_identifier, AssetLocator, Identifier,
    IdentifierCodec,
};
pub use permalink::{query_identifier, Permalink, PermalinkBuilder, ID_PARAM};
pub use presentation::{
    LoadFailure, LoadRequest, LoadTicket, PresentationController,
    PresentationSink, PresentationState, Region, SinkSignal,
};
pub use provider::{parse_random_response, AssetProvider, DogApiProvider};
pub use resolver::AssetResolver;
pub use share::{
    PopupFeatures, PopupLauncher, ShareLinkDispatcher, SharePlatform,
};
