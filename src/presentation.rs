//! Loading/ready/error orchestration.
//!
//! Every entry into [`PresentationState::Loading`] hands out a fresh
//! [`LoadTicket`]. Resolver results and sink signals carrying an older ticket
//! are dropped, so a quick re-roll can never pair a stale image with a newer
//! breed label.
//!
//! Resolving a locator is not the same as showing it: the controller stays
//! in `Loading` after a successful resolution and only moves on once the
//! sink reports [`SinkSignal::Loaded`] or [`SinkSignal::Failed`].

use std::fmt;

use url::Url;

use crate::config::AppConfig;
use crate::locator::{AssetLocator, IdentifierCodec};
use crate::permalink::{query_identifier, Permalink, PermalinkBuilder};
use crate::provider::AssetProvider;
use crate::resolver::AssetResolver;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationState {
    Loading,
    Ready,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    MainContent,
    Loading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the sink reports after trying to render an image source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkSignal {
    Loaded,
    Failed,
}

/// Diagnostic shown when the sink could not render an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    requested: Option<String>,
}

impl LoadFailure {
    pub const TITLE: &'static str = "Error";
    pub const HEADLINE: &'static str = "Failed loading the requested image!";

    /// The `id` the page was opened with, which may be absent or bogus.
    pub fn requested(&self) -> Option<&str> {
        self.requested.as_deref()
    }
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({})",
            Self::TITLE,
            Self::HEADLINE,
            self.requested().unwrap_or("null")
        )
    }
}

/// The rendering surface driven by [`PresentationController`].
///
/// After [`set_image_source`](PresentationSink::set_image_source) the sink is
/// expected to report back through
/// [`PresentationController::handle_signal`] with the same ticket.
pub trait PresentationSink {
    fn show(&mut self, region: Region);

    fn hide(&mut self, region: Region);

    fn set_image_source(&mut self, locator: &AssetLocator, ticket: LoadTicket);

    fn set_breed_label(&mut self, breed: &str);

    fn set_permalink(&mut self, permalink: &Permalink);

    /// Replaces the loading region's content with the diagnostic.
    fn show_failure(&mut self, failure: &LoadFailure);
}

/// A resolution that has been started but not completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub ticket: LoadTicket,
    pub identifier: Option<String>,
    pub force_new: bool,
}

pub struct PresentationController<S, P> {
    sink: S,
    resolver: AssetResolver<P>,
    page_address: Url,
    requested: Option<String>,
    reroll_key: char,
    state: PresentationState,
    generation: u64,
    rendering: Option<LoadTicket>,
    current: Option<AssetLocator>,
}

impl<S: PresentationSink, P: AssetProvider> PresentationController<S, P> {
    pub fn new(
        sink: S,
        resolver: AssetResolver<P>,
        page_address: Url,
        reroll_key: char,
    ) -> Self {
        let requested = query_identifier(&page_address);
        Self {
            sink,
            resolver,
            page_address,
            requested,
            reroll_key,
            state: PresentationState::Loading,
            generation: 0,
            rendering: None,
            current: None,
        }
    }

    /// Wires a controller from configuration. The page address comes from
    /// `config.page_address`, including any `id` parameter it carries.
    pub fn from_config(sink: S, provider: P, config: &AppConfig) -> Self {
        let codec = IdentifierCodec::new(config.image_base.as_str());
        Self::new(
            sink,
            AssetResolver::new(codec, provider),
            config.page_address.clone(),
            config.reroll_key,
        )
    }

    pub fn state(&self) -> PresentationState {
        self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn resolver(&self) -> &AssetResolver<P> {
        &self.resolver
    }

    pub fn page_address(&self) -> &Url {
        &self.page_address
    }

    /// The `id` the page was opened with.
    pub fn requested_identifier(&self) -> Option<&str> {
        self.requested.as_deref()
    }

    pub fn current_locator(&self) -> Option<&AssetLocator> {
        self.current.as_ref()
    }

    pub fn permalink(&self) -> Option<Permalink> {
        self.current
            .as_ref()
            .map(|locator| PermalinkBuilder::build(&self.page_address, locator))
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Enters `Loading` and issues a new ticket. The query identifier is
    /// suppressed when `force_new` is set.
    pub fn begin(&mut self, force_new: bool) -> LoadRequest {
        self.generation += 1;
        let ticket = LoadTicket(self.generation);
        log::debug!("Loading {} (forced: {})", ticket, force_new);

        self.state = PresentationState::Loading;
        self.sink.hide(Region::MainContent);
        self.sink.show(Region::Loading);

        LoadRequest {
            ticket,
            identifier: if force_new {
                None
            } else {
                self.requested.clone()
            },
            force_new,
        }
    }

    /// Applies a resolver outcome. Returns `Ok(false)` when the ticket is
    /// stale and the outcome was dropped. Resolver errors for the current
    /// ticket are returned as they are and leave the state in `Loading`.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<AssetLocator>,
    ) -> Result<bool> {
        if !self.is_current(ticket) {
            log::debug!(
                "Dropping resolution {} (current is #{})",
                ticket,
                self.generation
            );
            return Ok(false);
        }

        let locator = outcome?;
        let permalink = PermalinkBuilder::build(&self.page_address, &locator);

        self.sink.set_image_source(&locator, ticket);
        self.sink.set_breed_label(locator.breed_name());
        self.sink.set_permalink(&permalink);
        self.current = Some(locator);
        self.rendering = Some(ticket);

        Ok(true)
    }

    /// Runs one full resolution with the owned resolver.
    pub async fn load(&mut self, force_new: bool) -> Result<LoadTicket> {
        let request = self.begin(force_new);
        let outcome = self
            .resolver
            .resolve(request.identifier.as_deref(), request.force_new)
            .await;
        self.complete(request.ticket, outcome)?;
        Ok(request.ticket)
    }

    /// Re-rolls on the configured key. Any other key is ignored.
    pub async fn handle_key(&mut self, key: char) -> Result<Option<LoadTicket>> {
        if key != self.reroll_key {
            return Ok(None);
        }
        self.load(true).await.map(Some)
    }

    /// Applies a sink signal. Returns whether the state changed.
    pub fn handle_signal(
        &mut self,
        ticket: LoadTicket,
        signal: SinkSignal,
    ) -> bool {
        if !self.is_current(ticket) || self.rendering != Some(ticket) {
            log::debug!("Ignoring {:?} for stale load {}", signal, ticket);
            return false;
        }
        if self.state != PresentationState::Loading {
            log::trace!("Ignoring {:?} in {:?}", signal, self.state);
            return false;
        }

        match signal {
            SinkSignal::Loaded => {
                self.sink.show(Region::MainContent);
                self.sink.hide(Region::Loading);
                self.state = PresentationState::Ready;
            }
            SinkSignal::Failed => {
                let failure = LoadFailure {
                    requested: self.requested.clone(),
                };
                log::warn!("{}", failure);
                self.sink.show_failure(&failure);
                self.state = PresentationState::Error;
            }
        }
        log::debug!("Load {} is now {:?}", ticket, self.state);
        true
    }
}
