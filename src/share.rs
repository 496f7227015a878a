use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::permalink::Permalink;
use crate::presentation::{PresentationController, PresentationSink};
use crate::provider::AssetProvider;
use crate::{DoglinkError, Result};

const FACEBOOK_SHARER: &str = "https://facebook.com/sharer.php";
const TWITTER_INTENT: &str = "https://twitter.com/intent/tweet";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    Facebook,
    Twitter,
}

impl SharePlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            SharePlatform::Facebook => "facebook",
            SharePlatform::Twitter => "twitter",
        }
    }

    /// Name of the window the popup is opened in.
    pub fn window_target(&self) -> &'static str {
        match self {
            SharePlatform::Facebook => "_blank",
            SharePlatform::Twitter => "share-twitter",
        }
    }
}

impl fmt::Display for SharePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SharePlatform {
    type Err = DoglinkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "facebook" | "fb" => Ok(SharePlatform::Facebook),
            "twitter" | "tweet" => Ok(SharePlatform::Twitter),
            _ => Err(DoglinkError::UnknownPlatform(s.to_owned())),
        }
    }
}

/// Window features handed to the popup launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupFeatures {
    pub width: u32,
    pub height: u32,
    pub toolbar: bool,
    pub status: bool,
    pub resizable: bool,
}

impl Default for PopupFeatures {
    fn default() -> Self {
        Self {
            width: 626,
            height: 436,
            toolbar: false,
            status: false,
            resizable: true,
        }
    }
}

impl fmt::Display for PopupFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "toolbar={},status={},resizable={},width={},height={}",
            u8::from(self.toolbar),
            u8::from(self.status),
            u8::from(self.resizable),
            self.width,
            self.height
        )
    }
}

/// Opens a URL in a new window. Whether it actually opened is not reported.
pub trait PopupLauncher {
    fn open(&self, url: &Url, target: &str, features: &PopupFeatures);
}

impl<L: PopupLauncher + ?Sized> PopupLauncher for Box<L> {
    fn open(&self, url: &Url, target: &str, features: &PopupFeatures) {
        (**self).open(url, target, features)
    }
}

pub struct ShareLinkDispatcher<L> {
    launcher: L,
    features: PopupFeatures,
    twitter_related: Option<String>,
}

impl<L: PopupLauncher> ShareLinkDispatcher<L> {
    pub fn new(launcher: L) -> Self {
        Self {
            launcher,
            features: PopupFeatures::default(),
            twitter_related: None,
        }
    }

    pub fn with_twitter_related(mut self, account: Option<String>) -> Self {
        self.twitter_related = account;
        self
    }

    pub fn with_features(mut self, features: PopupFeatures) -> Self {
        self.features = features;
        self
    }

    pub fn features(&self) -> &PopupFeatures {
        &self.features
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// The platform URL embedding `permalink` as an encoded parameter.
    pub fn share_url(
        &self,
        platform: SharePlatform,
        permalink: &Permalink,
    ) -> Result<Url> {
        let url = match platform {
            SharePlatform::Facebook => Url::parse_with_params(
                FACEBOOK_SHARER,
                &[("display", "popup"), ("u", permalink.as_str())],
            )?,
            SharePlatform::Twitter => {
                let mut url = Url::parse(TWITTER_INTENT)?;
                {
                    let mut query = url.query_pairs_mut();
                    if let Some(account) = &self.twitter_related {
                        query.append_pair("related", account);
                    }
                    query.append_pair("text", permalink.as_str());
                }
                url
            }
        };
        Ok(url)
    }

    pub fn share_to(
        &self,
        platform: SharePlatform,
        permalink: &Permalink,
    ) -> Result<()> {
        let url = self.share_url(platform, permalink)?;
        log::info!("Sharing {} to {}", permalink, platform);
        self.launcher
            .open(&url, platform.window_target(), &self.features);
        Ok(())
    }

    /// Shares whatever the controller resolved last. Nothing happens before
    /// the first resolution.
    pub fn share_current<S, P>(
        &self,
        platform: SharePlatform,
        controller: &PresentationController<S, P>,
    ) -> Result<bool>
    where
        S: PresentationSink,
        P: AssetProvider,
    {
        match controller.permalink() {
            Some(permalink) => {
                self.share_to(platform, &permalink)?;
                Ok(true)
            }
            None => {
                log::warn!("Nothing resolved yet, not sharing to {platform}");
                Ok(false)
            }
        }
    }
}
