use crate::locator::{AssetLocator, IdentifierCodec};
use crate::provider::AssetProvider;
use crate::Result;

/// Decides between pinning a known identifier and asking the provider for
/// a random asset.
pub struct AssetResolver<P> {
    codec: IdentifierCodec,
    provider: P,
}

impl<P: AssetProvider> AssetResolver<P> {
    pub fn new(codec: IdentifierCodec, provider: P) -> Self {
        Self { codec, provider }
    }

    pub fn codec(&self) -> &IdentifierCodec {
        &self.codec
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// `force_new` ignores `external` entirely. Otherwise a non-empty
    /// `external` identifier is turned into a locator without touching the
    /// network.
    pub async fn resolve(
        &self,
        external: Option<&str>,
        force_new: bool,
    ) -> Result<AssetLocator> {
        let pinned = if force_new {
            None
        } else {
            external.filter(|id| !id.is_empty())
        };

        match pinned {
            Some(raw) => {
                let locator = self.codec.pin_locator(raw);
                log::debug!("Pinned {} to {}", raw, locator);
                Ok(locator)
            }
            None => {
                log::debug!(
                    "Fetching a random asset (forced: {}, requested: {:?})",
                    force_new,
                    external
                );
                self.provider.random_locator().await
            }
        }
    }
}
