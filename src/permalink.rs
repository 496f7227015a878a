use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

use crate::locator::{AssetLocator, Identifier};

/// Name of the query parameter that pins a page to one asset.
pub const ID_PARAM: &str = "id";

// Bytes that would change meaning under form decoding. `/` stays readable.
const ID_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'\'');

/// A shareable page address carrying an identifier in its `id` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permalink(Url);

impl Permalink {
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Reads the identifier back out of the `id` parameter.
    pub fn identifier(&self) -> Option<Identifier> {
        query_identifier(&self.0).and_then(|id| Identifier::new(id).ok())
    }
}

impl fmt::Display for Permalink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl From<Permalink> for Url {
    fn from(permalink: Permalink) -> Self {
        permalink.0
    }
}

pub struct PermalinkBuilder;

impl PermalinkBuilder {
    /// Keeps the origin and path of `current_address` and replaces the
    /// query with `id=<identifier>`. Only bytes that form decoding would
    /// alter get escaped, so [`query_identifier`] returns the identifier
    /// unchanged.
    pub fn build(current_address: &Url, locator: &AssetLocator) -> Permalink {
        let mut url = current_address.clone();
        url.set_fragment(None);
        url.set_query(Some(&format!(
            "{}={}",
            ID_PARAM,
            utf8_percent_encode(locator.identifier(), ID_VALUE)
        )));
        Permalink(url)
    }
}

/// The first `id` query value of `address`, if present and non-empty.
pub fn query_identifier(address: &Url) -> Option<String> {
    address
        .query_pairs()
        .find(|(key, _)| key == ID_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
