//! Asset locators and the identifiers embedded in them.
//!
//! A locator looks like `<base>/breeds/<identifier>`, where the identifier
//! may span several path segments (`hound-afghan/n02088094_1003.jpg`). The
//! first segment of the identifier is the breed name.

use std::fmt;
use std::str::FromStr;

use crate::{DoglinkError, Result};

pub const BREEDS_MARKER: &str = "breeds/";
pub const DEFAULT_IMAGE_BASE: &str = "https://images.dog.ceo/";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn new<S: Into<String>>(value: S) -> Result<Self> {
        let value = value.into();
        if value.is_empty() || value.starts_with('/') {
            return Err(DoglinkError::InvalidIdentifier(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The first path segment of the identifier.
    pub fn breed(&self) -> &str {
        first_segment(&self.0)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Identifier {
    type Err = DoglinkError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// A validated asset locator.
///
/// The only ways to obtain one are [`AssetLocator::parse`] and the
/// [`IdentifierCodec`] builders, so the identifier accessors below never
/// fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetLocator {
    raw: String,
    identifier_at: usize,
}

impl AssetLocator {
    pub fn parse<S: Into<String>>(locator: S) -> Result<Self> {
        let raw = locator.into();
        let identifier_at = locate_identifier(&raw)?;
        Ok(Self { raw, identifier_at })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn identifier(&self) -> &str {
        &self.raw[self.identifier_at..]
    }

    pub fn breed_name(&self) -> &str {
        first_segment(self.identifier())
    }

    pub fn into_string(self) -> String {
        self.raw
    }
}

impl fmt::Display for AssetLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for AssetLocator {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl FromStr for AssetLocator {
    type Err = DoglinkError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Returns everything after the `breeds/` segment of `locator`.
pub fn extract_identifier(locator: &str) -> Result<Identifier> {
    let at = locate_identifier(locator)?;
    Ok(Identifier(locator[at..].to_owned()))
}

/// Returns the first path segment after `breeds/`.
pub fn extract_breed_name(locator: &str) -> Result<Identifier> {
    let at = locate_identifier(locator)?;
    Ok(Identifier(first_segment(&locator[at..]).to_owned()))
}

/// Builds locators below a fixed remote base.
#[derive(Debug, Clone)]
pub struct IdentifierCodec {
    base: String,
}

impl IdentifierCodec {
    pub fn new<S: Into<String>>(base: S) -> Self {
        let mut base = base.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        Self { base }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Appends `breeds/<identifier>` to the base. The identifier is taken
    /// verbatim, no escaping happens here.
    pub fn build_locator(&self, identifier: &Identifier) -> AssetLocator {
        self.pin_locator(identifier.as_str())
    }

    /// Like [`build_locator`](Self::build_locator) but for an unchecked
    /// identifier taken from outside, such as a page query. Nothing is
    /// validated, so a bogus value yields a locator that fails to load.
    pub fn pin_locator(&self, raw_identifier: &str) -> AssetLocator {
        let mut raw = String::with_capacity(
            self.base.len() + BREEDS_MARKER.len() + raw_identifier.len(),
        );
        raw.push_str(&self.base);
        raw.push_str(BREEDS_MARKER);
        let identifier_at = raw.len();
        raw.push_str(raw_identifier);

        AssetLocator { raw, identifier_at }
    }
}

impl Default for IdentifierCodec {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE)
    }
}

// The marker only counts when it starts a path segment, so `notbreeds/`
// does not match.
fn locate_identifier(locator: &str) -> Result<usize> {
    let start = locator
        .match_indices(BREEDS_MARKER)
        .map(|(idx, _)| idx)
        .find(|&idx| idx == 0 || locator.as_bytes()[idx - 1] == b'/')
        .ok_or_else(|| DoglinkError::MalformedLocator(locator.to_owned()))?;

    let identifier_at = start + BREEDS_MARKER.len();
    let rest = &locator[identifier_at..];
    if rest.is_empty() || rest.starts_with('/') {
        return Err(DoglinkError::MalformedLocator(locator.to_owned()));
    }

    Ok(identifier_at)
}

fn first_segment(identifier: &str) -> &str {
    match identifier.split_once('/') {
        Some((head, _)) => head,
        None => identifier,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("terrier")]
    #[case("hound/afghan")]
    #[case("hound-afghan/n02088094_1003.jpg")]
    #[case("spaniel-cocker/n02102318_4172.jpg")]
    fn identifier_survives_build_and_extract(#[case] raw: &str) {
        let codec = IdentifierCodec::default();
        let id = Identifier::new(raw).unwrap();
        let locator = codec.build_locator(&id);

        assert_eq!(extract_identifier(locator.as_str()).unwrap(), id);
        assert_eq!(locator.identifier(), raw);
    }

    #[test]
    fn breed_and_identifier_differ_for_sub_breeds() {
        let locator = "https://images.dog.ceo/breeds/hound/afghan";

        assert_eq!(extract_breed_name(locator).unwrap().as_str(), "hound");
        assert_eq!(
            extract_identifier(locator).unwrap().as_str(),
            "hound/afghan"
        );

        let parsed = AssetLocator::parse(locator).unwrap();
        assert_eq!(parsed.breed_name(), "hound");
        assert_eq!(parsed.identifier(), "hound/afghan");
    }

    #[test]
    fn single_segment_breed_is_the_whole_identifier() {
        let locator = "https://images.dog.ceo/breeds/terrier";
        assert_eq!(extract_breed_name(locator).unwrap().as_str(), "terrier");
    }

    #[rstest]
    #[case("https://images.dog.ceo/notbreeds/x")]
    #[case("https://images.dog.ceo/breeds/")]
    #[case("https://images.dog.ceo/breeds//x")]
    #[case("https://images.dog.ceo/cats/x")]
    #[case("")]
    fn malformed_locators_are_rejected(#[case] locator: &str) {
        assert!(matches!(
            extract_identifier(locator),
            Err(DoglinkError::MalformedLocator(_))
        ));
        assert!(matches!(
            extract_breed_name(locator),
            Err(DoglinkError::MalformedLocator(_))
        ));
        assert!(AssetLocator::parse(locator).is_err());
    }

    #[test]
    fn marker_may_open_the_string() {
        let locator = AssetLocator::parse("breeds/pug/1.jpg").unwrap();
        assert_eq!(locator.identifier(), "pug/1.jpg");
        assert_eq!(locator.breed_name(), "pug");
    }

    #[test]
    fn first_breeds_segment_wins() {
        let id =
            extract_identifier("https://x.test/breeds/a/breeds/b").unwrap();
        assert_eq!(id.as_str(), "a/breeds/b");
    }

    #[test]
    fn codec_adds_missing_trailing_slash() {
        let codec = IdentifierCodec::new("https://images.dog.ceo");
        let locator = codec.build_locator(&"pug".parse().unwrap());
        assert_eq!(locator.as_str(), "https://images.dog.ceo/breeds/pug");
    }

    #[rstest]
    #[case("")]
    #[case("/leading")]
    fn invalid_identifiers_are_rejected(#[case] raw: &str) {
        assert!(matches!(
            Identifier::new(raw),
            Err(DoglinkError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn pinned_locator_keeps_a_bogus_identifier_verbatim() {
        let locator = IdentifierCodec::default().pin_locator("/x");
        assert_eq!(locator.as_str(), "https://images.dog.ceo/breeds//x");
        assert_eq!(locator.identifier(), "/x");
        assert_eq!(locator.breed_name(), "");
    }

    #[test]
    fn identifier_breed_is_first_segment() {
        let id = Identifier::new("hound/afghan").unwrap();
        assert_eq!(id.breed(), "hound");
    }
}
