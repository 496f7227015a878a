use thiserror::Error;

pub type Result<T> = std::result::Result<T, DoglinkError>;

#[derive(Error, Debug)]
pub enum DoglinkError {
    #[error("Malformed asset locator: {0}")]
    MalformedLocator(String),
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),
    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Failed to load asset: {0}")]
    SinkLoadFailure(String),
    #[error("Invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Unknown share platform: {0}")]
    UnknownPlatform(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for DoglinkError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedResponse(e.to_string())
    }
}

impl From<toml::de::Error> for DoglinkError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for DoglinkError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Config(e.to_string())
    }
}
