use doglink::DoglinkError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to load the image: {0}")]
    LoadFailed(String),

    #[error("Resolution finished without an image")]
    Unresolved,

    #[error(
        "Nothing to share: pass --id or --locator, or use a page with an id"
    )]
    NothingToShare,

    #[error(transparent)]
    IoError(#[from] io::Error),

    #[error(transparent)]
    DoglinkError(#[from] DoglinkError),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    TomlError(#[from] toml::ser::Error),
}
