//! Asset store errors.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetStoreError {
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("upload is missing a content type")]
    MissingContentType,

    #[error("asset storage io error")]
    Io(#[from] io::Error),
}
