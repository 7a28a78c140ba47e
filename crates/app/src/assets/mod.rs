//! Uploaded asset storage

mod errors;
mod keys;
mod store;

pub use errors::AssetStoreError;
pub use keys::{AssetKey, AssetKeyError, ImageFormat};
pub use store::*;
