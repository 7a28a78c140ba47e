//! Asset keys and accepted image formats.

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;
use uuid::Uuid;

const KEY_STEM_LEN: usize = 32;

/// Image formats accepted as a product's featured image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Webp,
    Avif,
}

impl ImageFormat {
    /// Resolve a format from a `Content-Type` value, ignoring parameters.
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/gif" => Some(Self::Gif),
            "image/webp" => Some(Self::Webp),
            "image/avif" => Some(Self::Avif),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "png" => Some(Self::Png),
            "jpg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            "avif" => Some(Self::Avif),
            _ => None,
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Webp => "webp",
            Self::Avif => "avif",
        }
    }

    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
            Self::Avif => "image/avif",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetKeyError {
    #[error("asset key is malformed")]
    Malformed,

    #[error("asset key has an unsupported extension")]
    UnsupportedExtension,
}

/// Storage key of an uploaded asset: `<32 hex chars>.<extension>`.
///
/// Keys are generated by the store and re-validated whenever they come back in
/// from the outside, so a key is always a single safe path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetKey {
    key: String,
    format: ImageFormat,
}

impl AssetKey {
    #[must_use]
    pub fn generate(format: ImageFormat) -> Self {
        Self {
            key: format!("{}.{}", Uuid::now_v7().simple(), format.extension()),
            format,
        }
    }

    /// Validate an externally supplied key.
    ///
    /// # Errors
    ///
    /// Returns an error when the key is not a generated asset key.
    pub fn parse(value: &str) -> Result<Self, AssetKeyError> {
        let (stem, extension) = value.split_once('.').ok_or(AssetKeyError::Malformed)?;

        let stem_is_valid = stem.len() == KEY_STEM_LEN
            && stem
                .bytes()
                .all(|byte| byte.is_ascii_digit() || (b'a'..=b'f').contains(&byte));

        if !stem_is_valid {
            return Err(AssetKeyError::Malformed);
        }

        let format =
            ImageFormat::from_extension(extension).ok_or(AssetKeyError::UnsupportedExtension)?;

        Ok(Self {
            key: value.to_owned(),
            format,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn format(&self) -> ImageFormat {
        self.format
    }
}

impl Display for AssetKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.key)
    }
}
