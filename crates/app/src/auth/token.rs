//! Access token formatting, parsing, and verifier construction.

use std::{fmt, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

/// Access token identifier prefix.
pub const ACCESS_TOKEN_PREFIX: &str = "sf";

/// Number of secret bytes encoded in a token.
pub const ACCESS_TOKEN_SECRET_BYTES: usize = 32;

const ACCESS_TOKEN_SECRET_HEX_CHARS: usize = ACCESS_TOKEN_SECRET_BYTES * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessTokenVersion {
    V1,
}

impl AccessTokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    #[must_use]
    pub const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for AccessTokenVersion {
    type Error = AccessTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(AccessTokenError::UnsupportedVersion),
        }
    }
}

impl FromStr for AccessTokenVersion {
    type Err = AccessTokenError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "v1" => Ok(Self::V1),
            _ => Err(AccessTokenError::UnsupportedVersion),
        }
    }
}

#[derive(Clone)]
pub struct AccessTokenSecret {
    bytes: [u8; ACCESS_TOKEN_SECRET_BYTES],
}

impl AccessTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; ACCESS_TOKEN_SECRET_BYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ACCESS_TOKEN_SECRET_BYTES] {
        &self.bytes
    }
}

impl fmt::Debug for AccessTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessTokenSecret(**redacted**)")
    }
}

impl Drop for AccessTokenSecret {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedAccessToken {
    pub token_uuid: Uuid,
    pub version: AccessTokenVersion,
    pub secret: AccessTokenSecret,
}

#[derive(Debug, Error)]
pub enum AccessTokenError {
    #[error("access token format is invalid")]
    InvalidFormat,

    #[error("access token uses an unsupported version")]
    UnsupportedVersion,

    #[error("access token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[must_use]
pub fn generate_access_token_secret() -> AccessTokenSecret {
    let mut secret = [0_u8; ACCESS_TOKEN_SECRET_BYTES];

    OsRng.fill_bytes(&mut secret);

    AccessTokenSecret::from_bytes(secret)
}

/// Render a token as `sf_<version>_<uuid>.<secret hex>`.
#[must_use]
pub fn format_access_token(
    token_uuid: Uuid,
    version: AccessTokenVersion,
    secret: &AccessTokenSecret,
) -> String {
    format!(
        "{ACCESS_TOKEN_PREFIX}_{}_{}.{}",
        version.segment(),
        token_uuid.simple(),
        encode_hex(secret.as_bytes())
    )
}

/// Split a raw token into its parts.
///
/// # Errors
///
/// Returns an error when the prefix, version, UUID or secret segment is malformed.
pub fn parse_access_token(token: &str) -> Result<ParsedAccessToken, AccessTokenError> {
    let (prefix_and_id, secret_hex) = token
        .trim()
        .split_once('.')
        .ok_or(AccessTokenError::InvalidFormat)?;

    let mut id_parts = prefix_and_id.splitn(3, '_');

    let prefix = id_parts.next().ok_or(AccessTokenError::InvalidFormat)?;
    let version_segment = id_parts.next().ok_or(AccessTokenError::InvalidFormat)?;
    let token_uuid_segment = id_parts.next().ok_or(AccessTokenError::InvalidFormat)?;

    if prefix != ACCESS_TOKEN_PREFIX {
        return Err(AccessTokenError::InvalidFormat);
    }

    let version = AccessTokenVersion::from_str(version_segment)?;

    let token_uuid = Uuid::try_parse(token_uuid_segment)
        .map_err(|_invalid| AccessTokenError::InvalidFormat)?;

    let secret = decode_secret_hex(secret_hex).ok_or(AccessTokenError::InvalidSecretEncoding)?;

    Ok(ParsedAccessToken {
        token_uuid,
        version,
        secret: AccessTokenSecret::from_bytes(secret),
    })
}

/// Hex encoded SHA-256 verifier stored in place of the token secret.
///
/// Input: `{token_uuid_hex}:{version_i16_decimal}:{secret_hex}`
#[must_use]
pub fn token_verifier(
    token_uuid: &Uuid,
    version: AccessTokenVersion,
    secret: &AccessTokenSecret,
) -> String {
    let mut input = format!(
        "{}:{}:{}",
        token_uuid.simple(),
        version.as_i16(),
        encode_hex(secret.as_bytes()),
    );

    let digest = Sha256::digest(input.as_bytes());

    input.zeroize();

    encode_hex(&digest)
}

/// Compare two verifiers without short-circuiting on the first difference.
#[must_use]
pub fn verifiers_match(expected: &str, actual: &str) -> bool {
    expected.len() == actual.len()
        && expected
            .bytes()
            .zip(actual.bytes())
            .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

fn encode_hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut encoded, byte| {
            let _infallible = write!(encoded, "{byte:02x}");
            encoded
        })
}

fn decode_secret_hex(secret_hex: &str) -> Option<[u8; ACCESS_TOKEN_SECRET_BYTES]> {
    if secret_hex.len() != ACCESS_TOKEN_SECRET_HEX_CHARS {
        return None;
    }

    let mut secret = [0_u8; ACCESS_TOKEN_SECRET_BYTES];

    for (byte, pair) in secret.iter_mut().zip(secret_hex.as_bytes().chunks_exact(2)) {
        let [hi, lo] = pair else {
            return None;
        };

        *byte = (decode_hex_nibble(*hi)? << 4) | decode_hex_nibble(*lo)?;
    }

    Some(secret)
}

fn decode_hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_format_round_trip() {
        let token_uuid = Uuid::nil();
        let secret = AccessTokenSecret::from_bytes([0xAB; ACCESS_TOKEN_SECRET_BYTES]);
        let token = format_access_token(token_uuid, AccessTokenVersion::V1, &secret);
        let parsed = parse_access_token(&token).expect("token should parse");

        assert!(token.starts_with("sf_v1_"));
        assert_eq!(parsed.token_uuid, token_uuid);
        assert_eq!(parsed.version, AccessTokenVersion::V1);
        assert_eq!(parsed.secret.as_bytes(), secret.as_bytes());
    }

    #[test]
    fn parse_rejects_invalid_prefix() {
        assert!(parse_access_token("nope_v1_00000000000000000000000000000000.aa").is_err());
    }

    #[test]
    fn parse_rejects_unknown_version() {
        let token = format!("sf_v9_{}.{}", Uuid::nil().simple(), "ab".repeat(32));

        assert!(matches!(
            parse_access_token(&token),
            Err(AccessTokenError::UnsupportedVersion)
        ));
    }

    #[test]
    fn parse_rejects_non_hex_secret() {
        let token = format!("sf_v1_{}.{}", Uuid::nil().simple(), "zz".repeat(32));

        assert!(matches!(
            parse_access_token(&token),
            Err(AccessTokenError::InvalidSecretEncoding)
        ));
    }

    #[test]
    fn verifier_is_deterministic_and_secret_dependent() {
        let token_uuid = Uuid::nil();
        let secret = AccessTokenSecret::from_bytes([0xCD; ACCESS_TOKEN_SECRET_BYTES]);
        let other = AccessTokenSecret::from_bytes([0xCE; ACCESS_TOKEN_SECRET_BYTES]);

        let first = token_verifier(&token_uuid, AccessTokenVersion::V1, &secret);
        let second = token_verifier(&token_uuid, AccessTokenVersion::V1, &secret);

        assert_eq!(first.len(), 64, "verifier is a hex sha256 digest");
        assert!(verifiers_match(&first, &second));
        assert!(!verifiers_match(
            &first,
            &token_verifier(&token_uuid, AccessTokenVersion::V1, &other)
        ));
    }
}
