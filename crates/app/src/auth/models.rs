//! Auth data models.

use jiff::Timestamp;

use crate::{auth::AccessTokenVersion, uuids::TypedUuid};

/// Access Token UUID
pub type AccessTokenUuid = TypedUuid<AccessTokenMetadata>;

/// Access token data used during authentication.
#[derive(Debug, Clone)]
pub(crate) struct ActiveAccessToken {
    /// Token format/hash version.
    pub version: AccessTokenVersion,

    /// SHA-256 verifier for the token secret material.
    pub token_hash: String,
}

/// Access token metadata persisted in storage.
#[derive(Debug, Clone)]
pub struct AccessTokenMetadata {
    pub uuid: AccessTokenUuid,
    pub label: String,
    pub version: AccessTokenVersion,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
}

/// New access token persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewAccessToken {
    pub uuid: AccessTokenUuid,
    pub label: String,
    pub version: AccessTokenVersion,
    pub token_hash: String,
    pub expires_at: Option<Timestamp>,
}

/// Access token issuance result with one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedAccessToken {
    pub token: String,
    pub metadata: AccessTokenMetadata,
}
