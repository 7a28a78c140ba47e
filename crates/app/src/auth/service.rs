//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::debug;

use crate::{
    auth::{
        AccessTokenMetadata, AccessTokenUuid, AccessTokenVersion, AuthServiceError,
        IssuedAccessToken, format_access_token, generate_access_token_secret,
        models::NewAccessToken, parse_access_token, repository::PgAuthRepository, token_verifier,
        verifiers_match,
    },
    database::Db,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            repository: PgAuthRepository::new(db.pool().clone()),
        }
    }

    /// Issue a new access token. The raw token is only ever returned here.
    ///
    /// # Errors
    ///
    /// Returns an error if database insertion fails.
    pub async fn issue_access_token(
        &self,
        label: &str,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedAccessToken, AuthServiceError> {
        let token_uuid = AccessTokenUuid::new();
        let version = AccessTokenVersion::V1;
        let secret = generate_access_token_secret();
        let token = format_access_token(token_uuid.into_uuid(), version, &secret);

        let token_hash = token_verifier(&token_uuid.into_uuid(), version, &secret);

        let metadata = self
            .repository
            .create_access_token(&NewAccessToken {
                uuid: token_uuid,
                label: label.to_string(),
                version,
                token_hash,
                expires_at,
            })
            .await?;

        Ok(IssuedAccessToken { token, metadata })
    }

    /// List all tokens, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_access_tokens(&self) -> Result<Vec<AccessTokenMetadata>, AuthServiceError> {
        Ok(self.repository.list_access_tokens().await?)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_access_token(
        &self,
        token: AccessTokenUuid,
    ) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_access_token(token)
            .await
            .map(|record| record.is_some())
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate(&self, token: &str) -> Result<AccessTokenUuid, AuthServiceError> {
        let parsed_token = parse_access_token(token).map_err(|error| {
            debug!(%error, "rejecting malformed access token");
            AuthServiceError::NotFound
        })?;

        let token_uuid = AccessTokenUuid::from_uuid(parsed_token.token_uuid);

        let active = self
            .repository
            .find_active_access_token(token_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if active.version != parsed_token.version {
            return Err(AuthServiceError::NotFound);
        }

        let verifier = token_verifier(
            &parsed_token.token_uuid,
            parsed_token.version,
            &parsed_token.secret,
        );

        if !verifiers_match(&active.token_hash, &verifier) {
            return Err(AuthServiceError::NotFound);
        }

        // Best-effort metadata update; auth success does not depend on this write.
        if let Err(error) = self.repository.touch_access_token(token_uuid).await {
            debug!(%error, "failed to record access token use");
        }

        Ok(token_uuid)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw access token to the token it identifies.
    async fn authenticate(&self, token: &str) -> Result<AccessTokenUuid, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, ToSpan};
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn issued_token_authenticates() -> TestResult {
        let ctx = TestContext::new().await;

        let issued = ctx.auth.issue_access_token("admin", None).await?;

        let authenticated = ctx.auth.authenticate(&issued.token).await?;

        assert_eq!(authenticated, issued.metadata.uuid);
        assert_eq!(issued.metadata.label, "admin");

        let tokens = ctx.auth.list_access_tokens().await?;

        assert_eq!(tokens.len(), 1);
        assert!(
            tokens.first().and_then(|token| token.last_used_at).is_some(),
            "authentication records last use"
        );

        Ok(())
    }

    #[tokio::test]
    async fn tampered_secret_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let issued = ctx.auth.issue_access_token("admin", None).await?;
        let (id, _secret) = issued.token.split_once('.').ok_or("malformed token")?;
        let forged = format!("{id}.{}", "0".repeat(64));

        let result = ctx.auth.authenticate(&forged).await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn revoked_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let issued = ctx.auth.issue_access_token("admin", None).await?;

        assert!(ctx.auth.revoke_access_token(issued.metadata.uuid).await?);
        assert!(!ctx.auth.revoke_access_token(issued.metadata.uuid).await?);

        let result = ctx.auth.authenticate(&issued.token).await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn expired_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let expired_at = Timestamp::now().checked_sub(1.hour())?;
        let issued = ctx.auth.issue_access_token("admin", Some(expired_at)).await?;

        let result = ctx.auth.authenticate(&issued.token).await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));

        Ok(())
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.authenticate("not-a-token").await;

        assert!(matches!(result, Err(AuthServiceError::NotFound)));
    }
}
