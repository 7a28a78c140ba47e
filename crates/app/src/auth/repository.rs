//! Auth repository.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::auth::{
    AccessTokenMetadata, AccessTokenUuid, AccessTokenVersion,
    models::{ActiveAccessToken, NewAccessToken},
};

const CREATE_ACCESS_TOKEN_SQL: &str = include_str!("sql/create_access_token.sql");
const LIST_ACCESS_TOKENS_SQL: &str = include_str!("sql/list_access_tokens.sql");
const FIND_ACTIVE_ACCESS_TOKEN_SQL: &str = include_str!("sql/find_active_access_token.sql");
const TOUCH_ACCESS_TOKEN_SQL: &str = include_str!("sql/touch_access_token.sql");
const REVOKE_ACCESS_TOKEN_SQL: &str = include_str!("sql/revoke_access_token.sql");

#[derive(Debug, Clone)]
pub(crate) struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn create_access_token(
        &self,
        token: &NewAccessToken,
    ) -> Result<AccessTokenMetadata, sqlx::Error> {
        query_as::<Postgres, AccessTokenMetadata>(CREATE_ACCESS_TOKEN_SQL)
            .bind(token.uuid.into_uuid())
            .bind(&token.label)
            .bind(token.version.as_i16())
            .bind(&token.token_hash)
            .bind(token.expires_at.map(SqlxTimestamp::from))
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn list_access_tokens(&self) -> Result<Vec<AccessTokenMetadata>, sqlx::Error> {
        query_as::<Postgres, AccessTokenMetadata>(LIST_ACCESS_TOKENS_SQL)
            .fetch_all(&self.pool)
            .await
    }

    /// Find a token that is neither revoked nor expired.
    pub(crate) async fn find_active_access_token(
        &self,
        token: AccessTokenUuid,
    ) -> Result<Option<ActiveAccessToken>, sqlx::Error> {
        query_as::<Postgres, ActiveAccessToken>(FIND_ACTIVE_ACCESS_TOKEN_SQL)
            .bind(token.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn touch_access_token(&self, token: AccessTokenUuid) -> Result<(), sqlx::Error> {
        query(TOUCH_ACCESS_TOKEN_SQL)
            .bind(token.into_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub(crate) async fn revoke_access_token(
        &self,
        token: AccessTokenUuid,
    ) -> Result<Option<AccessTokenMetadata>, sqlx::Error> {
        query_as::<Postgres, AccessTokenMetadata>(REVOKE_ACCESS_TOKEN_SQL)
            .bind(token.into_uuid())
            .fetch_optional(&self.pool)
            .await
    }
}

fn decode_version(row: &PgRow) -> sqlx::Result<AccessTokenVersion> {
    AccessTokenVersion::try_from(row.try_get::<i16, _>("version")?).map_err(|e| {
        sqlx::Error::ColumnDecode {
            index: "version".to_string(),
            source: Box::new(e),
        }
    })
}

impl<'r> FromRow<'r, PgRow> for ActiveAccessToken {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            version: decode_version(row)?,
            token_hash: row.try_get("token_hash")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for AccessTokenMetadata {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AccessTokenUuid::from_uuid(row.try_get("uuid")?),
            label: row.try_get("label")?,
            version: decode_version(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            last_used_at: row
                .try_get::<Option<SqlxTimestamp>, _>("last_used_at")?
                .map(SqlxTimestamp::to_jiff),
            expires_at: row
                .try_get::<Option<SqlxTimestamp>, _>("expires_at")?
                .map(SqlxTimestamp::to_jiff),
            revoked_at: row
                .try_get::<Option<SqlxTimestamp>, _>("revoked_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
