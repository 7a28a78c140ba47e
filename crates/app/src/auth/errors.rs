//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::auth::AccessTokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("token not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("token processing error")]
    Token(#[source] AccessTokenError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}

impl From<AccessTokenError> for AuthServiceError {
    fn from(error: AccessTokenError) -> Self {
        Self::Token(error)
    }
}
