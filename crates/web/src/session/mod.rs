//! Sign in and sign out.
//!
//! A session is the access token itself, held in an HttpOnly cookie and
//! resolved again on every request by the auth middleware.

pub(crate) mod create;
pub(crate) mod destroy;
pub(crate) mod new;

use serde::Serialize;

/// Message shown when a token does not authenticate.
pub(crate) const INVALID_TOKEN_MESSAGE: &str = "Invalid access token";

#[derive(Debug, Serialize)]
pub(crate) struct SignInPage {
    pub(crate) signed_in: bool,
    pub(crate) error: Option<&'static str>,
}
