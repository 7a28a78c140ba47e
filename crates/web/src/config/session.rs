//! Session Config

use clap::Args;

/// Longest session cookie lifetime accepted: ten years.
pub(crate) const MAX_SESSION_TTL_HOURS: i64 = 87_600;

/// Session cookie settings.
#[derive(Debug, Args)]
pub(crate) struct SessionConfig {
    /// Name of the cookie holding the signed-in access token
    #[arg(long, env = "SESSION_COOKIE_NAME", default_value = "storefront_session")]
    pub session_cookie_name: String,

    /// Only send the session cookie over HTTPS
    #[arg(long, env = "SESSION_COOKIE_SECURE", default_value_t = false)]
    pub session_cookie_secure: bool,

    /// Session cookie lifetime in hours
    #[arg(
        long,
        env = "SESSION_TTL_HOURS",
        default_value_t = 336_i64,
        value_parser = clap::value_parser!(i64).range(1..=MAX_SESSION_TTL_HOURS)
    )]
    pub session_ttl_hours: i64,
}
