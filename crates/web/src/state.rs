//! State

use std::sync::Arc;

use salvo::http::cookie::{Cookie, SameSite, time::Duration};
use storefront_app::context::AppContext;

use crate::{config::session::SessionConfig, views::Views};

/// How the session cookie is named and issued.
#[derive(Debug, Clone)]
pub(crate) struct SessionSettings {
    pub(crate) cookie_name: String,
    pub(crate) secure: bool,
    pub(crate) ttl_hours: i64,
}

impl SessionSettings {
    /// Cookie carrying a freshly signed-in access token.
    pub(crate) fn session_cookie(&self, token: String) -> Cookie<'static> {
        self.cookie(token, Duration::hours(self.ttl_hours))
    }

    /// Cookie instructing the browser to forget the session.
    pub(crate) fn expired_cookie(&self) -> Cookie<'static> {
        self.cookie(String::new(), Duration::ZERO)
    }

    fn cookie(&self, value: String, max_age: Duration) -> Cookie<'static> {
        Cookie::build((self.cookie_name.clone(), value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(max_age)
            .build()
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            cookie_name: "storefront_session".to_string(),
            secure: false,
            ttl_hours: 336,
        }
    }
}

impl From<&SessionConfig> for SessionSettings {
    fn from(config: &SessionConfig) -> Self {
        Self {
            cookie_name: config.session_cookie_name.clone(),
            secure: config.session_cookie_secure,
            ttl_hours: config.session_ttl_hours,
        }
    }
}

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) views: Arc<Views>,
    pub(crate) session: SessionSettings,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, views: Views, session: SessionSettings) -> Self {
        Self {
            app,
            views: Arc::new(views),
            session,
        }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, views: Views, session: SessionSettings) -> Arc<Self> {
        Arc::new(Self::new(app, views, session))
    }
}
