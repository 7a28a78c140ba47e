//! Signed-in session stored in the depot.

use salvo::prelude::Depot;
use storefront_app::auth::AccessTokenUuid;

/// The access token a request was authenticated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Session {
    pub(crate) token: AccessTokenUuid,
}

pub(crate) trait SessionExt {
    fn insert_session(&mut self, session: Session);

    fn session(&self) -> Option<&Session>;

    fn signed_in(&self) -> bool {
        self.session().is_some()
    }
}

impl SessionExt for Depot {
    fn insert_session(&mut self, session: Session) {
        self.inject(session);
    }

    fn session(&self) -> Option<&Session> {
        self.obtain::<Session>().ok()
    }
}
