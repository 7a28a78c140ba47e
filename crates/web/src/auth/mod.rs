//! Authentication

pub(crate) mod middleware;

pub(crate) use middleware::{authenticate, require_authentication};
