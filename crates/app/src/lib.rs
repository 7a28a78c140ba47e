//! Storefront domain, persistence and authentication modules.

pub mod assets;
pub mod auth;
pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
