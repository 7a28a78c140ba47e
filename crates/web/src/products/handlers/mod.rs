//! Product Handlers

pub(crate) mod create;
pub(crate) mod destroy;
pub(crate) mod edit;
pub(crate) mod index;
pub(crate) mod method_override;
pub(crate) mod new;
pub(crate) mod show;
pub(crate) mod update;
