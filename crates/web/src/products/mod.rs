//! Products

mod errors;
pub(crate) mod handlers;
mod lookup;
mod params;
mod views;
