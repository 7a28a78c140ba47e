//! Domain

pub mod products;
