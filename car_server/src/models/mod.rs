//! Car catalog data models.

pub mod car;
