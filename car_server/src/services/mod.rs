//! Car API services.

pub mod car_service;
