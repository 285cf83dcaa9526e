//! Car catalog read API.
//!
//! `GET /cars` searches the `cars` document collection by make, model, year
//! and fuel type with offset pagination; `GET /` is a liveness check. The
//! binary in `main.rs` wires configuration, the MongoDB store and the router.

pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

pub use config::CarsConfig;
pub use error::{ApiError, ApiResult};
pub use routes::{car_router, CarRouterState};
pub use store::{CarStore, MemoryCarStore, MongoCarStore};
