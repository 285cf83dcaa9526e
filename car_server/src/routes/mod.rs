//! Car API HTTP routes.

pub mod extract;

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderValue;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::CarsConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::car::Car;
use crate::services::car_service::{self, CarSearch};
use crate::store::CarStore;

use self::extract::ApiQuery;

/// Shared state for car route handlers.
#[derive(Clone)]
pub struct CarRouterState {
    pub store: Arc<dyn CarStore>,
}

impl CarRouterState {
    pub fn new(store: impl CarStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Build the car API router with CORS and request tracing.
pub fn car_router(state: CarRouterState, config: &CarsConfig) -> Router {
    Router::new()
        .route("/", get(read_root))
        .route("/cars", get(list_cars))
        .fallback(not_found)
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Credentialed CORS for a fixed allow-list. Methods and headers are mirrored
/// from the preflight, since a wildcard is not allowed alongside credentials.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin: {e}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

// ── Liveness ──

async fn read_root() -> Json<Value> {
    Json(json!({ "Hello": "World" }))
}

// ── Car API ──

async fn list_cars(
    State(state): State<CarRouterState>,
    ApiQuery(params): ApiQuery<CarSearch>,
) -> ApiResult<Json<Vec<Car>>> {
    car_service::search(state.store.as_ref(), &params)
        .await
        .map(Json)
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}
