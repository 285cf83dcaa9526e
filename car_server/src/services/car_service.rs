//! Car search: parameter validation, filter construction, paged lookup.

use std::time::Instant;

use serde::Deserialize;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::models::car::Car;
use crate::store::filter::{FIELD_FUEL_TYPE, FIELD_MAKE, FIELD_MODEL, FIELD_YEAR};
use crate::store::{CarFilter, CarStore, Page};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Query parameters accepted by `GET /cars`.
#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
pub struct CarSearch {
    /// Case-insensitive pattern on `make`.
    pub make: Option<String>,
    /// Case-insensitive pattern on `model`.
    pub model: Option<String>,
    /// Exact manufacturing year.
    pub year: Option<i64>,
    /// Case-insensitive pattern on `fuel_type`.
    pub fuel: Option<String>,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "skip must be greater than or equal to 0"))]
    pub skip: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for CarSearch {
    fn default() -> Self {
        Self {
            make: None,
            model: None,
            year: None,
            fuel: None,
            limit: DEFAULT_LIMIT,
            skip: 0,
        }
    }
}

impl CarSearch {
    /// Build the store filter. Blank text parameters are ignored.
    pub fn filter(&self) -> CarFilter {
        let mut filter = CarFilter::new();
        for (field, value) in [
            (FIELD_MAKE, &self.make),
            (FIELD_MODEL, &self.model),
            (FIELD_FUEL_TYPE, &self.fuel),
        ] {
            if let Some(pattern) = value.as_deref().filter(|s| !s.is_empty()) {
                filter = filter.pattern(field, pattern);
            }
        }
        if let Some(year) = self.year {
            filter = filter.equals(FIELD_YEAR, year);
        }
        filter
    }

    /// Result window. Only meaningful once the parameters have validated.
    pub fn page(&self) -> ApiResult<Page> {
        let limit = u32::try_from(self.limit)
            .map_err(|_| ApiError::Internal(format!("limit out of range: {}", self.limit)))?;
        let skip = u64::try_from(self.skip)
            .map_err(|_| ApiError::Internal(format!("skip out of range: {}", self.skip)))?;
        Ok(Page { skip, limit })
    }
}

/// Validate `params` and run the search. Invalid parameters never reach the store.
pub async fn search(store: &dyn CarStore, params: &CarSearch) -> ApiResult<Vec<Car>> {
    if let Err(errors) = params.validate() {
        crate::metrics::query_completed("invalid");
        return Err(errors.into());
    }

    let filter = params.filter();
    let page = params.page()?;

    let started = Instant::now();
    let result = store.find(&filter, page).await;
    crate::metrics::query_duration(started.elapsed().as_millis() as u64);

    match result {
        Ok(cars) => {
            crate::metrics::query_completed("ok");
            crate::metrics::results_returned(cars.len());
            tracing::debug!(
                conditions = filter.conditions().len(),
                skip = page.skip,
                limit = page.limit,
                returned = cars.len(),
                "Car search completed"
            );
            Ok(cars)
        }
        Err(e) => {
            crate::metrics::query_completed("store_error");
            tracing::error!(query = ?filter, "Car search failed: {e}");
            Err(e.into())
        }
    }
}
