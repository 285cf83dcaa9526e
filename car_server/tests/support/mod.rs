#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Context as _;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use car_server::models::car::Car;
use car_server::store::{CarFilter, Page, StoreError};
use car_server::{car_router, CarRouterState, CarStore, CarsConfig, MemoryCarStore};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use serde_json::Value;
use tower::ServiceExt as _;

/// Wraps a store and counts how many queries reach it.
pub struct CountingStore<S> {
    inner: S,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl<S: CarStore> CarStore for CountingStore<S> {
    async fn find(&self, filter: &CarFilter, page: Page) -> Result<Vec<Car>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find(filter, page).await
    }
}

/// A store that always fails with the given error.
pub struct FailingStore(pub StoreError);

#[async_trait]
impl CarStore for FailingStore {
    async fn find(&self, _filter: &CarFilter, _page: Page) -> Result<Vec<Car>, StoreError> {
        Err(self.0.clone())
    }
}

pub struct TestApp {
    pub router: Router,
    calls: Arc<AtomicUsize>,
}

impl TestApp {
    pub fn new(documents: Vec<Document>) -> Self {
        Self::with_store(MemoryCarStore::new(documents))
    }

    pub fn with_store(store: impl CarStore + 'static) -> Self {
        let calls = Arc::new(AtomicUsize::new(0));
        let store = CountingStore {
            inner: store,
            calls: calls.clone(),
        };
        let router = car_router(CarRouterState::new(store), &CarsConfig::default());
        Self { router, calls }
    }

    /// Number of queries that reached the store so far.
    pub fn store_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn get(&self, path_and_query: &str) -> anyhow::Result<(StatusCode, Value)> {
        let (status, _, body) = self
            .request(Method::GET, path_and_query, &[])
            .await?;
        let json = serde_json::from_slice(&body).context("parse response body")?;
        Ok((status, json))
    }

    pub async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        headers: &[(&str, &str)],
    ) -> anyhow::Result<(StatusCode, HeaderMap, axum::body::Bytes)> {
        let mut builder = Request::builder().method(method).uri(path_and_query);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder.body(Body::empty()).context("build request")?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("dispatch request")?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;

        Ok((status, headers, body))
    }
}

/// The two-car catalog used by the end-to-end scenarios.
pub fn honda_and_toyota() -> Vec<Document> {
    vec![
        doc! {
            "_id": ObjectId::new(),
            "make": "Honda",
            "model": "Civic",
            "year": 2020,
            "fuel_type": "Gasoline",
        },
        doc! {
            "_id": ObjectId::new(),
            "make": "Toyota",
            "model": "Corolla",
            "year": 2019,
            "fuel_type": "Gasoline",
        },
    ]
}

/// A larger catalog for pagination checks.
pub fn fleet(size: usize) -> Vec<Document> {
    const MAKES: [&str; 4] = ["Honda", "Toyota", "Ford", "Shonky"];
    const FUELS: [&str; 3] = ["Gasoline", "Diesel", "Electric"];
    (0..size)
        .map(|i| {
            let make = MAKES[i % MAKES.len()];
            let model = format!("Model {i}");
            let year = 2000 + (i % 5) as i32;
            let color = if i % 2 == 0 { "red" } else { "blue" };
            let fuel = FUELS[i % FUELS.len()];
            doc! {
                "_id": ObjectId::new(),
                "make": make,
                "model": model,
                "year": year,
                "color": color,
                "fuel_type": fuel,
            }
        })
        .collect()
}

pub fn as_array(value: &Value) -> &Vec<Value> {
    value.as_array().expect("response body is a JSON array")
}
