//! MongoDB-backed car store.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::Document;
use mongodb::error::ErrorKind;
use mongodb::{Client, Collection};

use super::{CarFilter, CarStore, Page, StoreError};
use crate::config::CarsConfig;
use crate::models::car::Car;

/// Handle to the car collection. Cloning shares the underlying client pool.
#[derive(Clone, Debug)]
pub struct MongoCarStore {
    collection: Collection<Document>,
}

impl MongoCarStore {
    /// Build a client for `url` and bind to the configured database and collection.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first query rather than here.
    pub async fn connect(url: &str, config: &CarsConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(url).await?;
        let collection = client
            .database(&config.database_name)
            .collection::<Document>(&config.collection_name);

        tracing::info!(
            database = %config.database_name,
            collection = %config.collection_name,
            "Car store configured"
        );

        Ok(Self::from_collection(collection))
    }

    pub fn from_collection(collection: Collection<Document>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl CarStore for MongoCarStore {
    async fn find(&self, filter: &CarFilter, page: Page) -> Result<Vec<Car>, StoreError> {
        let cursor = self
            .collection
            .find(filter.to_document())
            .skip(page.skip)
            .limit(i64::from(page.limit))
            .await?;

        let documents: Vec<Document> = cursor.try_collect().await?;
        documents.into_iter().map(Car::from_document).collect()
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Command(_) | ErrorKind::Write(_) | ErrorKind::InvalidArgument { .. } => {
                StoreError::Operation(err.to_string())
            }
            _ => StoreError::Unavailable(err.to_string()),
        }
    }
}
