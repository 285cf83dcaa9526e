//! Car document store: the query seam and its backends.
//!
//! Handlers only see [`CarStore`]. Production runs against MongoDB through
//! [`mongo::MongoCarStore`]; tests run the same filter semantics in process
//! with [`memory::MemoryCarStore`].

pub mod filter;
pub mod memory;
pub mod mongo;

use async_trait::async_trait;

use crate::models::car::Car;

pub use filter::{CarFilter, Condition};
pub use memory::MemoryCarStore;
pub use mongo::MongoCarStore;

/// Offset-based result window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Matching documents to pass over before collecting.
    pub skip: u64,
    /// Maximum number of documents to return.
    pub limit: u32,
}

impl Default for Page {
    fn default() -> Self {
        Self { skip: 0, limit: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// The store rejected or could not execute the query.
    #[error("{0}")]
    Operation(String),

    /// The store could not be reached.
    #[error("{0}")]
    Unavailable(String),

    #[error("malformed document: {0}")]
    MalformedDocument(String),
}

/// Read access to the car collection.
#[async_trait]
pub trait CarStore: Send + Sync {
    /// Return the documents matching `filter` within `page`, in store order.
    async fn find(&self, filter: &CarFilter, page: Page) -> Result<Vec<Car>, StoreError>;
}
