//! In-process car store over BSON documents.
//!
//! Evaluates [`CarFilter`] the way the document store does: patterns are
//! case-insensitive and unanchored, and only match string fields; equality
//! compares numerically across integer and double encodings.

use async_trait::async_trait;
use mongodb::bson::{Bson, Document};
use regex::{Regex, RegexBuilder};

use super::{CarFilter, CarStore, Condition, Page, StoreError};
use crate::models::car::Car;

#[derive(Debug, Clone, Default)]
pub struct MemoryCarStore {
    documents: Vec<Document>,
}

impl MemoryCarStore {
    /// Documents are kept, and returned, in insertion order.
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl CarStore for MemoryCarStore {
    async fn find(&self, filter: &CarFilter, page: Page) -> Result<Vec<Car>, StoreError> {
        let matchers = filter
            .conditions()
            .iter()
            .map(Matcher::compile)
            .collect::<Result<Vec<_>, _>>()?;

        let skip = usize::try_from(page.skip).unwrap_or(usize::MAX);
        self.documents
            .iter()
            .filter(|doc| matchers.iter().all(|m| m.matches(doc)))
            .skip(skip)
            .take(page.limit as usize)
            .cloned()
            .map(Car::from_document)
            .collect()
    }
}

enum Matcher {
    Pattern { field: &'static str, regex: Regex },
    Equals { field: &'static str, value: i64 },
}

impl Matcher {
    fn compile(condition: &Condition) -> Result<Self, StoreError> {
        match condition {
            Condition::Pattern { field, pattern } => {
                let regex = RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| {
                        StoreError::Operation(format!("Regular expression is invalid: {e}"))
                    })?;
                Ok(Matcher::Pattern {
                    field: *field,
                    regex,
                })
            }
            Condition::Equals { field, value } => Ok(Matcher::Equals {
                field: *field,
                value: *value,
            }),
        }
    }

    fn matches(&self, doc: &Document) -> bool {
        match self {
            Matcher::Pattern { field, regex } => {
                matches!(doc.get(field), Some(Bson::String(s)) if regex.is_match(s))
            }
            Matcher::Equals { field, value } => match doc.get(field) {
                Some(Bson::Int32(v)) => i64::from(*v) == *value,
                Some(Bson::Int64(v)) => v == value,
                Some(Bson::Double(v)) => *v == *value as f64,
                _ => false,
            },
        }
    }
}
