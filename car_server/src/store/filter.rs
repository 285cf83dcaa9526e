//! Conjunctive filter over car documents.

use mongodb::bson::{doc, Document};

pub const FIELD_MAKE: &str = "make";
pub const FIELD_MODEL: &str = "model";
pub const FIELD_FUEL_TYPE: &str = "fuel_type";
pub const FIELD_YEAR: &str = "year";

/// A single field-level match condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Case-insensitive, unanchored regular-expression match. The pattern is
    /// used as given, so caller-supplied metacharacters keep their meaning.
    Pattern { field: &'static str, pattern: String },
    /// Exact numeric match.
    Equals { field: &'static str, value: i64 },
}

impl Condition {
    pub fn field(&self) -> &'static str {
        match self {
            Condition::Pattern { field, .. } | Condition::Equals { field, .. } => *field,
        }
    }
}

/// All conditions must hold. An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarFilter {
    conditions: Vec<Condition>,
}

impl CarFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pattern(mut self, field: &'static str, pattern: impl Into<String>) -> Self {
        self.conditions.push(Condition::Pattern {
            field,
            pattern: pattern.into(),
        });
        self
    }

    pub fn equals(mut self, field: &'static str, value: i64) -> Self {
        self.conditions.push(Condition::Equals { field, value });
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Render as a MongoDB query document.
    pub fn to_document(&self) -> Document {
        let mut query = Document::new();
        for condition in &self.conditions {
            match condition {
                Condition::Pattern { field, pattern } => {
                    query.insert(*field, doc! { "$regex": pattern.as_str(), "$options": "i" });
                }
                Condition::Equals { field, value } => {
                    query.insert(*field, *value);
                }
            }
        }
        query
    }
}
