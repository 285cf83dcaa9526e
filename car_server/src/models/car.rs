//! cars.cars: the read-only view of a stored car document.

use mongodb::bson::{Bson, Document};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::store::StoreError;

/// Key under which the document store keeps record identifiers.
pub const NATIVE_ID_FIELD: &str = "_id";

/// Key under which the stringified identifier is returned.
pub const ID_FIELD: &str = "id";

/// A car record as returned to clients.
///
/// The known fields are lifted out of the stored document when they carry the
/// expected type. Everything else, including known fields stored with an
/// unexpected type, is passed through verbatim in `extra`. A known field
/// appears at most once: either lifted or in `extra`, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Car {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Car {
    /// Convert a stored document, replacing `_id` with its string form under `id`.
    pub fn from_document(mut doc: Document) -> Result<Self, StoreError> {
        let id = match doc.remove(NATIVE_ID_FIELD) {
            Some(Bson::ObjectId(oid)) => oid.to_hex(),
            Some(Bson::String(s)) => s,
            Some(other) => other.to_string(),
            None => {
                return Err(StoreError::MalformedDocument(format!(
                    "document has no {NATIVE_ID_FIELD} field"
                )))
            }
        };
        if id.is_empty() {
            return Err(StoreError::MalformedDocument(format!(
                "document has an empty {NATIVE_ID_FIELD}"
            )));
        }

        // `id` is reserved for the stringified `_id`.
        if doc.remove(ID_FIELD).is_some() {
            tracing::debug!(id = %id, "Dropping stored `{ID_FIELD}` field that shadows the record id");
        }

        let make = take_string(&mut doc, "make");
        let model = take_string(&mut doc, "model");
        let year = take_integer(&mut doc, "year");
        let color = take_string(&mut doc, "color");

        let extra = doc
            .into_iter()
            .map(|(key, value)| (key, value.into_relaxed_extjson()))
            .collect();

        Ok(Self {
            id,
            make,
            model,
            year,
            color,
            extra,
        })
    }
}

fn take_string(doc: &mut Document, key: &str) -> Option<String> {
    if !matches!(doc.get(key), Some(Bson::String(_))) {
        return None;
    }
    match doc.remove(key) {
        Some(Bson::String(s)) => Some(s),
        _ => None,
    }
}

fn take_integer(doc: &mut Document, key: &str) -> Option<i64> {
    let value = match doc.get(key) {
        Some(Bson::Int32(v)) => i64::from(*v),
        Some(Bson::Int64(v)) => *v,
        _ => return None,
    };
    doc.remove(key);
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;

    #[test]
    fn object_id_becomes_hex_string() {
        let oid = ObjectId::new();
        let car = Car::from_document(doc! {
            "_id": oid,
            "make": "Honda",
            "model": "Civic",
            "year": 2020,
            "fuel_type": "Gasoline",
        })
        .unwrap();

        assert_eq!(car.id, oid.to_hex());
        assert_eq!(car.make.as_deref(), Some("Honda"));
        assert_eq!(car.model.as_deref(), Some("Civic"));
        assert_eq!(car.year, Some(2020));
        assert_eq!(car.color, None);
        assert_eq!(car.extra.get("fuel_type"), Some(&json!("Gasoline")));
    }

    #[test]
    fn serialized_record_has_id_and_no_native_key() {
        let car = Car::from_document(doc! {
            "_id": "abc123",
            "make": "Toyota",
            "model": "Corolla",
            "year": 2019_i64,
            "color": "red",
            "fuel_type": "Gasoline",
        })
        .unwrap();

        let value = serde_json::to_value(&car).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "abc123",
                "make": "Toyota",
                "model": "Corolla",
                "year": 2019,
                "color": "red",
                "fuel_type": "Gasoline",
            })
        );
        assert!(value.get(NATIVE_ID_FIELD).is_none());
    }

    #[test]
    fn stored_id_field_never_shadows_native_id() {
        let car = Car::from_document(doc! {
            "_id": "real-id",
            "id": "",
            "make": "Honda",
        })
        .unwrap();

        assert_eq!(car.id, "real-id");
        assert!(!car.extra.contains_key(ID_FIELD));

        let body = serde_json::to_string(&car).unwrap();
        assert_eq!(body.matches("\"id\":").count(), 1, "{body}");
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value[ID_FIELD], "real-id");
    }

    #[test]
    fn non_string_ids_use_display_form() {
        let car = Car::from_document(doc! { "_id": 42 }).unwrap();
        assert_eq!(car.id, "42");
    }

    #[test]
    fn missing_or_empty_id_is_malformed() {
        let err = Car::from_document(doc! { "make": "Ford" }).unwrap_err();
        assert!(matches!(err, StoreError::MalformedDocument(_)));

        let err = Car::from_document(doc! { "_id": "" }).unwrap_err();
        assert!(matches!(err, StoreError::MalformedDocument(_)));
    }

    #[test]
    fn mistyped_known_fields_pass_through() {
        let car = Car::from_document(doc! {
            "_id": "x",
            "make": 7,
            "year": "1999",
            "color": Bson::Null,
        })
        .unwrap();

        assert_eq!(car.make, None);
        assert_eq!(car.year, None);
        assert_eq!(car.color, None);
        assert_eq!(car.extra.get("make"), Some(&json!(7)));
        assert_eq!(car.extra.get("year"), Some(&json!("1999")));
        assert_eq!(car.extra.get("color"), Some(&Value::Null));

        let body = serde_json::to_string(&car).unwrap();
        assert_eq!(body.matches("\"make\":").count(), 1, "{body}");
        assert_eq!(body.matches("\"year\":").count(), 1, "{body}");
    }
}
