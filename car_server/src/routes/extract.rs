//! Query-string extractor that reports malformed parameters as API errors.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::Uri;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Like [`Query`], with two differences:
///
/// - a repeated parameter keeps its last value (`make=a&make=b` reads as `make=b`);
/// - a string that fails to deserialize (e.g. `limit=abc`) is rejected with a
///   422 field error instead of axum's plain-text 400.
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = collapse_repeated(parts.uri.query().unwrap_or_default());
        let uri = format!("/?{query}")
            .parse::<Uri>()
            .map_err(|e| ApiError::Internal(format!("rebuild query string: {e}")))?;
        let Query(value) = Query::<T>::try_from_uri(&uri)?;
        Ok(ApiQuery(value))
    }
}

/// Re-encode `raw` with one entry per key, keeping the last value seen and the
/// position of the first occurrence.
fn collapse_repeated(raw: &str) -> String {
    let mut items: Vec<(String, String)> = Vec::new();
    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()).into_owned() {
        match items.iter_mut().find(|(k, _)| *k == key) {
            Some(item) => item.1 = value,
            None => items.push((key, value)),
        }
    }

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in &items {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}
