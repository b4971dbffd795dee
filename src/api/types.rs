//! Response body shapes shared across endpoints

use serde::{Deserialize, Deserializer};

/// A response payload, either bare or inside the backend's
/// `{code, message, data}` wrapper. Some endpoints answer one shape, some
/// the other; the client accepts both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiBody<T> {
    Wrapped(Envelope<T>),
    Plain(T),
}

impl<T> ApiBody<T> {
    /// Unwrap to the payload, discarding the envelope metadata
    pub fn into_data(self) -> T {
        match self {
            ApiBody::Wrapped(envelope) => envelope.data,
            ApiBody::Plain(data) => data,
        }
    }
}

/// The backend's `{code, message, data}` wrapper
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub code: Option<i64>,

    #[serde(default, alias = "msg")]
    pub message: Option<String>,

    pub data: T,
}

/// Accept an id as either a JSON number or a string, storing it as a
/// string (the session keeps ids as opaque text).
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(i64),
        Text(String),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Number(n) => n.to_string(),
        Id::Text(s) => s,
    })
}
