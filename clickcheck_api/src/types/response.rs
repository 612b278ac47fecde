use std::ops::Deref;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A typed record together with the exact JSON body it was decoded from.
///
/// Fields are reachable through `Deref`. Serializing emits the body as the
/// API sent it, so omitted keys stay omitted and integer numbers stay
/// integers.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    data: T,
    raw: Value,
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Decodes `T` from a parsed body, keeping the body alongside it.
    pub fn from_value(raw: Value) -> Result<Self, serde_json::Error> {
        let data = T::deserialize(&raw)?;
        Ok(Self { data, raw })
    }
}

impl<T> ApiResponse<T> {
    /// The response body, unmodified.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_inner(self) -> T {
        self.data
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }
}

impl<T> Deref for ApiResponse<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

impl<T> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for ApiResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Self::from_value(raw).map_err(D::Error::custom)
    }
}
