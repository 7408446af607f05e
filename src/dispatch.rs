//! Host boundary: decode the argument payload, run the batch, hand back the
//! wire string.
//!
//! The host protocol passes a single JSON array
//! `[storeName, [[sql, [param, ...]], ...], readOnly]` and understands two
//! string channels coming back: success (the encoded batch result) and error
//! (a request-level message). [`WebsqlBridge::handle_call`] is that boundary;
//! a payload that does not decode is reported once on the error channel and
//! nothing executes.

use std::fmt;
use std::path::PathBuf;

use serde::de::{self, Deserialize, Deserializer, IgnoredAny, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeTuple, Serializer};
use tracing::debug;

use crate::encoder::encode_batch_result;
use crate::error::BridgeError;
use crate::executor::execute_batch;
use crate::registry::StoreRegistry;
use crate::types::{BatchRequest, BatchResult, QueryAndParams, WireValue};

impl<'de> Deserialize<'de> for WireValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScalarVisitor;

        impl Visitor<'_> for ScalarVisitor {
            type Value = WireValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a null, boolean, number, or string bind parameter")
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(WireValue::Null)
            }

            fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(WireValue::Bool(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(WireValue::Int(v))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                // JSON has one number type; what overflows i64 flows on as a
                // float, like it would in the host runtime.
                match i64::try_from(v) {
                    Ok(i) => Ok(WireValue::Int(i)),
                    Err(_) => Ok(WireValue::Float(v as f64)),
                }
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(WireValue::Float(v))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(WireValue::Text(v.to_owned()))
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(WireValue::Text(v))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

impl<'de> Deserialize<'de> for QueryAndParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct QueryVisitor;

        impl<'de> Visitor<'de> for QueryVisitor {
            type Value = QueryAndParams;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a [sql, [param, ...]] query entry")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let sql: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let params: Vec<WireValue> = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                // Hosts may append extra positions; drain and ignore them.
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(QueryAndParams { sql, params })
            }
        }

        deserializer.deserialize_seq(QueryVisitor)
    }
}

impl<'de> Deserialize<'de> for BatchRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RequestVisitor;

        impl<'de> Visitor<'de> for RequestVisitor {
            type Value = BatchRequest;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a [storeName, [query, ...], readOnly] argument array")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let store: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let queries: Vec<QueryAndParams> = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let read_only: bool = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(BatchRequest {
                    store,
                    queries,
                    read_only,
                })
            }
        }

        deserializer.deserialize_seq(RequestVisitor)
    }
}

impl Serialize for QueryAndParams {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut entry = serializer.serialize_tuple(2)?;
        entry.serialize_element(&self.sql)?;
        entry.serialize_element(&self.params)?;
        entry.end()
    }
}

impl Serialize for BatchRequest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut entry = serializer.serialize_tuple(3)?;
        entry.serialize_element(&self.store)?;
        entry.serialize_element(&self.queries)?;
        entry.serialize_element(&self.read_only)?;
        entry.end()
    }
}

/// Decode a host argument payload into a [`BatchRequest`].
///
/// # Errors
///
/// Returns `BridgeError::RequestMalformed` describing the first thing wrong
/// with the payload.
pub fn parse_batch_request(args: &str) -> Result<BatchRequest, BridgeError> {
    serde_json::from_str(args).map_err(|e| BridgeError::RequestMalformed(e.to_string()))
}

/// The host-facing entry point. Owns the store registry and turns argument
/// payloads into wire strings.
///
/// Keep one bridge per store root so the one-connection-per-store invariant
/// holds across every call that can name the same store.
#[derive(Debug)]
pub struct WebsqlBridge {
    registry: StoreRegistry,
}

impl WebsqlBridge {
    /// Bridge whose store files live under `store_root`.
    #[must_use]
    pub fn new(store_root: impl Into<PathBuf>) -> Self {
        Self {
            registry: StoreRegistry::new(store_root),
        }
    }

    /// The registry backing this bridge.
    #[must_use]
    pub fn registry(&self) -> &StoreRegistry {
        &self.registry
    }

    /// Execute an already-decoded request against this bridge's stores.
    ///
    /// # Errors
    ///
    /// Same contract as [`execute_batch`].
    pub fn execute(&self, request: &BatchRequest) -> Result<BatchResult, BridgeError> {
        execute_batch(&self.registry, request)
    }

    /// Full host call: decode `args`, run the batch, encode the result.
    ///
    /// `Ok` is the success-channel payload; an `Err`'s display text is the
    /// error-channel message.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::RequestMalformed` for payloads or store names
    /// that do not decode, `BridgeError::Sqlite` if the store cannot be
    /// opened, and `BridgeError::Encoding` if serialization fails.
    pub fn handle_call(&self, args: &str) -> Result<String, BridgeError> {
        debug!(bytes = args.len(), "handling bridge call");
        let request = parse_batch_request(args)?;
        let batch = self.execute(&request)?;
        encode_batch_result(&batch)
    }
}
