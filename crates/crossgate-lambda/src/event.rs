//! Proxy event model.
//!
//! Wire-format mirror of the JSON values exchanged with the serverless
//! host. Deserialization is permissive: missing or `null` maps mean "not
//! present", never malformance. Only the adapter decides what is an error,
//! and it does so after parsing (see [`crate::request`]).

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// One inbound HTTP interaction as delivered by the host.
///
/// When a multi-value map carries a key, its entries are authoritative over
/// the single-value map for that key; the single-value maps exist for hosts
/// and consumers that collapsed duplicates (last value wins upstream).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProxyRequest {
    pub path: String,
    pub http_method: String,
    #[serde(deserialize_with = "null_default")]
    pub headers: HashMap<String, String>,
    #[serde(deserialize_with = "null_default")]
    pub multi_value_headers: HashMap<String, Vec<String>>,
    #[serde(deserialize_with = "null_default")]
    pub query_string_parameters: HashMap<String, String>,
    #[serde(deserialize_with = "null_default")]
    pub multi_value_query_string_parameters: HashMap<String, Vec<String>>,
    #[serde(deserialize_with = "null_default")]
    pub body: String,
    pub is_base64_encoded: bool,
    /// Opaque host metadata (caller identity, stage, request id). Passed
    /// through untouched; retrievable during handler execution via
    /// [`crate::lambda_event`].
    pub request_context: serde_json::Value,
}

/// The response value returned to the host.
///
/// Invariant: `is_base64_encoded` and `body` agree. A true flag means the
/// body string is standard base64 of the raw response bytes; a false flag
/// means the string is exactly those bytes as UTF-8 text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    /// Populated only for header names that carried more than one value.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub multi_value_headers: HashMap<String, Vec<String>>,
    pub body: String,
    pub is_base64_encoded: bool,
}

/// Hosts serialize absent maps as explicit `null`; treat that as empty.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
