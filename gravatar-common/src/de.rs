//! Tolerant decoding helpers.
//!
//! The upstream schema is not fully under our control: booleans sometimes
//! arrive as strings and dates come in a legacy space-separated format. The
//! helpers in here are used through `#[serde(deserialize_with = ..)]` on the
//! individual fields that need them.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::constants::LEGACY_DATE_FORMAT;

/// Errors produced while decoding a response body.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body did not match the expected schema.
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// A legacy profile response had no entry in it.
    #[error("No profile in response")]
    NoProfileInResponse,
}

/// Decode a JSON body into `T`.
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Map a JSON value to a boolean: native `true`/`false` or the exact strings
/// `"true"`/`"false"`. Anything else is `false`.
pub fn lenient_bool_value(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}

/// `deserialize_with` form of [`lenient_bool_value`]. Pair with
/// `#[serde(default)]` so an absent field is `false` too.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(lenient_bool_value(value.as_ref()))
}

/// Like [`lenient_bool`] but keeps "absent" distinguishable from `false`.
pub fn lenient_bool_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(|v| lenient_bool_value(Some(&v))))
}

/// Parse a `yyyy-MM-dd HH:mm:ss` UTC timestamp.
pub fn parse_legacy_datetime(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, LEGACY_DATE_FORMAT).map(|naive| naive.and_utc())
}

/// Parse an RFC 3339 timestamp, falling back to the legacy format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(_) => parse_legacy_datetime(s),
    }
}

/// Optional legacy timestamp. `null`/absent is `None`, a malformed value is an error.
pub fn legacy_datetime_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| {
            parse_legacy_datetime(&s)
                .map_err(|e| serde::de::Error::custom(format!("invalid date `{s}`: {e}")))
        })
        .transpose()
}

/// Optional timestamp in RFC 3339 or the legacy format. `null`/absent is
/// `None`, a malformed value is an error.
pub fn datetime_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| {
            parse_datetime(&s)
                .map_err(|e| serde::de::Error::custom(format!("invalid date `{s}`: {e}")))
        })
        .transpose()
}
