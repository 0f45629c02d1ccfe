//! Status check and typed decoding shared by every backend operation.
//!
//! Status is always checked before the body is looked at; a non-200 body is
//! never parsed.

use super::transport::RawResponse;
use super::types::Reply;
use crate::error::ClientError;
use crate::util::redact::body_excerpt;
use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;
use tracing::{debug, warn};

const STATUS_OK: u16 = 200;

pub(super) fn ensure_ok(endpoint: &'static str, raw: &RawResponse) -> Result<(), ClientError> {
    if raw.status == STATUS_OK {
        return Ok(());
    }

    warn!(endpoint, status = raw.status, "backend returned non-OK status");
    debug!(endpoint, body = %body_excerpt(&raw.body), "non-OK response body");
    Err(ClientError::RemoteStatus {
        endpoint,
        status: raw.status,
    })
}

/// Check the status, then decode the whole body as `R`.
///
/// The body must be a JSON object; arrays are not accepted as records.
pub(super) fn decode_body<R: DeserializeOwned>(
    endpoint: &'static str,
    raw: &RawResponse,
) -> Result<Reply<R>, ClientError> {
    decode_records(endpoint, raw, &[])
}

/// Like [`decode_body`], and every element of the array fields named in
/// `record_lists` must be an object too.
pub(super) fn decode_records<R: DeserializeOwned>(
    endpoint: &'static str,
    raw: &RawResponse,
    record_lists: &[&str],
) -> Result<Reply<R>, ClientError> {
    ensure_ok(endpoint, raw)?;

    let body: Value = serde_json::from_slice(&raw.body)
        .map_err(|source| decode_failed(endpoint, raw.status, source))?;

    let Some(fields) = body.as_object() else {
        return Err(decode_failed(endpoint, raw.status, not_an_object("response body")));
    };
    for list in record_lists {
        if let Some(Value::Array(items)) = fields.get(*list)
            && items.iter().any(|item| !item.is_object())
        {
            return Err(decode_failed(endpoint, raw.status, not_an_object(list)));
        }
    }

    let value = serde_json::from_value::<R>(body)
        .map_err(|source| decode_failed(endpoint, raw.status, source))?;
    Ok(Reply {
        status: raw.status,
        value,
    })
}

fn not_an_object(what: &str) -> serde_json::Error {
    serde_json::Error::custom(format!("expected a JSON object in `{what}`"))
}

fn decode_failed(endpoint: &'static str, status: u16, source: serde_json::Error) -> ClientError {
    warn!(endpoint, error = %source, "backend response did not match expected shape");
    ClientError::Decode {
        endpoint,
        status,
        source,
    }
}

/// Treat an absent, null or empty value as missing.
pub(super) fn require_non_empty(
    endpoint: &'static str,
    status: u16,
    field: &'static str,
    value: Option<String>,
) -> Result<String, ClientError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => {
            warn!(endpoint, field, "backend response is missing a required value");
            Err(ClientError::MissingField {
                endpoint,
                status,
                field,
            })
        }
    }
}
