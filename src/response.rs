//! Maps raw Patton responses to caller-facing results.
//!
//! The server already answers in the shape callers want, so mapping is
//! validation only: anything that is not the expected JSON shape becomes a
//! `ServerResponse` error here instead of surfacing later as a missing key.

use patton_core::{BannerResult, DependencyResult, PattonError, Result};
use reqwest::StatusCode;
use serde_json::Value;

/// Read the body of a response, failing on any status other than 200.
pub async fn read_body(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await.map_err(PattonError::Connection)?;

    if status != StatusCode::OK {
        return Err(PattonError::ServerResponse {
            status: status.as_u16(),
            detail: body,
        });
    }

    Ok(body)
}

/// `{ "<dep-id>": {"cpes": [...], "cves": [...]} }`
pub fn map_dependency_response(body: &str) -> Result<DependencyResult> {
    let object = parse_object(body)?;
    serde_json::from_value(Value::Object(object))
        .map_err(|e| shape_error(&format!("unexpected dependency entry ({})", e), body))
}

/// `{ "<banner>": <vulnerability data> }`
pub fn map_banner_response(body: &str) -> Result<BannerResult> {
    Ok(parse_object(body)?.into_iter().collect())
}

fn parse_object(body: &str) -> Result<serde_json::Map<String, Value>> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(shape_error("expected a JSON object", body)),
        Err(e) => Err(shape_error(&format!("invalid JSON ({})", e), body)),
    }
}

fn shape_error(reason: &str, body: &str) -> PattonError {
    PattonError::ServerResponse {
        status: StatusCode::OK.as_u16(),
        detail: format!("{}: {}", reason, body),
    }
}
