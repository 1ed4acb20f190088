//! Transport error taxonomy
//!
//! Every failure is terminal for its attempt: nothing is retried, and the
//! caller's in-progress state stays intact so the operator can correct and
//! resubmit.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

/// Errors surfaced by the forms API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or expired credential; the session must re-authenticate.
    #[error("authentication required or session expired")]
    Unauthorized,

    /// The credential is valid but does not grant this operation.
    #[error("not permitted to access this resource")]
    Forbidden,

    /// The addressed form or response does not exist.
    #[error("resource not found")]
    NotFound,

    /// Server-side validation rejection (HTTP 400) with per-field detail.
    #[error("validation failed: {}", validation_summary(.field_errors, .detail))]
    Validation {
        field_errors: BTreeMap<String, Vec<String>>,
        detail: Option<String>,
    },

    /// Server-side failure (HTTP 5xx).
    #[error("server error: {0}")]
    Server(String),

    /// The request never completed.
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Per-field messages concatenated for display, one line per field.
    pub fn field_messages(&self) -> Vec<String> {
        match self {
            Self::Validation { field_errors, .. } => field_errors
                .iter()
                .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Build the right error for an HTTP status + raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            400 => parse_validation_body(body),
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            500..=599 => Self::Server(format!("HTTP {}", status)),
            other => Self::Server(format!("unexpected HTTP {}", other)),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

fn validation_summary(
    field_errors: &BTreeMap<String, Vec<String>>,
    detail: &Option<String>,
) -> String {
    if field_errors.is_empty() {
        detail.clone().unwrap_or_else(|| "invalid data".into())
    } else {
        field_errors
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Known shapes of a 400 body: `{detail}`, `{message}`, `{errors: {..}}`,
/// `{non_field_errors: [..]}`, or a bare field→messages map.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<BTreeMap<String, Vec<String>>>,
    #[serde(default)]
    non_field_errors: Option<Vec<String>>,
}

fn parse_validation_body(body: &str) -> ApiError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    let mut field_errors = parsed.errors.unwrap_or_default();
    let mut detail = parsed.detail.or(parsed.message);

    if let Some(non_field) = parsed.non_field_errors {
        if !non_field.is_empty() {
            detail = Some(non_field.join(", "));
        }
    }

    // Backends also reply with the field map at the top level.
    if field_errors.is_empty() {
        if let Ok(serde_json::Value::Object(map)) =
            serde_json::from_str::<serde_json::Value>(body)
        {
            for (key, value) in map {
                if matches!(
                    key.as_str(),
                    "detail" | "message" | "errors" | "non_field_errors"
                ) {
                    continue;
                }
                match value {
                    serde_json::Value::Array(items) => {
                        let messages: Vec<String> = items
                            .into_iter()
                            .filter_map(|item| item.as_str().map(str::to_string))
                            .collect();
                        if !messages.is_empty() {
                            field_errors.insert(key, messages);
                        }
                    }
                    serde_json::Value::String(message) => {
                        field_errors.insert(key, vec![message]);
                    }
                    _ => {}
                }
            }
        }
    }

    ApiError::Validation {
        field_errors,
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            ApiError::from_status(401, ""),
            ApiError::Unauthorized
        ));
        assert!(matches!(ApiError::from_status(403, ""), ApiError::Forbidden));
        assert!(matches!(ApiError::from_status(404, ""), ApiError::NotFound));
        assert!(matches!(
            ApiError::from_status(500, ""),
            ApiError::Server(_)
        ));
    }

    #[test]
    fn test_wrapped_field_errors() {
        let body = r#"{"errors": {"title": ["required"], "fields": ["too short", "bad"]}}"#;
        let err = ApiError::from_status(400, body);
        let messages = err.field_messages();
        assert_eq!(messages.len(), 2);
        assert!(messages.contains(&"title: required".to_string()));
        assert!(messages.contains(&"fields: too short, bad".to_string()));
    }

    #[test]
    fn test_bare_field_map() {
        let body = r#"{"entity_name": ["This field is required."]}"#;
        let err = ApiError::from_status(400, body);
        assert_eq!(
            err.field_messages(),
            vec!["entity_name: This field is required.".to_string()]
        );
    }

    #[test]
    fn test_detail_only_body() {
        let err = ApiError::from_status(400, r#"{"detail": "malformed"}"#);
        match err {
            ApiError::Validation {
                field_errors,
                detail,
            } => {
                assert!(field_errors.is_empty());
                assert_eq!(detail.as_deref(), Some("malformed"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_field_errors() {
        let err = ApiError::from_status(400, r#"{"non_field_errors": ["form is closed"]}"#);
        match err {
            ApiError::Validation { detail, .. } => {
                assert_eq!(detail.as_deref(), Some("form is closed"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_body() {
        let err = ApiError::from_status(400, "<html>");
        match err {
            ApiError::Validation {
                field_errors,
                detail,
            } => {
                assert!(field_errors.is_empty());
                assert!(detail.is_none());
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
