//! HTTP API dispatch and response envelope.
//!
//! Framework-agnostic: accepts `ApiRequest`, returns a `ResponseBody`
//! envelope. The server entry point in `src/main.rs` adapts axum types
//! to/from these and calls `handle`.

mod handlers;

use crate::upstream::Upstream;
use serde::Serialize;
use std::sync::Arc;

// ============================================================================
// Request type
// ============================================================================

pub struct ApiRequest {
    pub method: String,
    pub path: String,
    pub body: Option<String>,
}

// ============================================================================
// Response envelope
// ============================================================================

/// The envelope every response is wrapped in: `statusCode` is always present,
/// the other fields are omitted when unset.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseBody {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Static error envelopes. These are templates: customizing one (e.g. with
/// [`ResponseBody::with_error`]) copies it rather than mutating shared state.
pub const NOT_FOUND: ResponseBody = ResponseBody {
    status_code: 404,
    body: Some("This API endpoint is not found"),
    items: None,
    error: None,
};

pub const BAD_REQUEST: ResponseBody = ResponseBody {
    status_code: 400,
    body: Some("Invalid request body is provided"),
    items: None,
    error: None,
};

pub const INTERNAL_SERVER_ERROR: ResponseBody = ResponseBody {
    status_code: 500,
    body: Some("An internal server occured"),
    items: None,
    error: None,
};

impl ResponseBody {
    /// Attach a specific validation message to an error template.
    pub fn with_error(self, message: String) -> Self {
        Self {
            error: Some(message),
            ..self
        }
    }
}

/// Wrap a successful payload in a 200 envelope. An encoding failure is logged
/// and degraded to the generic internal error.
pub fn ok_response(payload: &impl Serialize) -> ResponseBody {
    match serde_json::to_value(payload) {
        Ok(items) => ResponseBody {
            status_code: 200,
            body: None,
            items: Some(items),
            error: None,
        },
        Err(err) => {
            tracing::error!(error = %err, "failed to encode response items");
            INTERNAL_SERVER_ERROR
        }
    }
}

// ============================================================================
// Application state
// ============================================================================

pub struct AppState<U> {
    pub(crate) upstream: Arc<U>,
}

impl<U> AppState<U> {
    pub fn new(upstream: Arc<U>) -> Self {
        Self { upstream }
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Route a request to its handler. The route table is the single source of
/// method checks; anything unmatched gets the 404 envelope.
pub async fn handle<U: Upstream>(request: &ApiRequest, state: &Arc<AppState<U>>) -> ResponseBody {
    match (request.method.as_str(), request.path.as_str()) {
        ("GET", "/top-posts") => handlers::top_posts(state).await,
        ("POST", "/filtered-comments") => {
            handlers::filtered_comments(state, request.body.as_deref()).await
        }
        _ => NOT_FOUND,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelopes_omit_unset_fields() {
        let json = serde_json::to_value(NOT_FOUND).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "statusCode": 404,
                "body": "This API endpoint is not found",
            })
        );
    }

    #[test]
    fn with_error_copies_the_template() {
        let customized = BAD_REQUEST.with_error("boom".to_string());

        assert_eq!(customized.error.as_deref(), Some("boom"));
        // the template itself is untouched
        assert!(BAD_REQUEST.error.is_none());
    }

    #[test]
    fn ok_response_carries_items_only() {
        let resp = ok_response(&vec![1, 2, 3]);
        let json = serde_json::to_value(resp).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "statusCode": 200,
                "items": [1, 2, 3],
            })
        );
    }
}
