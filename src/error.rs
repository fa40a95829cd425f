// Gateway error taxonomy
//
// Every failure is produced as a typed variant at the point it occurs and
// mapped to an HTTP status in a single lookup. All error responses share the
// same JSON envelope shape.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required upstream credential is missing from the environment.
    #[error("{0} API key is not configured")]
    NotConfigured(&'static str),

    /// The upstream rejected the configured credential (401/403).
    #[error("{api} API rejected the configured key: {status}")]
    Unauthorized {
        api: &'static str,
        status: u16,
        body: String,
    },

    /// The inbound request body could not be understood.
    #[error("invalid request: {0}")]
    BadRequest(String),

    /// Unrecognized dispatch key.
    #[error("invalid action: {0:?}")]
    InvalidAction(String),

    /// Upstream answered with a non-success status other than 401/403.
    #[error("{api} API error: {status}")]
    Upstream {
        api: &'static str,
        status: u16,
        body: String,
    },

    /// The outbound call never completed.
    #[error("request to {api} API failed: {source}")]
    Network {
        api: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered successfully but the reply held no parseable array.
    #[error("failed to interpret the generated playlist")]
    Interpretation { reply: String },
}

impl GatewayError {
    /// Classify a non-success upstream status at the point of failure.
    pub fn from_upstream(api: &'static str, status: u16, body: String) -> Self {
        match status {
            401 | 403 => GatewayError::Unauthorized { api, status, body },
            _ => GatewayError::Upstream { api, status, body },
        }
    }

    pub fn network(api: &'static str, source: reqwest::Error) -> Self {
        GatewayError::Network { api, source }
    }

    /// The one place an error kind turns into an HTTP status.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            GatewayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::InvalidAction(_)
            | GatewayError::Upstream { .. }
            | GatewayError::Network { .. }
            | GatewayError::Interpretation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Extra context for the envelope's `details` field, when there is any.
    fn details(&self) -> Option<String> {
        match self {
            GatewayError::Unauthorized { body, .. } | GatewayError::Upstream { body, .. } => {
                (!body.is_empty()).then(|| body.clone())
            }
            GatewayError::Network { source, .. } => Some(source.to_string()),
            GatewayError::Interpretation { reply } => {
                (!reply.is_empty()).then(|| reply.clone())
            }
            _ => None,
        }
    }
}

/// JSON body shared by every failure response.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub timestamp: String,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let envelope = ErrorEnvelope {
            error: self.to_string(),
            details: self.details(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        (status, Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            GatewayError::NotConfigured("YouTube").status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            GatewayError::from_upstream("YouTube", 403, String::new()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            GatewayError::from_upstream("Gemini", 401, String::new()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            GatewayError::from_upstream("Gemini", 429, String::new()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GatewayError::BadRequest("no body".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            GatewayError::InvalidAction("deletePlaylist".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GatewayError::Interpretation {
                reply: String::new()
            }
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_envelope_skips_empty_details() {
        let err = GatewayError::NotConfigured("Gemini");
        let envelope = ErrorEnvelope {
            error: err.to_string(),
            details: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        let json = serde_json::to_string(&envelope).unwrap();
        assert!(json.contains("Gemini API key is not configured"));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_upstream_body_becomes_details() {
        let err = GatewayError::from_upstream("YouTube", 500, "quota exceeded".to_string());
        assert_eq!(err.details().as_deref(), Some("quota exceeded"));
    }
}
