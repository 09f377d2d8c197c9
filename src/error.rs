//! Error taxonomy of the search core and its fixed envelope mapping.

use axum::http::StatusCode;
use thiserror::Error;

/// Failure talking to one of the upstream APIs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UpstreamError {
    /// Network, HTTP or decoding failure of the music catalog API.
    #[error("API call failed: {0}")]
    Transport(String),

    /// The text-completion call failed (network, non-2xx status or unreadable body).
    #[error("completion call failed: {0}")]
    Completion(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        UpstreamError::Transport(err.to_string())
    }
}

/// Terminal failure of a query, already classified for the envelope.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// A required parameter is missing, empty or malformed.
    #[error("{0}")]
    Validation(String),

    /// The upstream answered but its own `code` is not the success marker.
    #[error("failed")]
    UpstreamBusiness { code: i64, message: String },

    /// A network-level failure against the music catalog API.
    #[error("search error: {0}")]
    UpstreamTransport(String),

    /// The text-completion step failed as a whole.
    #[error("AI search failed: {0}")]
    Expansion(String),

    /// Any other unexpected processing failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SearchError {
    pub fn validation(message: impl Into<String>) -> Self {
        SearchError::Validation(message.into())
    }

    /// Business failure for an upstream payload carrying `code`.
    pub fn business(code: i64, message: impl Into<String>) -> Self {
        SearchError::UpstreamBusiness {
            code,
            message: message.into(),
        }
    }

    /// The `code` field placed inside the response body.
    pub fn envelope_code(&self) -> u16 {
        match self {
            SearchError::Validation(_) | SearchError::UpstreamBusiness { .. } => 403,
            SearchError::UpstreamTransport(_)
            | SearchError::Expansion(_)
            | SearchError::Internal(_) => 500,
        }
    }

    /// The outer HTTP status of the response.
    pub fn http_status(&self) -> StatusCode {
        match self {
            SearchError::Validation(_) | SearchError::UpstreamBusiness { .. } => {
                StatusCode::BAD_REQUEST
            }
            SearchError::UpstreamTransport(_)
            | SearchError::Expansion(_)
            | SearchError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UpstreamError> for SearchError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Transport(msg) => SearchError::UpstreamTransport(msg),
            UpstreamError::Completion(msg) => SearchError::Expansion(msg),
        }
    }
}
