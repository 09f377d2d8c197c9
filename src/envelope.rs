//! The uniform `{code, message, data, metadata?}` response wrapper.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    error::SearchError,
    types::{PageMetadata, SearchData, SearchOutcome},
};

pub const SUCCESS_MESSAGE: &str = "success";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PageMetadata>,
}

impl<T> Envelope<T> {
    pub fn success(data: T, metadata: Option<PageMetadata>) -> Self {
        Self {
            code: 200,
            message: SUCCESS_MESSAGE.to_string(),
            data: Some(data),
            metadata,
        }
    }

    pub fn failure(err: &SearchError) -> Self {
        Self {
            code: err.envelope_code(),
            message: err.to_string(),
            data: None,
            metadata: None,
        }
    }
}

/// An envelope together with the HTTP status it is sent with.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Envelope<SearchData>,
}

impl Reply {
    pub fn is_success(&self) -> bool {
        self.status == StatusCode::OK
    }
}

/// Maps the terminal result of a query onto status and envelope.
///
/// | Result | body `code` | HTTP |
/// |---|---|---|
/// | success | 200 | 200 |
/// | validation / upstream business failure | 403 | 400 |
/// | transport / expansion / internal failure | 500 | 500 |
pub fn build(result: Result<SearchOutcome, SearchError>) -> Reply {
    match result {
        Ok(outcome) => Reply {
            status: StatusCode::OK,
            body: Envelope::success(outcome.data, outcome.metadata),
        },
        Err(err) => Reply {
            status: err.http_status(),
            body: Envelope::failure(&err),
        },
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
