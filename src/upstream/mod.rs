//! # Upstream Module
//!
//! Thin clients for the two remote systems the search core depends on:
//!
//! - [`music`] - the music catalog API (cloud search, artist and album detail,
//!   stream url, lyric, new-song feed)
//! - [`completion`] - a chat-style text-completion API used to expand free
//!   text into song names
//!
//! Both are exposed as traits so the planner, the expander and the resolver
//! can be driven by stub implementations in tests. The HTTP implementations
//! issue exactly one request per call: no retries and no caching.
//!
//! A music API response that arrives is handed back verbatim even when the
//! HTTP status is not 2xx; the payload's own `code` field is what callers
//! inspect. Only transport failures (DNS, timeout, reset, unreadable JSON)
//! become [`UpstreamError::Transport`](crate::error::UpstreamError).

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{SearchError, UpstreamError};

pub mod completion;
pub mod music;

pub use completion::HttpCompletionApi;
pub use music::HttpMusicApi;

/// Success marker of the music API's in-body `code` field.
pub const SUCCESS_CODE: i64 = 200;

/// Fails with [`SearchError::UpstreamBusiness`] unless the payload reports
/// `code == 200`. A payload without a numeric code counts as a failure.
pub fn ensure_success(payload: &Value) -> Result<(), SearchError> {
    match payload.get("code").and_then(Value::as_i64) {
        Some(SUCCESS_CODE) => Ok(()),
        code => Err(SearchError::business(
            code.unwrap_or_default(),
            payload
                .get("message")
                .or_else(|| payload.get("msg"))
                .and_then(Value::as_str)
                .unwrap_or_default(),
        )),
    }
}

/// `type` parameter of the cloud search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    Song,
    Album,
    Artist,
}

impl SearchType {
    pub fn code(self) -> u32 {
        match self {
            SearchType::Song => 1,
            SearchType::Album => 10,
            SearchType::Artist => 100,
        }
    }
}

#[async_trait]
pub trait MusicApi: Send + Sync {
    async fn cloudsearch(
        &self,
        keywords: &str,
        kind: SearchType,
        limit: usize,
    ) -> Result<Value, UpstreamError>;

    /// Artist detail with its hot songs.
    async fn artist_detail(&self, id: &str) -> Result<Value, UpstreamError>;

    /// Album detail with its track list.
    async fn album_detail(&self, id: &str) -> Result<Value, UpstreamError>;

    async fn song_url(&self, id: &str) -> Result<Value, UpstreamError>;

    async fn lyric(&self, id: &str) -> Result<Value, UpstreamError>;

    async fn new_songs(&self) -> Result<Value, UpstreamError>;
}

#[async_trait]
pub trait CompletionApi: Send + Sync {
    /// Sends one prompt and returns the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String, UpstreamError>;
}
