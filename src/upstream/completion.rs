use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use serde_json::{Value, json};

use crate::{config::CompletionSettings, error::UpstreamError, upstream::CompletionApi};

/// Chat-completions style client.
///
/// Sends `{model, messages: [{role: "user", content}]}` and reads the text of
/// the first choice. Unlike the music API, a non-2xx status is a failure.
#[derive(Debug, Clone)]
pub struct HttpCompletionApi {
    client: Client,
    settings: CompletionSettings,
}

impl HttpCompletionApi {
    pub fn new(settings: CompletionSettings) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .default_headers(fixed_headers())
            .build()
            .map_err(|e| UpstreamError::Completion(e.to_string()))?;
        Ok(Self { client, settings })
    }
}

fn fixed_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("melosearch/", env!("CARGO_PKG_VERSION"))),
    );
    headers
}

/// Pulls the completion text out of a chat or legacy completion body.
pub fn completion_text(body: &Value) -> Option<String> {
    let choice = body.get("choices")?.as_array()?.first()?;
    choice
        .pointer("/message/content")
        .or_else(|| choice.get("text"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[async_trait]
impl CompletionApi for HttpCompletionApi {
    async fn complete(&self, prompt: &str) -> Result<String, UpstreamError> {
        let body = json!({
            "model": self.settings.model,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let mut request = self.client.post(&self.settings.url).json(&body);
        if let Some(key) = &self.settings.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| UpstreamError::Completion(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Completion(format!(
                "status {}: {}",
                status, detail
            )));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| UpstreamError::Completion(e.to_string()))?;

        completion_text(&json)
            .ok_or_else(|| UpstreamError::Completion("malformed completion body".to_string()))
    }
}
