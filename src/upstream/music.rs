use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT},
};
use serde_json::Value;

use crate::{
    config::MusicEndpoints,
    error::UpstreamError,
    upstream::{MusicApi, SearchType},
};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"),
    );
    headers.insert(ORIGIN, HeaderValue::from_static("https://music.163.com"));
    headers.insert(REFERER, HeaderValue::from_static("https://music.163.com/"));
    headers
}

/// Music catalog client over HTTP.
///
/// Cheap to clone; the inner `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct HttpMusicApi {
    client: Client,
    endpoints: MusicEndpoints,
}

impl HttpMusicApi {
    pub fn new(endpoints: MusicEndpoints) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .default_headers(browser_headers())
            .build()?;
        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &MusicEndpoints {
        &self.endpoints
    }

    async fn get(&self, url: &str, params: &[(&str, String)]) -> Result<Value, UpstreamError> {
        let response = self.client.get(url).query(params).send().await?;
        // status is not checked here: the payload carries its own `code`
        let json = response.json::<Value>().await?;
        Ok(json)
    }
}

#[async_trait]
impl MusicApi for HttpMusicApi {
    async fn cloudsearch(
        &self,
        keywords: &str,
        kind: SearchType,
        limit: usize,
    ) -> Result<Value, UpstreamError> {
        self.get(
            &self.endpoints.cloudsearch,
            &[
                ("keywords", keywords.to_string()),
                ("type", kind.code().to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    async fn artist_detail(&self, id: &str) -> Result<Value, UpstreamError> {
        self.get(&self.endpoints.artist, &[("id", id.to_string())])
            .await
    }

    async fn album_detail(&self, id: &str) -> Result<Value, UpstreamError> {
        self.get(&self.endpoints.album, &[("id", id.to_string())])
            .await
    }

    async fn song_url(&self, id: &str) -> Result<Value, UpstreamError> {
        self.get(&self.endpoints.song_url, &[("id", id.to_string())])
            .await
    }

    async fn lyric(&self, id: &str) -> Result<Value, UpstreamError> {
        self.get(&self.endpoints.lyric, &[("id", id.to_string())])
            .await
    }

    async fn new_songs(&self) -> Result<Value, UpstreamError> {
        self.get(&self.endpoints.new_songs, &[]).await
    }
}
