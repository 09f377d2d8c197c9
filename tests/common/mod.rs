#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use serde_json::{Value, json};

use melosearch::{
    config::Settings,
    error::UpstreamError,
    management::FavoritesStore,
    planner::SearchService,
    upstream::{CompletionApi, MusicApi, SearchType},
};

pub fn song_json(id: i64, name: &str, artist: &str, album: &str) -> Value {
    json!({
        "name": name,
        "id": id,
        "ar": [{ "id": id * 10, "name": artist, "tns": [], "alias": [] }],
        "al": { "id": id * 100, "name": album, "picUrl": "http://test.jpg", "tns": [] },
        "publishTime": 1640995200000i64
    })
}

pub fn song_search(songs: Vec<Value>) -> Value {
    let count = songs.len();
    json!({ "code": 200, "result": { "songs": songs, "songCount": count } })
}

fn transport(msg: &str) -> Result<Value, UpstreamError> {
    Err(UpstreamError::Transport(msg.to_string()))
}

/// Music API double answering from canned payloads.
pub struct StubMusic {
    searches: HashMap<String, Result<Value, UpstreamError>>,
    artist: Result<Value, UpstreamError>,
    album: Result<Value, UpstreamError>,
    song_url: Result<Value, UpstreamError>,
    lyric: Result<Value, UpstreamError>,
    new_songs: Result<Value, UpstreamError>,
    pub calls: AtomicUsize,
    pub searched: Mutex<Vec<(String, SearchType, usize)>>,
}

impl StubMusic {
    pub fn new() -> Self {
        Self {
            searches: HashMap::new(),
            artist: transport("artist not stubbed"),
            album: transport("album not stubbed"),
            song_url: transport("song url not stubbed"),
            lyric: transport("lyric not stubbed"),
            new_songs: transport("new songs not stubbed"),
            calls: AtomicUsize::new(0),
            searched: Mutex::new(Vec::new()),
        }
    }

    pub fn with_search(mut self, keyword: &str, payload: Value) -> Self {
        self.searches.insert(keyword.to_string(), Ok(payload));
        self
    }

    pub fn with_search_error(mut self, keyword: &str, msg: &str) -> Self {
        self.searches.insert(keyword.to_string(), transport(msg));
        self
    }

    pub fn with_artist(mut self, payload: Value) -> Self {
        self.artist = Ok(payload);
        self
    }

    pub fn with_album(mut self, payload: Value) -> Self {
        self.album = Ok(payload);
        self
    }

    pub fn with_playback(mut self, song_url: Value, lyric: Value) -> Self {
        self.song_url = Ok(song_url);
        self.lyric = Ok(lyric);
        self
    }

    pub fn with_lyric(mut self, payload: Value) -> Self {
        self.lyric = Ok(payload);
        self
    }

    pub fn with_new_songs(mut self, payload: Value) -> Self {
        self.new_songs = Ok(payload);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl MusicApi for StubMusic {
    async fn cloudsearch(
        &self,
        keywords: &str,
        kind: SearchType,
        limit: usize,
    ) -> Result<Value, UpstreamError> {
        self.hit();
        self.searched
            .lock()
            .unwrap()
            .push((keywords.to_string(), kind, limit));
        self.searches
            .get(keywords)
            .cloned()
            .unwrap_or_else(|| Ok(song_search(Vec::new())))
    }

    async fn artist_detail(&self, _id: &str) -> Result<Value, UpstreamError> {
        self.hit();
        self.artist.clone()
    }

    async fn album_detail(&self, _id: &str) -> Result<Value, UpstreamError> {
        self.hit();
        self.album.clone()
    }

    async fn song_url(&self, _id: &str) -> Result<Value, UpstreamError> {
        self.hit();
        self.song_url.clone()
    }

    async fn lyric(&self, _id: &str) -> Result<Value, UpstreamError> {
        self.hit();
        self.lyric.clone()
    }

    async fn new_songs(&self) -> Result<Value, UpstreamError> {
        self.hit();
        self.new_songs.clone()
    }
}

/// Completion API double returning one fixed reply.
pub struct StubCompletion {
    reply: Result<String, UpstreamError>,
    pub prompts: Mutex<Vec<String>>,
}

impl StubCompletion {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            reply: Err(UpstreamError::Completion(msg.to_string())),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CompletionApi for StubCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, UpstreamError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}

#[derive(Default)]
pub struct StubFavorites(pub HashMap<String, Vec<String>>);

impl StubFavorites {
    pub fn with(mut self, user: &str, songs: &[&str]) -> Self {
        self.0.insert(
            user.to_string(),
            songs.iter().map(|s| s.to_string()).collect(),
        );
        self
    }
}

#[async_trait]
impl FavoritesStore for StubFavorites {
    async fn list_favorite_song_names(&self, user: &str) -> Result<Vec<String>, String> {
        Ok(self.0.get(user).cloned().unwrap_or_default())
    }
}

pub fn service_with(
    music: Arc<StubMusic>,
    completion: Arc<StubCompletion>,
    favorites: StubFavorites,
) -> SearchService {
    SearchService::new(music, completion, Arc::new(favorites), &Settings::default())
}

pub fn music_only(music: Arc<StubMusic>) -> SearchService {
    service_with(
        music,
        Arc::new(StubCompletion::failing("completion not stubbed")),
        StubFavorites::default(),
    )
}
