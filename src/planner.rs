//! Query kinds and the upstream call plan behind each of them.
//!
//! Dispatch is a plain `match` on [`QueryKind`]. Each kind validates its one
//! required input, issues its upstream call (or the completion + fan-out
//! sequence for the AI-driven kinds) and returns normalized data. Nothing is
//! cached between calls.

use std::{collections::HashMap, sync::Arc};

use clap::ValueEnum;
use serde_json::Value;

use crate::{
    config::{FanOut, Settings},
    error::{SearchError, UpstreamError},
    expander::{ExpansionMode, Expander},
    management::{FavoritesManager, FavoritesStore},
    normalize::{
        AlbumShape, ArtistShape, SongShape, normalize_album, normalize_artist, normalize_songs,
    },
    resolver::Resolver,
    types::{AlbumDetail, ArtistDetail, SearchData, SearchOutcome, SongPlayback},
    upstream::{
        CompletionApi, HttpCompletionApi, HttpMusicApi, MusicApi, SearchType, ensure_success,
    },
    utils, warning,
};

/// Rows requested from the cloud search before local pagination.
pub const KEYWORD_FETCH_LIMIT: usize = 100;
pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum QueryKind {
    #[value(name = "title")]
    ByTitle,
    #[value(name = "artist")]
    ByArtistName,
    #[value(name = "album")]
    ByAlbumName,
    #[value(name = "artist-id")]
    ByArtistId,
    #[value(name = "album-id")]
    ByAlbumId,
    #[value(name = "song-id")]
    BySongId,
    #[value(name = "new")]
    NewReleases,
    #[value(name = "describe")]
    ByFreeText,
    #[value(name = "mood")]
    ByMood,
    #[value(name = "guess")]
    BySimilarity,
    #[value(name = "related")]
    ByRelatedTitle,
}

impl QueryKind {
    pub const ALL: [QueryKind; 11] = [
        QueryKind::ByTitle,
        QueryKind::ByArtistName,
        QueryKind::ByAlbumName,
        QueryKind::ByArtistId,
        QueryKind::ByAlbumId,
        QueryKind::BySongId,
        QueryKind::NewReleases,
        QueryKind::ByFreeText,
        QueryKind::ByMood,
        QueryKind::BySimilarity,
        QueryKind::ByRelatedTitle,
    ];

    /// HTTP route serving this kind.
    pub fn path(self) -> &'static str {
        match self {
            QueryKind::ByTitle => "/search/bytitle/",
            QueryKind::ByArtistName => "/search/byartist/",
            QueryKind::ByAlbumName => "/search/byalbum/",
            QueryKind::ByArtistId => "/search/byartistsong/",
            QueryKind::ByAlbumId => "/search/byalbumsong/",
            QueryKind::BySongId => "/search/bysong/",
            QueryKind::NewReleases => "/search/newsong/",
            QueryKind::ByFreeText => "/search/bydesc/",
            QueryKind::ByMood => "/search/byspirit/",
            QueryKind::BySimilarity => "/search/guess/",
            QueryKind::ByRelatedTitle => "/search/related/",
        }
    }

    /// Query parameter holding the required input, if the kind takes one
    /// from the query string.
    pub fn required_param(self) -> Option<&'static str> {
        match self {
            QueryKind::ByTitle | QueryKind::ByArtistName | QueryKind::ByAlbumName => {
                Some("keyword")
            }
            QueryKind::ByArtistId | QueryKind::ByAlbumId | QueryKind::BySongId => Some("id"),
            QueryKind::ByFreeText => Some("describe"),
            QueryKind::ByMood => Some("spirit"),
            QueryKind::ByRelatedTitle => Some("title"),
            QueryKind::NewReleases | QueryKind::BySimilarity => None,
        }
    }

    fn missing_message(self) -> &'static str {
        match self {
            QueryKind::ByTitle | QueryKind::ByArtistName | QueryKind::ByAlbumName => {
                "please enter a search keyword"
            }
            QueryKind::ByArtistId => "please enter an artist id",
            QueryKind::ByAlbumId => "please enter an album id",
            QueryKind::BySongId => "please enter a song id",
            QueryKind::ByFreeText => "please enter a description",
            QueryKind::ByMood => "please describe your mood",
            QueryKind::ByRelatedTitle => "please enter a song title",
            QueryKind::NewReleases | QueryKind::BySimilarity => "missing parameter",
        }
    }

    pub fn expansion_mode(self) -> Option<ExpansionMode> {
        match self {
            QueryKind::ByFreeText => Some(ExpansionMode::Describe),
            QueryKind::ByMood => Some(ExpansionMode::Mood),
            QueryKind::BySimilarity => Some(ExpansionMode::Similar),
            QueryKind::ByRelatedTitle => Some(ExpansionMode::Related),
            _ => None,
        }
    }

    /// Short name, as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            QueryKind::ByTitle => "title",
            QueryKind::ByArtistName => "artist",
            QueryKind::ByAlbumName => "album",
            QueryKind::ByArtistId => "artist-id",
            QueryKind::ByAlbumId => "album-id",
            QueryKind::BySongId => "song-id",
            QueryKind::NewReleases => "new",
            QueryKind::ByFreeText => "describe",
            QueryKind::ByMood => "mood",
            QueryKind::BySimilarity => "guess",
            QueryKind::ByRelatedTitle => "related",
        }
    }
}

/// Plain string key/value parameters of one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams(HashMap<String, String>);

impl SearchParams {
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// The trimmed value of `key`, or `None` when missing or blank.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, kind: QueryKind) -> Result<&str, SearchError> {
        kind.required_param()
            .and_then(|key| self.get(key))
            .ok_or_else(|| SearchError::validation(kind.missing_message()))
    }

    fn positive(&self, key: &str, default: usize) -> Result<usize, SearchError> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(n),
                _ => Err(SearchError::validation(format!(
                    "{} must be a positive integer",
                    key
                ))),
            },
        }
    }

    /// `page_wanted` and `page_size`, defaulting to page 1 of 20.
    pub fn page(&self) -> Result<(usize, usize), SearchError> {
        Ok((
            self.positive("page_wanted", DEFAULT_PAGE)?,
            self.positive("page_size", DEFAULT_PAGE_SIZE)?,
        ))
    }
}

impl From<HashMap<String, String>> for SearchParams {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

/// Per-mode fan-out parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanOutTable {
    pub describe: FanOut,
    pub mood: FanOut,
    pub similar: FanOut,
    pub related: FanOut,
}

impl FanOutTable {
    pub fn for_mode(&self, mode: ExpansionMode) -> FanOut {
        match mode {
            ExpansionMode::Describe => self.describe,
            ExpansionMode::Mood => self.mood,
            ExpansionMode::Similar => self.similar,
            ExpansionMode::Related => self.related,
        }
    }
}

impl From<&Settings> for FanOutTable {
    fn from(settings: &Settings) -> Self {
        Self {
            describe: settings.describe,
            mood: settings.mood,
            similar: settings.similar,
            related: settings.related,
        }
    }
}

/// Executes queries against injected upstream clients.
#[derive(Clone)]
pub struct SearchService {
    music: Arc<dyn MusicApi>,
    expander: Expander,
    resolver: Resolver,
    favorites: Arc<dyn FavoritesStore>,
    fan_out: FanOutTable,
}

impl SearchService {
    pub fn new(
        music: Arc<dyn MusicApi>,
        completion: Arc<dyn CompletionApi>,
        favorites: Arc<dyn FavoritesStore>,
        settings: &Settings,
    ) -> Self {
        Self {
            resolver: Resolver::new(Arc::clone(&music), settings.pool_size),
            expander: Expander::new(completion),
            music,
            favorites,
            fan_out: FanOutTable::from(settings),
        }
    }

    /// Wires the HTTP clients and the file-backed favorites store.
    pub fn from_settings(settings: &Settings) -> Result<Self, UpstreamError> {
        let music = HttpMusicApi::new(settings.music.clone())?;
        let completion = HttpCompletionApi::new(settings.completion.clone())?;
        let favorites = FavoritesManager::new(settings.favorites_path.clone());
        Ok(Self::new(
            Arc::new(music),
            Arc::new(completion),
            Arc::new(favorites),
            settings,
        ))
    }

    pub fn fan_out(&self) -> &FanOutTable {
        &self.fan_out
    }

    /// Runs one query. `user` is the authenticated caller, if any.
    pub async fn run(
        &self,
        kind: QueryKind,
        params: &SearchParams,
        user: Option<&str>,
    ) -> Result<SearchOutcome, SearchError> {
        match kind {
            QueryKind::ByTitle | QueryKind::ByArtistName | QueryKind::ByAlbumName => {
                let keyword = params.required(kind)?;
                let (page, page_size) = params.page()?;
                self.search_keyword(kind, keyword, page, page_size).await
            }
            QueryKind::ByArtistId => {
                let id = params.required(kind)?;
                let (page, page_size) = params.page()?;
                self.artist_songs(id, page, page_size).await
            }
            QueryKind::ByAlbumId => {
                let id = params.required(kind)?;
                let (page, page_size) = params.page()?;
                self.album_songs(id, page, page_size).await
            }
            QueryKind::BySongId => {
                let id = params.required(kind)?;
                self.song_playback(id).await
            }
            QueryKind::NewReleases => self.new_releases().await,
            QueryKind::ByFreeText | QueryKind::ByMood | QueryKind::ByRelatedTitle => {
                let seed = params.required(kind)?;
                self.ai_search(kind, seed).await
            }
            QueryKind::BySimilarity => {
                let seed = self.favorites_seed(user).await?;
                self.ai_search(kind, &seed).await
            }
        }
    }

    async fn search_keyword(
        &self,
        kind: QueryKind,
        keyword: &str,
        page: usize,
        page_size: usize,
    ) -> Result<SearchOutcome, SearchError> {
        let search_type = match kind {
            QueryKind::ByArtistName => SearchType::Artist,
            QueryKind::ByAlbumName => SearchType::Album,
            _ => SearchType::Song,
        };

        let payload = self
            .music
            .cloudsearch(keyword, search_type, KEYWORD_FETCH_LIMIT)
            .await?;
        checked(&payload, kind)?;

        let result = payload.get("result").unwrap_or(&Value::Null);
        let (data, count_key) = match search_type {
            SearchType::Song => {
                let songs = normalize_songs(result, "songs", SongShape::Search);
                (
                    SearchData::Songs(utils::paginate_results(&songs, page, page_size)),
                    "songCount",
                )
            }
            SearchType::Artist => {
                let artists: Vec<_> = rows(result, "artists")
                    .iter()
                    .map(|raw| normalize_artist(raw, ArtistShape::SearchRow))
                    .collect();
                (
                    SearchData::Artists(utils::paginate_results(&artists, page, page_size)),
                    "artistCount",
                )
            }
            SearchType::Album => {
                let albums: Vec<_> = rows(result, "albums")
                    .iter()
                    .map(|raw| normalize_album(raw, AlbumShape::SearchRow))
                    .collect();
                (
                    SearchData::Albums(utils::paginate_results(&albums, page, page_size)),
                    "albumCount",
                )
            }
        };

        // page count follows the upstream total, not the rows fetched
        let total = result.get(count_key).and_then(Value::as_u64).unwrap_or(0) as usize;

        Ok(SearchOutcome {
            data,
            metadata: Some(utils::page_metadata(page, page_size, total)),
        })
    }

    async fn artist_songs(
        &self,
        id: &str,
        page: usize,
        page_size: usize,
    ) -> Result<SearchOutcome, SearchError> {
        let payload = self.music.artist_detail(id).await?;
        checked(&payload, QueryKind::ByArtistId)?;

        let artist = normalize_artist(
            payload.get("artist").unwrap_or(&Value::Null),
            ArtistShape::Detail,
        );
        let songs = normalize_songs(&payload, "hotSongs", SongShape::Search);
        let metadata = utils::page_metadata(page, page_size, songs.len());

        Ok(SearchOutcome {
            data: SearchData::ArtistDetails(vec![ArtistDetail {
                artist,
                songs: utils::paginate_results(&songs, page, page_size),
            }]),
            metadata: Some(metadata),
        })
    }

    async fn album_songs(
        &self,
        id: &str,
        page: usize,
        page_size: usize,
    ) -> Result<SearchOutcome, SearchError> {
        let payload = self.music.album_detail(id).await?;
        checked(&payload, QueryKind::ByAlbumId)?;

        let album = normalize_album(
            payload.get("album").unwrap_or(&Value::Null),
            AlbumShape::Detail,
        );
        let songs = normalize_songs(&payload, "songs", SongShape::Search);
        let metadata = utils::page_metadata(page, page_size, songs.len());

        Ok(SearchOutcome {
            data: SearchData::AlbumDetails(vec![AlbumDetail {
                album,
                songs: utils::paginate_results(&songs, page, page_size),
            }]),
            metadata: Some(metadata),
        })
    }

    /// Stream url and lyric, fetched concurrently. Both must be non-empty.
    async fn song_playback(&self, id: &str) -> Result<SearchOutcome, SearchError> {
        let (song, lyric) = tokio::try_join!(self.music.song_url(id), self.music.lyric(id))?;

        let url = stream_url(&song);
        let lyric = lyric_text(&lyric);
        if url.is_empty() || lyric.is_empty() {
            let code = song.get("code").and_then(Value::as_i64).unwrap_or_default();
            warning!(
                "Song {} is missing its {}",
                id,
                if url.is_empty() { "stream url" } else { "lyric" }
            );
            return Err(SearchError::business(code, "missing stream url or lyric"));
        }

        Ok(SearchOutcome {
            data: SearchData::Playback(SongPlayback {
                id: id.to_string(),
                url,
                lyric,
            }),
            metadata: None,
        })
    }

    async fn new_releases(&self) -> Result<SearchOutcome, SearchError> {
        let payload = self.music.new_songs().await?;
        checked(&payload, QueryKind::NewReleases)?;

        Ok(SearchOutcome {
            data: SearchData::Songs(normalize_songs(&payload, "result", SongShape::Feed)),
            metadata: None,
        })
    }

    async fn favorites_seed(&self, user: Option<&str>) -> Result<String, SearchError> {
        let Some(user) = user.map(str::trim).filter(|u| !u.is_empty()) else {
            return Err(SearchError::validation("please log in first"));
        };

        let names = self
            .favorites
            .list_favorite_song_names(user)
            .await
            .map_err(SearchError::Internal)?;
        if names.is_empty() {
            return Err(SearchError::validation(
                "no favorite songs to base a guess on",
            ));
        }
        Ok(names.join(", "))
    }

    async fn ai_search(&self, kind: QueryKind, seed: &str) -> Result<SearchOutcome, SearchError> {
        let Some(mode) = kind.expansion_mode() else {
            return Err(SearchError::Internal(format!(
                "{} is not an AI-driven query",
                kind.name()
            )));
        };
        let fan_out = self.fan_out.for_mode(mode);

        let candidates = self.expander.expand(seed, mode, fan_out.cap).await?;
        let songs = self
            .resolver
            .resolve(&candidates, fan_out.per_candidate)
            .await;

        Ok(SearchOutcome {
            data: SearchData::Songs(songs),
            metadata: None,
        })
    }
}

fn checked(payload: &Value, kind: QueryKind) -> Result<(), SearchError> {
    ensure_success(payload).inspect_err(|e| {
        if let SearchError::UpstreamBusiness { code, message } = e {
            warning!(
                "Upstream rejected {} query with code {}: {}",
                kind.name(),
                code,
                message
            );
        }
    })
}

fn rows<'a>(raw: &'a Value, key: &str) -> &'a [Value] {
    raw.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// `data.url`, where `data` is either an object or a list of objects.
pub fn stream_url(payload: &Value) -> String {
    let data = match payload.get("data") {
        Some(Value::Array(items)) => items.first(),
        other => other,
    };
    data.and_then(|d| d.get("url"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// `lrc.lyric` of a lyric payload.
pub fn lyric_text(payload: &Value) -> String {
    let lyric = payload
        .pointer("/lrc/lyric")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if lyric.trim().is_empty() {
        String::new()
    } else {
        lyric.to_string()
    }
}
