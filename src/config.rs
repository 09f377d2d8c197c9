//! Configuration management for the search backend.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Every upstream endpoint, the completion
//! credentials and the fan-out parameters are read once into [`Settings`] and
//! injected into the clients at construction time.
//!
//! The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf, str::FromStr};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8000";
pub const DEFAULT_MUSIC_API_URL: &str = "https://apis.netstart.cn/music";
pub const DEFAULT_COMPLETION_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_POOL_SIZE: usize = 8;
pub const DEFAULT_DESCRIBE_CAP: usize = 20;
pub const DEFAULT_SIMILAR_CAP: usize = 10;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives under `melosearch/.env`:
/// - Linux: `~/.local/share/melosearch/.env`
/// - macOS: `~/Library/Application Support/melosearch/.env`
/// - Windows: `%LOCALAPPDATA%/melosearch/.env`
///
/// A missing file is not an error; the defaults and the process environment
/// are enough to run. Variables already set in the environment win.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or if an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    let exists = async_fs::metadata(&path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false);
    if exists {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Returns `<local data dir>/melosearch`.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("melosearch");
    path
}

/// Address the HTTP server binds to, from `SERVER_ADDRESS`.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Base URL of the music catalog API, from `MUSIC_API_URL`.
pub fn music_api_url() -> String {
    env::var("MUSIC_API_URL")
        .unwrap_or_else(|_| DEFAULT_MUSIC_API_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

fn music_endpoint(var: &str, path: &str) -> String {
    env::var(var).unwrap_or_else(|_| format!("{}/{}", music_api_url(), path))
}

pub fn completion_api_url() -> String {
    env::var("COMPLETION_API_URL").unwrap_or_else(|_| DEFAULT_COMPLETION_API_URL.to_string())
}

/// API key for the completion endpoint. An empty or unset key sends no
/// `Authorization` header.
pub fn completion_api_key() -> Option<String> {
    env::var("COMPLETION_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
}

pub fn completion_model() -> String {
    env::var("COMPLETION_MODEL").unwrap_or_else(|_| DEFAULT_COMPLETION_MODEL.to_string())
}

/// Path of the favorites JSON file, from `FAVORITES_PATH`.
pub fn favorites_path() -> PathBuf {
    env::var("FAVORITES_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| data_dir().join("favorites.json"))
}

fn parsed<T: FromStr>(var: &str, default: T) -> Result<T, String> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| format!("{} must be a number, got '{}'", var, raw)),
        Err(_) => Ok(default),
    }
}

/// One URL per upstream capability.
#[derive(Debug, Clone, PartialEq)]
pub struct MusicEndpoints {
    pub cloudsearch: String,
    pub artist: String,
    pub album: String,
    pub song_url: String,
    pub lyric: String,
    pub new_songs: String,
}

impl MusicEndpoints {
    /// Derives every endpoint from one base URL.
    pub fn from_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            cloudsearch: format!("{}/cloudsearch", base),
            artist: format!("{}/artists", base),
            album: format!("{}/album", base),
            song_url: format!("{}/song/url", base),
            lyric: format!("{}/lyric", base),
            new_songs: format!("{}/personalized/newsong", base),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub url: String,
    pub api_key: Option<String>,
    pub model: String,
}

/// Candidate cap and per-candidate result limit of one AI-driven mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanOut {
    pub cap: usize,
    pub per_candidate: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_addr: String,
    pub music: MusicEndpoints,
    pub completion: CompletionSettings,
    pub pool_size: usize,
    pub describe: FanOut,
    pub mood: FanOut,
    pub similar: FanOut,
    pub related: FanOut,
    pub favorites_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_addr: DEFAULT_SERVER_ADDRESS.to_string(),
            music: MusicEndpoints::from_base(DEFAULT_MUSIC_API_URL),
            completion: CompletionSettings {
                url: DEFAULT_COMPLETION_API_URL.to_string(),
                api_key: None,
                model: DEFAULT_COMPLETION_MODEL.to_string(),
            },
            pool_size: DEFAULT_POOL_SIZE,
            describe: FanOut {
                cap: DEFAULT_DESCRIBE_CAP,
                per_candidate: 1,
            },
            mood: FanOut {
                cap: DEFAULT_DESCRIBE_CAP,
                per_candidate: 1,
            },
            similar: FanOut {
                cap: DEFAULT_SIMILAR_CAP,
                per_candidate: 2,
            },
            related: FanOut {
                cap: DEFAULT_SIMILAR_CAP,
                per_candidate: 3,
            },
            favorites_path: data_dir().join("favorites.json"),
        }
    }
}

impl Settings {
    /// Reads the settings from the environment, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error naming the variable when a numeric value does not
    /// parse or when the pool size is zero.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();
        let describe_cap = parsed("DESCRIBE_CANDIDATE_CAP", DEFAULT_DESCRIBE_CAP)?;
        let similar_cap = parsed("SIMILAR_CANDIDATE_CAP", DEFAULT_SIMILAR_CAP)?;
        let pool_size = parsed("FANOUT_POOL_SIZE", DEFAULT_POOL_SIZE)?;
        if pool_size == 0 {
            return Err("FANOUT_POOL_SIZE must be at least 1".to_string());
        }

        Ok(Self {
            server_addr: server_addr(),
            music: MusicEndpoints {
                cloudsearch: music_endpoint("MUSIC_CLOUDSEARCH_URL", "cloudsearch"),
                artist: music_endpoint("MUSIC_ARTIST_URL", "artists"),
                album: music_endpoint("MUSIC_ALBUM_URL", "album"),
                song_url: music_endpoint("MUSIC_SONG_URL", "song/url"),
                lyric: music_endpoint("MUSIC_LYRIC_URL", "lyric"),
                new_songs: music_endpoint("MUSIC_NEWSONG_URL", "personalized/newsong"),
            },
            completion: CompletionSettings {
                url: completion_api_url(),
                api_key: completion_api_key(),
                model: completion_model(),
            },
            pool_size,
            describe: FanOut {
                cap: describe_cap,
                ..defaults.describe
            },
            mood: FanOut {
                cap: describe_cap,
                ..defaults.mood
            },
            similar: FanOut {
                cap: similar_cap,
                ..defaults.similar
            },
            related: FanOut {
                cap: similar_cap,
                ..defaults.related
            },
            favorites_path: favorites_path(),
        })
    }
}
