use std::{collections::BTreeMap, path::PathBuf};

use async_trait::async_trait;

/// Read access to a user's favorite songs.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Favorite song names of `user`, in the order they were added.
    async fn list_favorite_song_names(&self, user: &str) -> Result<Vec<String>, String>;
}

/// Favorites kept in a JSON file mapping user names to song names.
///
/// ```json
/// { "alice": ["晴天", "七里香"] }
/// ```
pub struct FavoritesManager {
    path: PathBuf,
}

impl FavoritesManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Loads the whole file. A missing file is an empty store.
    pub async fn load(&self) -> Result<BTreeMap<String, Vec<String>>, String> {
        let exists = async_fs::metadata(&self.path)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !exists {
            return Ok(BTreeMap::new());
        }
        let content = async_fs::read_to_string(&self.path)
            .await
            .map_err(|e| e.to_string())?;
        serde_json::from_str(&content).map_err(|e| e.to_string())
    }

    pub async fn persist(&self, favorites: &BTreeMap<String, Vec<String>>) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(favorites).map_err(|e| e.to_string())?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Appends `song` to the user's favorites unless it is already there.
    /// Returns whether the song was added.
    pub async fn add_favorite(&self, user: &str, song: &str) -> Result<bool, String> {
        let mut favorites = self.load().await?;
        let songs = favorites.entry(user.to_string()).or_default();
        if songs.iter().any(|s| s == song) {
            return Ok(false);
        }
        songs.push(song.to_string());
        self.persist(&favorites).await?;
        Ok(true)
    }

    /// Removes `song` from the user's favorites. Returns whether it was present.
    pub async fn remove_favorite(&self, user: &str, song: &str) -> Result<bool, String> {
        let mut favorites = self.load().await?;
        let Some(songs) = favorites.get_mut(user) else {
            return Ok(false);
        };
        let before = songs.len();
        songs.retain(|s| s != song);
        if songs.len() == before {
            return Ok(false);
        }
        self.persist(&favorites).await?;
        Ok(true)
    }
}

#[async_trait]
impl FavoritesStore for FavoritesManager {
    async fn list_favorite_song_names(&self, user: &str) -> Result<Vec<String>, String> {
        let mut favorites = self.load().await?;
        Ok(favorites.remove(user).unwrap_or_default())
    }
}
