use crate::{config, error, info, management::FavoritesManager, success, warning};

pub async fn list_favorites(user: String) {
    let manager = FavoritesManager::new(config::favorites_path());
    let favorites = match manager.load().await {
        Ok(f) => f,
        Err(e) => error!("Failed to load favorites. Err: {}", e),
    };

    match favorites.get(&user) {
        Some(songs) if !songs.is_empty() => {
            for (i, song) in songs.iter().enumerate() {
                info!("{:>3}. {}", i + 1, song);
            }
        }
        _ => warning!("{} has no favorite songs yet.", user),
    }
}

pub async fn add_favorite(user: String, song: String) {
    let manager = FavoritesManager::new(config::favorites_path());
    match manager.add_favorite(&user, &song).await {
        Ok(true) => success!("Added '{}' to {}'s favorites", song, user),
        Ok(false) => warning!("'{}' is already a favorite of {}", song, user),
        Err(e) => error!("Failed to update favorites. Err: {}", e),
    }
}

pub async fn remove_favorite(user: String, song: String) {
    let manager = FavoritesManager::new(config::favorites_path());
    match manager.remove_favorite(&user, &song).await {
        Ok(true) => success!("Removed '{}' from {}'s favorites", song, user),
        Ok(false) => warning!("'{}' is not a favorite of {}", song, user),
        Err(e) => error!("Failed to update favorites. Err: {}", e),
    }
}
