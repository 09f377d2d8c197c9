use melosearch::management::{FavoritesManager, FavoritesStore};
use tempfile::TempDir;

fn manager(dir: &TempDir) -> FavoritesManager {
    FavoritesManager::new(dir.path().join("nested").join("favorites.json"))
}

#[tokio::test]
async fn test_missing_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let favorites = manager(&dir);

    assert!(favorites.load().await.unwrap().is_empty());
    assert!(
        favorites
            .list_favorite_song_names("alice")
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_add_keeps_order_and_skips_duplicates() {
    let dir = TempDir::new().unwrap();
    let favorites = manager(&dir);

    assert!(favorites.add_favorite("alice", "晴天").await.unwrap());
    assert!(favorites.add_favorite("alice", "七里香").await.unwrap());
    assert!(!favorites.add_favorite("alice", "晴天").await.unwrap());
    assert!(favorites.add_favorite("bob", "稻香").await.unwrap());

    assert!(favorites.path().is_file());
    assert_eq!(
        favorites.list_favorite_song_names("alice").await.unwrap(),
        vec!["晴天", "七里香"]
    );
    assert_eq!(
        favorites.list_favorite_song_names("bob").await.unwrap(),
        vec!["稻香"]
    );
}

#[tokio::test]
async fn test_remove_favorite() {
    let dir = TempDir::new().unwrap();
    let favorites = manager(&dir);
    favorites.add_favorite("alice", "晴天").await.unwrap();

    assert!(!favorites.remove_favorite("bob", "晴天").await.unwrap());
    assert!(!favorites.remove_favorite("alice", "稻香").await.unwrap());
    assert!(favorites.remove_favorite("alice", "晴天").await.unwrap());
    assert!(
        favorites
            .list_favorite_song_names("alice")
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("favorites.json");
    std::fs::write(&path, "not json").unwrap();
    let favorites = FavoritesManager::new(path);

    assert!(favorites.list_favorite_song_names("alice").await.is_err());
}
