mod favorites;

pub use favorites::FavoritesManager;
pub use favorites::FavoritesStore;
