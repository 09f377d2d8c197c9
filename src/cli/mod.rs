//! # CLI Module
//!
//! Command implementations behind the `melosearch` binary.
//!
//! - [`serve`] - starts the HTTP server with settings from the environment
//! - [`search`] - runs a single query of any kind and prints it as tables
//!   (or as the raw response envelope with `--json`)
//! - [`list_favorites`], [`add_favorite`], [`remove_favorite`] - manage the
//!   favorites file that seeds the `guess` query
//!
//! Commands report through the crate's `info!` / `success!` / `warning!`
//! macros and terminate with `error!` on unrecoverable failures.
//!
//! ```bash
//! melosearch serve --addr 0.0.0.0:8000
//! melosearch search title 晴天 --page 2 --page-size 10
//! melosearch search mood "rainy sunday afternoon"
//! melosearch favorites add alice 晴天
//! melosearch search guess --user alice
//! ```

mod favorites;
mod search;
mod serve;

pub use favorites::add_favorite;
pub use favorites::list_favorites;
pub use favorites::remove_favorite;
pub use search::params_for;
pub use search::search;
pub use serve::serve;
