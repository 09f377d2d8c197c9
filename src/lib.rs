//! Music Search Aggregation Library
//!
//! This library turns loosely structured music queries (a title, an artist id,
//! a free-text description, a mood, "something like my favorites") into calls
//! against a third-party music catalog API and a text-completion API, and
//! folds the heterogeneous upstream answers into one canonical shape wrapped
//! in a uniform response envelope.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the search endpoints
//! - `cli` - Command-line renderings of the same queries
//! - `config` - Configuration management and environment variables
//! - `envelope` - The `{code, message, data}` response wrapper
//! - `error` - Error taxonomy and its envelope mapping
//! - `expander` - Text-completion driven song-name expansion
//! - `management` - Favorites store backing the "guess" query
//! - `normalize` - Upstream JSON to canonical record mapping
//! - `planner` - Query kinds and their upstream call plans
//! - `resolver` - Concurrent fan-out of candidate names into songs
//! - `server` - HTTP server wiring
//! - `types` - Data structures and type definitions
//! - `upstream` - Music catalog and text-completion API clients
//! - `utils` - Pagination and formatting helpers
//!
//! # Example
//!
//! ```
//! use melosearch::{config, planner::{QueryKind, SearchParams, SearchService}};
//!
//! #[tokio::main]
//! async fn main() -> melosearch::Res<()> {
//!     config::load_env().await?;
//!     let service = SearchService::from_settings(&config::Settings::from_env()?)?;
//!     let params = SearchParams::default().with("keyword", "晴天");
//!     let outcome = service.run(QueryKind::ByTitle, &params, None).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod envelope;
pub mod error;
pub mod expander;
pub mod management;
pub mod normalize;
pub mod planner;
pub mod resolver;
pub mod server;
pub mod types;
pub mod upstream;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the binary and startup seams where errors of several kinds meet.
/// The search core itself returns [`error::SearchError`].
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal startup failures. Request-level failures are turned into
/// envelopes and never reach this macro.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recovered failures: a single fan-out candidate that could not be
/// resolved, or an upstream that answered with a non-success code.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
