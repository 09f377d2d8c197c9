//! # API Module
//!
//! HTTP endpoints of the search backend.
//!
//! ## Endpoints
//!
//! - [`health`] - liveness probe returning service name and version
//! - [`search`] - one handler shared by every query kind; the router binds
//!   it once per [`QueryKind`](crate::planner::QueryKind) path
//!
//! Every search response is an [`Envelope`](crate::envelope::Envelope) with
//! the status mapping described in [`crate::envelope::build`]. Query string
//! parameters are read as plain strings (`keyword`, `id`, `page_wanted`,
//! `page_size`, `describe`, `spirit`, `title`); the caller identity comes from
//! the `X-User` header.

mod health;
mod search;

pub use health::health;
pub use search::{USER_HEADER, current_user, search};
