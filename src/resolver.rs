//! Concurrent fan-out of candidate song names into normalized songs.

use std::sync::Arc;

use tokio::{sync::Semaphore, task::JoinSet};

use crate::{
    error::SearchError,
    normalize::{SongShape, normalize_songs},
    types::CanonicalSong,
    upstream::{MusicApi, SearchType, ensure_success},
    warning,
};

/// Resolves candidate names through a bounded number of concurrent lookups.
///
/// Each candidate is one cloud search limited to `per_candidate` rows. A
/// candidate that fails contributes nothing; the batch as a whole always
/// succeeds. Results are concatenated in completion order, so the output
/// order does not follow the input order.
#[derive(Clone)]
pub struct Resolver {
    api: Arc<dyn MusicApi>,
    pool_size: usize,
}

impl Resolver {
    pub fn new(api: Arc<dyn MusicApi>, pool_size: usize) -> Self {
        Self {
            api,
            pool_size: pool_size.max(1),
        }
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub async fn resolve(&self, candidates: &[String], per_candidate: usize) -> Vec<CanonicalSong> {
        if candidates.is_empty() {
            return Vec::new();
        }

        let permits = Arc::new(Semaphore::new(self.pool_size));
        let mut lookups = Lookups(JoinSet::new());

        for candidate in candidates {
            let api = Arc::clone(&self.api);
            let permits = Arc::clone(&permits);
            let candidate = candidate.clone();

            lookups.0.spawn(async move {
                let result = match permits.acquire_owned().await {
                    Ok(_permit) => lookup(api.as_ref(), &candidate, per_candidate).await,
                    Err(e) => Err(SearchError::UpstreamTransport(e.to_string())),
                };
                (candidate, result)
            });
        }

        let mut songs = Vec::new();
        while let Some(joined) = lookups.0.join_next().await {
            match joined {
                Ok((_, Ok(found))) => songs.extend(found),
                Ok((candidate, Err(e))) => {
                    warning!("Lookup for candidate '{}' failed: {:?}", candidate, e)
                }
                Err(e) => warning!("Candidate lookup task aborted: {}", e),
            }
        }

        songs
    }
}

/// Lookups still running when the caller goes away are detached, not
/// aborted: a dispatched lookup always runs to completion.
struct Lookups(JoinSet<(String, Result<Vec<CanonicalSong>, SearchError>)>);

impl Drop for Lookups {
    fn drop(&mut self) {
        self.0.detach_all();
    }
}

/// One by-title search bounded to `limit` normalized songs.
pub async fn lookup(
    api: &dyn MusicApi,
    name: &str,
    limit: usize,
) -> Result<Vec<CanonicalSong>, SearchError> {
    let payload = api.cloudsearch(name, SearchType::Song, limit).await?;
    ensure_success(&payload)?;

    let mut songs = match payload.get("result") {
        Some(result) => normalize_songs(result, "songs", SongShape::Search),
        None => Vec::new(),
    };
    songs.truncate(limit);
    Ok(songs)
}
