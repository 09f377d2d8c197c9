use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::HeaderMap,
};

use crate::{
    envelope::{self, Reply},
    info,
    planner::{QueryKind, SearchParams, SearchService},
};

/// Header carrying the authenticated user name. Requests without it are
/// anonymous.
pub const USER_HEADER: &str = "x-user";

pub fn current_user(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub async fn search(
    kind: QueryKind,
    State(service): State<Arc<SearchService>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Reply {
    let user = current_user(&headers);
    let params = SearchParams::from(params);

    let reply = envelope::build(service.run(kind, &params, user.as_deref()).await);
    info!(
        "GET {} -> {} (code {})",
        kind.path(),
        reply.status.as_u16(),
        reply.body.code
    );
    reply
}
