use std::{collections::HashMap, net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Router,
    extract::{Query, State},
    http::HeaderMap,
    routing::get,
};

use crate::{
    Res, api, info,
    planner::{QueryKind, SearchService},
};

/// Builds the router: `/health` plus one GET route per query kind.
pub fn router(service: Arc<SearchService>) -> Router {
    let mut app = Router::new().route("/health", get(api::health));

    for kind in QueryKind::ALL {
        app = app.route(
            kind.path(),
            get(
                move |state: State<Arc<SearchService>>,
                      query: Query<HashMap<String, String>>,
                      headers: HeaderMap| api::search(kind, state, query, headers),
            ),
        );
    }

    app.with_state(service)
}

pub async fn start_api_server(addr: &str, service: Arc<SearchService>) -> Res<()> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| format!("Failed to parse server address '{}': {}", addr, e))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, router(service)).await?;
    Ok(())
}
