use std::sync::Arc;

use crate::{config, error, planner::SearchService, server};

pub async fn serve(addr: Option<String>) {
    let settings = match config::Settings::from_env() {
        Ok(s) => s,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    };
    let service = match SearchService::from_settings(&settings) {
        Ok(s) => Arc::new(s),
        Err(e) => error!("Cannot create upstream clients. Err: {}", e),
    };

    let addr = addr.unwrap_or(settings.server_addr);
    if let Err(e) = server::start_api_server(&addr, service).await {
        error!("Server stopped. Err: {}", e);
    }
}
