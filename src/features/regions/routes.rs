use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::regions::handlers;
use crate::features::regions::services::RegionIndexService;

/// Create routes for the regions feature
pub fn routes(service: Arc<RegionIndexService>) -> Router {
    Router::new()
        .route("/api/regions", get(handlers::list_regions))
        .route("/api/regions/text", get(handlers::list_regions_text))
        .with_state(service)
}
