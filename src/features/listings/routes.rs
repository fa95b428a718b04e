use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::listings::handlers;
use crate::features::listings::services::ListingService;

/// Read-only listing routes, open to anyone
pub fn public_routes(service: Arc<ListingService>) -> Router {
    Router::new()
        .route("/api/ads", get(handlers::list_listings))
        .route("/api/ads/{id}", get(handlers::get_listing))
        .with_state(service)
}

/// Listing writes. Callers must mount these behind the JWT middleware.
pub fn protected_routes(service: Arc<ListingService>) -> Router {
    Router::new()
        .route("/api/ads", post(handlers::create_listing))
        .route(
            "/api/ads/{id}",
            put(handlers::update_listing).delete(handlers::delete_listing),
        )
        .with_state(service)
}
