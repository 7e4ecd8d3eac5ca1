//! Defines routes for the asset API and the surrounding HTTP surface.
//!
//! ## Structure
//! - **Collection endpoints**
//!   - `GET    /api/assets`: list all assets
//!   - `POST   /api/assets`: create an asset
//!
//! - **Item endpoints**
//!   - `GET    /api/assets/{id}`: fetch one asset
//!   - `PUT    /api/assets/{id}`: partial update
//!   - `DELETE /api/assets/{id}`: delete, echoing the removed asset
//!
//! - **Health**: `/healthz`, `/readyz`
//!
//! Anything else falls through to the static front-end directory.
//! `{id}` must parse as a `u64`; other segments are rejected by the extractor.

use crate::{
    config::AppConfig,
    handlers::{
        asset_handlers::{create_asset, delete_asset, get_asset, list_assets, update_asset},
        health_handlers::{healthz, readyz},
    },
    services::asset_service::AssetService,
};
use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Build and return the router for the API and health routes.
///
/// The router carries shared state (`AssetService`) to all handlers.
pub fn routes() -> Router<AssetService> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Collection-level routes
        .route("/api/assets", get(list_assets).post(create_asset))
        // Item-level routes
        .route(
            "/api/assets/{id}",
            get(get_asset).put(update_asset).delete(delete_asset),
        )
}

/// Full application: API routes, static fallback, tracing and optional CORS.
pub fn app(service: AssetService, cfg: &AppConfig) -> Router {
    let router = routes()
        .fallback_service(ServeDir::new(&cfg.static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(service);

    if cfg.cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
