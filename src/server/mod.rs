//! HTTP API over a shared in-memory [`Graph`].
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET  | `/health` | [`handlers::health_check`] |
//! | GET  | `/compounds?search=` | [`handlers::list_compounds`] |
//! | POST | `/compounds` | [`handlers::create_compound`] |
//! | GET  | `/compounds/suggestions?prefix=&limit=` | [`handlers::compound_suggestions`] |
//! | GET  | `/compounds/{formula}` | [`handlers::get_compound`] |
//! | GET  | `/compounds/{formula}/reactions` | [`handlers::compound_reactions`] |
//! | POST | `/reactions` | [`handlers::create_reaction`] |
//! | GET  | `/paths?start=&end=&max_steps=` | [`handlers::find_paths`] |

pub mod error;
pub mod handlers;
pub mod types;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::storage::MemoryBackend;
use crate::Graph;

pub use error::ApiError;

/// Shared handler state.
pub struct AppState {
    pub graph: Graph<MemoryBackend>,
}

impl AppState {
    pub fn new(graph: Graph<MemoryBackend>) -> Arc<Self> {
        Arc::new(Self { graph })
    }
}

/// All API routes, without CORS or tracing layers.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/compounds",
            get(handlers::list_compounds).post(handlers::create_compound),
        )
        .route("/compounds/suggestions", get(handlers::compound_suggestions))
        .route("/compounds/{formula}", get(handlers::get_compound))
        .route("/compounds/{formula}/reactions", get(handlers::compound_reactions))
        .route("/reactions", post(handlers::create_reaction))
        .route("/paths", get(handlers::find_paths))
        .with_state(state)
}

/// The served application: [`router`] plus CORS and request tracing.
pub fn app(state: Arc<AppState>, cors_origins: Option<&str>) -> Router {
    router(state)
        .layer(build_cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// CORS from a comma-separated origin list; `None` is permissive.
pub fn build_cors_layer(origins: Option<&str>) -> CorsLayer {
    match origins {
        Some(origins) => {
            let origin_list: Vec<_> = origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            tracing::info!("CORS: restricted to {} origin(s)", origin_list.len());
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origin_list))
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => {
            tracing::warn!("CORS: permissive. Set CHEMPATH_CORS_ORIGIN to restrict origins.");
            CorsLayer::permissive()
        }
    }
}
