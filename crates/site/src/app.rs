//! Router assembly.
//!
//! The flash transfer and the cart checks wrap the page routes only. Asset
//! requests and unmatched paths go around them, so a concurrent favicon or
//! stylesheet fetch cannot consume a flash message queued for the next page
//! render. The session layer wraps everything, since the page middlewares
//! read the session from request extensions.

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::service::SignedCookie;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::middleware::{cart_checks_middleware, flash_middleware};
use crate::routes;
use crate::state::AppState;

/// Build the site router.
///
/// Generic over the session store so tests can drive the real router
/// against an in-memory store.
pub fn build<Store>(
    state: AppState,
    session_layer: SessionManagerLayer<Store, SignedCookie>,
    static_dir: &str,
) -> Router
where
    Store: SessionStore + Clone,
{
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(
            routes::routes()
                .layer(from_fn(cart_checks_middleware))
                .layer(from_fn(flash_middleware)),
        )
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
