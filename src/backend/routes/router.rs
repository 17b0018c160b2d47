/**
 * Router Configuration
 *
 * Combines all route configurations into a single Axum router and wraps it
 * in the middleware every request passes through.
 *
 * # Layers (outermost first)
 *
 * 1. `TraceLayer` - request/response tracing
 * 2. Session layer - `tower-sessions` manager behind the `sid` cookie
 * 3. Routes, with the auth guard on `/profile`
 */

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tower_sessions::SessionStore;

use crate::backend::middleware::session_layer;
use crate::backend::routes::api_routes::{configure_auth_routes, configure_user_routes};
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router<S>(app_state: AppState, sessions: S) -> Router<()>
where
    S: SessionStore + Clone,
{
    let router = Router::new().route("/health", get(|| async { "ok" }));

    let router = configure_user_routes(router);
    let router = configure_auth_routes(router, &app_state);

    // Fallback handler for 404
    let router = router.fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") });

    router
        .layer(session_layer(sessions, &app_state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
