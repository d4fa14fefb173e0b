//! Route configuration.

use crate::auth::session_middleware;
use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        // Liveness (intentionally unauthenticated, like any registry)
        .route("/-/ping", get(handlers::ping))
        // Search
        .route("/-/v1/search", get(handlers::search))
        // Session renewal
        .route("/_session", get(handlers::get_session))
        // Packument fetch and publish; static routes above win over the capture
        .route(
            "/{package_name}",
            get(handlers::get_packument).put(handlers::publish_package),
        )
        .fallback(handlers::not_found);

    // Middleware layers are applied in reverse order (outermost first).
    // Order of execution: TraceLayer -> Timeout -> Session classification -> Handler
    router
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        // Bounded request handling so a stuck client cannot hang the run
        .layer(TimeoutLayer::new(state.config.server.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
