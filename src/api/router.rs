use super::{handlers, AppState};
use crate::errors::ApiError;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the application router with all routes and shared state.
pub fn build(state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/convert", post(handlers::convert))
        .route("/api/history", get(handlers::history));

    with_layers(routes).with_state(state)
}

/// 404 fallbacks plus the middleware stack shared by every route.
fn with_layers(routes: Router<AppState>) -> Router<AppState> {
    routes
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::Panic(detail).into_response()
}
