use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        entries::{create_entry, list_items},
        error::error_response,
        health::{livez, root},
        search::search,
        tags::list_tags,
    },
    middleware::require_bolt_token,
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // Data routes, all behind the bot token check
    let data_routes = Router::new()
        .route("/items", get(list_items))
        .route("/tags", get(list_tags))
        .route("/createEntry", post(create_entry))
        .route("/search", get(search))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bolt_token,
        ));

    let timeout = state.config.request_timeout();

    Router::new()
        .route("/", get(root))
        .route("/livez", get(livez))
        .merge(data_routes)
        .fallback(not_found)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .with_state(state)
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not Found")
}
