use axum::{
    body::Body,
    http::Request,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    handlers::{create_stock, delete_stock, get_all_stocks, get_stock, update_stock},
    openapi::ApiDoc,
    state::AppState,
};

/// Builds the route table. `OPTIONS` on any route is answered by the CORS layer.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
        let request_id = req
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        tracing::info_span!("request", method = %req.method(), uri = %req.uri(), request_id = %request_id)
    });

    Router::new()
        .route("/api/health", get(health))
        .route("/api/openapi.json", get(openapi))
        .route("/api/stocks/:id", get(get_stock))
        .route("/api/stock", get(get_all_stocks))
        .route("/api/newStock", post(create_stock))
        .route("/api/stock/:id", put(update_stock))
        .route("/api/deletestock/:id", delete(delete_stock))
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(trace)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
