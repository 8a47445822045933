pub mod advertisements;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::{Health, Message};

use crate::openapi::ApiDoc;
use crate::ServerState;

#[utoipa::path(
    get, path = "/", tag = "health",
    responses((status = 200, description = "Service banner"))
)]
pub async fn root() -> Json<Message> {
    Json(Message::new("Advertisement Service API"))
}

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> Json<Health> {
    Json(Health::healthy())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/openapi.json", get(openapi_json));

    let ads = Router::new()
        .route(
            "/advertisement",
            get(advertisements::search).post(advertisements::create),
        )
        .route(
            "/advertisement/:id",
            get(advertisements::get)
                .patch(advertisements::update)
                .delete(advertisements::delete),
        );

    public
        .merge(ads)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
