use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use common::types::Message;
use models::advertisement::{AdvertisementPatch, Model, NewAdvertisement};
use service::advertisement::domain::SearchQuery;
use tracing::info;

use crate::errors::JsonApiError;
use crate::ServerState;

type ApiResult<T> = Result<Json<T>, JsonApiError>;

#[utoipa::path(
    post, path = "/advertisement", tag = "advertisement",
    request_body = crate::openapi::NewAdvertisementDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::AdvertisementDoc),
        (status = 400, description = "Constraint Violation", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorDoc),
        (status = 500, description = "Internal Server Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    body: Result<Json<NewAdvertisement>, JsonRejection>,
) -> ApiResult<Model> {
    let Json(input) = body?;
    let created = state.ads.create(input).await?;
    Ok(Json(created))
}

#[utoipa::path(
    get, path = "/advertisement/{id}", tag = "advertisement",
    params(("id" = i32, Path, description = "Advertisement id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::AdvertisementDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Invalid id", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Model> {
    let Path(id) = id?;
    state.ads.get(id).await?.map(Json).ok_or_else(JsonApiError::not_found)
}

#[utoipa::path(
    patch, path = "/advertisement/{id}", tag = "advertisement",
    params(("id" = i32, Path, description = "Advertisement id")),
    request_body = crate::openapi::AdvertisementPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AdvertisementDoc),
        (status = 400, description = "Constraint Violation", body = crate::openapi::ErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc),
        (status = 422, description = "Validation Error", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<AdvertisementPatch>, JsonRejection>,
) -> ApiResult<Model> {
    let Path(id) = id?;
    let Json(patch) = body?;
    state.ads.update(id, patch).await?.map(Json).ok_or_else(JsonApiError::not_found)
}

#[utoipa::path(
    delete, path = "/advertisement/{id}", tag = "advertisement",
    params(("id" = i32, Path, description = "Advertisement id")),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MessageDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Message> {
    let Path(id) = id?;
    if state.ads.delete(id).await? {
        Ok(Json(Message::new("Advertisement deleted successfully")))
    } else {
        Err(JsonApiError::not_found())
    }
}

#[utoipa::path(
    get, path = "/advertisement", tag = "advertisement",
    params(crate::openapi::SearchParams),
    responses(
        (status = 200, description = "Matching advertisements, newest first",
            body = [crate::openapi::AdvertisementDoc]),
        (status = 422, description = "Invalid filter or page", body = crate::openapi::ErrorDoc)
    )
)]
pub async fn search(
    State(state): State<ServerState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Vec<Model>> {
    let Query(query) = query?;
    let hits = state.ads.search(query).await?;
    info!(count = hits.len(), "search advertisements");
    Ok(Json(hits))
}
