use axum::{extract::State, Json};

use crate::{
    error::AppError,
    middleware::{JsonBody, StockId},
    models::{Stock, StockInput, StockResponse},
    state::AppState,
};

#[utoipa::path(
    post,
    path = "/api/newStock",
    tag = "stocks",
    request_body = StockInput,
    responses(
        (status = 200, description = "Stock created", body = StockResponse),
        (status = 400, description = "Body is not valid stock JSON")
    )
)]
pub async fn create_stock(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<StockInput>,
) -> Result<Json<StockResponse>, AppError> {
    let id = state.stocks.insert(&input).await?;

    Ok(Json(StockResponse::created(id)))
}

#[utoipa::path(
    get,
    path = "/api/stocks/{id}",
    tag = "stocks",
    params(("id" = i64, Path, description = "Stock id")),
    responses(
        (status = 200, description = "The stock", body = Stock),
        (status = 400, description = "Id is not an integer"),
        (status = 404, description = "No stock with this id")
    )
)]
pub async fn get_stock(
    State(state): State<AppState>,
    StockId(id): StockId,
) -> Result<Json<Stock>, AppError> {
    state
        .stocks
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or(AppError::StockNotFound(id))
}

#[utoipa::path(
    get,
    path = "/api/stock",
    tag = "stocks",
    responses((status = 200, description = "Every stock, unordered", body = [Stock]))
)]
pub async fn get_all_stocks(State(state): State<AppState>) -> Result<Json<Vec<Stock>>, AppError> {
    Ok(Json(state.stocks.find_all().await?))
}

#[utoipa::path(
    put,
    path = "/api/stock/{id}",
    tag = "stocks",
    params(("id" = i64, Path, description = "Stock id")),
    request_body = StockInput,
    responses(
        (status = 200, description = "Rows affected, 0 when the id does not exist", body = StockResponse),
        (status = 400, description = "Bad id or body")
    )
)]
pub async fn update_stock(
    State(state): State<AppState>,
    StockId(id): StockId,
    JsonBody(input): JsonBody<StockInput>,
) -> Result<Json<StockResponse>, AppError> {
    let rows = state.stocks.update_by_id(id, &input).await?;

    Ok(Json(StockResponse::updated(id, rows)))
}

#[utoipa::path(
    delete,
    path = "/api/deletestock/{id}",
    tag = "stocks",
    params(("id" = i64, Path, description = "Stock id")),
    responses(
        (status = 200, description = "Rows deleted, 0 when the id does not exist", body = StockResponse),
        (status = 400, description = "Id is not an integer")
    )
)]
pub async fn delete_stock(
    State(state): State<AppState>,
    StockId(id): StockId,
) -> Result<Json<StockResponse>, AppError> {
    let rows = state.stocks.delete_by_id(id).await?;

    Ok(Json(StockResponse::deleted(id, rows)))
}
