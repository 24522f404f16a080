//! Product handlers: list, value sum, create, read, update, delete.

use crate::error::AppError;
use crate::model::{Product, ProductInput};
use crate::response::{DeletedBody, SumBody};
use crate::service::ProductService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

fn body_to_input(body: Result<Json<ProductInput>, JsonRejection>) -> Result<ProductInput, AppError> {
    body.map(|Json(input)| input).map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    })
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = ProductService::list(state.store.as_ref(), &params).await?;
    Ok(Json(products))
}

pub async fn value_sum(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<SumBody>, AppError> {
    let sum = ProductService::value_sum(state.store.as_ref(), &params).await?;
    Ok(Json(SumBody { sum }))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let input = body_to_input(body)?;
    let product = ProductService::create(state.store.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    let product = ProductService::read(state.store.as_ref(), &id).await?;
    Ok(Json(product))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<ProductInput>, JsonRejection>,
) -> Result<Json<Product>, AppError> {
    let input = body_to_input(body)?;
    let product = ProductService::update(state.store.as_ref(), &id, input).await?;
    Ok(Json(product))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedBody>, AppError> {
    ProductService::delete(state.store.as_ref(), &id).await?;
    Ok(Json(DeletedBody { deleted: true }))
}
