//! Product routes. `/product/valueSum` is a static segment and wins over `/product/:id`.

use crate::handlers::product::{create, delete, list, read, update, value_sum};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn product_routes(state: AppState) -> Router {
    Router::new()
        .route("/product", get(list).post(create))
        .route("/product/valueSum", get(value_sum))
        .route("/product/:id", get(read).post(update).delete(delete))
        .with_state(state)
}
