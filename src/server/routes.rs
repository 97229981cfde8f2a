//! HTTP routes for the `/foods` resource.
//!
//! - `GET /health`: liveness check
//! - `GET /foods`: every plate, in insertion order
//! - `POST /foods`: create a plate (201)
//! - `GET /foods/{id}`: one plate
//! - `PUT /foods/{id}`: replace a plate, keeping its id
//! - `DELETE /foods/{id}`: delete a plate

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

use super::store::{FoodStore, StoreError};
use crate::models::{FoodPlate, NewFoodPlate};

/// Store shared by every request handler.
pub type SharedStore = Arc<RwLock<FoodStore>>;

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match self {
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
            StoreError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            StoreError::IoError(..) | StoreError::ParseError(..) => {
                tracing::error!("Store failure: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}

/// Builds the application router around a store.
pub fn router(store: FoodStore) -> Router {
    let state: SharedStore = Arc::new(RwLock::new(store));

    Router::new()
        .route("/health", get(health))
        .route("/foods", get(list_foods).post(create_food))
        .route(
            "/foods/{id}",
            get(get_food).put(update_food).delete(delete_food),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "OK"
}

async fn list_foods(State(store): State<SharedStore>) -> Json<Vec<FoodPlate>> {
    let foods = store.read().await.list().to_vec();
    Json(foods)
}

async fn get_food(
    State(store): State<SharedStore>,
    Path(id): Path<u64>,
) -> Result<Json<FoodPlate>, StoreError> {
    let plate = store.read().await.get(id).cloned();
    plate.map(Json).ok_or(StoreError::NotFound(id))
}

async fn create_food(
    State(store): State<SharedStore>,
    Json(body): Json<NewFoodPlate>,
) -> Result<(StatusCode, Json<FoodPlate>), StoreError> {
    let plate = store.write().await.insert(body)?;
    tracing::info!("Created food plate {} ({})", plate.id, plate.name);
    Ok((StatusCode::CREATED, Json(plate)))
}

async fn update_food(
    State(store): State<SharedStore>,
    Path(id): Path<u64>,
    Json(body): Json<NewFoodPlate>,
) -> Result<Json<FoodPlate>, StoreError> {
    let plate = store.write().await.replace(id, body)?;
    tracing::info!("Updated food plate {}", id);
    Ok(Json(plate))
}

async fn delete_food(
    State(store): State<SharedStore>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StoreError> {
    let plate = store.write().await.remove(id)?;
    tracing::info!("Deleted food plate {} ({})", plate.id, plate.name);
    Ok(StatusCode::OK)
}
