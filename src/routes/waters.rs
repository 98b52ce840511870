use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{internal, reject, Rejection};
use crate::state::AppState;
use crate::store::models::{Water, WaterInput};

pub fn water_routes() -> Router<AppState> {
    Router::new()
        .route("/waters", get(list_waters).post(create_water))
        .route(
            "/waters/:id",
            get(get_water).put(update_water).delete(delete_water),
        )
}

#[instrument(skip(state))]
pub async fn list_waters(State(state): State<AppState>) -> Json<Vec<Water>> {
    Json(state.store.lock().await.list_waters())
}

#[instrument(skip(state))]
pub async fn get_water(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Water>, Rejection> {
    let water = state.store.lock().await.get_water(id).map_err(reject)?;
    Ok(Json(water))
}

#[instrument(skip(state))]
pub async fn create_water(
    State(state): State<AppState>,
    Json(body): Json<WaterInput>,
) -> Result<(StatusCode, Json<Water>), Rejection> {
    let mut store = state.store.lock().await;
    let water = store.upsert_water(body, None).map_err(reject)?;
    state.persist(&store).await.map_err(internal)?;
    Ok((StatusCode::CREATED, Json(water)))
}

#[instrument(skip(state))]
pub async fn update_water(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<WaterInput>,
) -> Result<Json<Water>, Rejection> {
    let mut store = state.store.lock().await;
    let water = store.upsert_water(body, Some(id)).map_err(reject)?;
    state.persist(&store).await.map_err(internal)?;
    Ok(Json(water))
}

#[instrument(skip(state))]
pub async fn delete_water(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Rejection> {
    let mut store = state.store.lock().await;
    store.delete_water(id).map_err(reject)?;
    state.persist(&store).await.map_err(internal)?;
    Ok(StatusCode::NO_CONTENT)
}
