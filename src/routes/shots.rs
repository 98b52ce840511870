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
use crate::store::models::{Shot, ShotInput};

pub fn shot_routes() -> Router<AppState> {
    Router::new()
        .route("/shots", get(list_shots).post(create_shot))
        .route(
            "/shots/:id",
            get(get_shot).put(update_shot).delete(delete_shot),
        )
}

#[instrument(skip(state))]
pub async fn list_shots(State(state): State<AppState>) -> Json<Vec<Shot>> {
    Json(state.store.lock().await.list_shots())
}

#[instrument(skip(state))]
pub async fn get_shot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Shot>, Rejection> {
    let shot = state.store.lock().await.get_shot(id).map_err(reject)?;
    Ok(Json(shot))
}

#[instrument(skip(state))]
pub async fn create_shot(
    State(state): State<AppState>,
    Json(body): Json<ShotInput>,
) -> Result<(StatusCode, Json<Shot>), Rejection> {
    let mut store = state.store.lock().await;
    let shot = store.upsert_shot(body, None).map_err(reject)?;
    state.persist(&store).await.map_err(internal)?;
    Ok((StatusCode::CREATED, Json(shot)))
}

#[instrument(skip(state))]
pub async fn update_shot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ShotInput>,
) -> Result<Json<Shot>, Rejection> {
    let mut store = state.store.lock().await;
    let shot = store.upsert_shot(body, Some(id)).map_err(reject)?;
    state.persist(&store).await.map_err(internal)?;
    Ok(Json(shot))
}

#[instrument(skip(state))]
pub async fn delete_shot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Rejection> {
    let mut store = state.store.lock().await;
    store.delete_shot(id).map_err(reject)?;
    state.persist(&store).await.map_err(internal)?;
    Ok(StatusCode::NO_CONTENT)
}
