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
use crate::store::models::{Tasting, TastingInput};

pub fn tasting_routes() -> Router<AppState> {
    Router::new()
        .route("/tastings", get(list_tastings).post(create_tasting))
        .route(
            "/tastings/:id",
            get(get_tasting).put(update_tasting).delete(delete_tasting),
        )
}

#[instrument(skip(state))]
pub async fn list_tastings(State(state): State<AppState>) -> Json<Vec<Tasting>> {
    Json(state.store.lock().await.list_tastings())
}

#[instrument(skip(state))]
pub async fn get_tasting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Tasting>, Rejection> {
    let tasting = state.store.lock().await.get_tasting(id).map_err(reject)?;
    Ok(Json(tasting))
}

/// Also refreshes the verdict of the tasted coffee.
#[instrument(skip(state))]
pub async fn create_tasting(
    State(state): State<AppState>,
    Json(body): Json<TastingInput>,
) -> Result<(StatusCode, Json<Tasting>), Rejection> {
    let mut store = state.store.lock().await;
    let tasting = store.upsert_tasting(body, None).map_err(reject)?;
    state.persist(&store).await.map_err(internal)?;
    Ok((StatusCode::CREATED, Json(tasting)))
}

#[instrument(skip(state))]
pub async fn update_tasting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<TastingInput>,
) -> Result<Json<Tasting>, Rejection> {
    let mut store = state.store.lock().await;
    let tasting = store.upsert_tasting(body, Some(id)).map_err(reject)?;
    state.persist(&store).await.map_err(internal)?;
    Ok(Json(tasting))
}

#[instrument(skip(state))]
pub async fn delete_tasting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Rejection> {
    let mut store = state.store.lock().await;
    store.delete_tasting(id).map_err(reject)?;
    state.persist(&store).await.map_err(internal)?;
    Ok(StatusCode::NO_CONTENT)
}
