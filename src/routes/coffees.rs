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
use crate::store::models::{Coffee, CoffeeInput, Shot, Tasting};

pub fn coffee_routes() -> Router<AppState> {
    Router::new()
        .route("/coffees", get(list_coffees).post(create_coffee))
        .route(
            "/coffees/:id",
            get(get_coffee).put(update_coffee).delete(delete_coffee),
        )
        .route("/coffees/:id/shots", get(coffee_shots))
        .route("/coffees/:id/tastings", get(coffee_tastings))
}

#[instrument(skip(state))]
pub async fn list_coffees(State(state): State<AppState>) -> Json<Vec<Coffee>> {
    Json(state.store.lock().await.list_coffees())
}

#[instrument(skip(state))]
pub async fn get_coffee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Coffee>, Rejection> {
    let coffee = state.store.lock().await.get_coffee(id).map_err(reject)?;
    Ok(Json(coffee))
}

#[instrument(skip(state))]
pub async fn create_coffee(
    State(state): State<AppState>,
    Json(body): Json<CoffeeInput>,
) -> Result<(StatusCode, Json<Coffee>), Rejection> {
    let mut store = state.store.lock().await;
    let coffee = store.upsert_coffee(body, None).map_err(reject)?;
    state.persist(&store).await.map_err(internal)?;
    Ok((StatusCode::CREATED, Json(coffee)))
}

#[instrument(skip(state))]
pub async fn update_coffee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<CoffeeInput>,
) -> Result<Json<Coffee>, Rejection> {
    let mut store = state.store.lock().await;
    let coffee = store.upsert_coffee(body, Some(id)).map_err(reject)?;
    state.persist(&store).await.map_err(internal)?;
    Ok(Json(coffee))
}

#[instrument(skip(state))]
pub async fn delete_coffee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Rejection> {
    let mut store = state.store.lock().await;
    store.delete_coffee(id).map_err(reject)?;
    state.persist(&store).await.map_err(internal)?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state))]
pub async fn coffee_shots(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Shot>>, Rejection> {
    let store = state.store.lock().await;
    store.get_coffee(id).map_err(reject)?;
    Ok(Json(store.shots_by_coffee(id)))
}

#[instrument(skip(state))]
pub async fn coffee_tastings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Tasting>>, Rejection> {
    let store = state.store.lock().await;
    store.get_coffee(id).map_err(reject)?;
    Ok(Json(store.tastings_by_coffee(id)))
}
