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
use crate::store::models::{Verdict, VerdictInput};

pub fn verdict_routes() -> Router<AppState> {
    Router::new()
        .route("/verdicts", get(list_verdicts).post(create_verdict))
        .route(
            "/verdicts/:id",
            get(get_verdict).put(update_verdict).delete(delete_verdict),
        )
}

#[instrument(skip(state))]
pub async fn list_verdicts(State(state): State<AppState>) -> Json<Vec<Verdict>> {
    Json(state.store.lock().await.list_verdicts())
}

#[instrument(skip(state))]
pub async fn get_verdict(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Verdict>, Rejection> {
    let verdict = state.store.lock().await.get_verdict(id).map_err(reject)?;
    Ok(Json(verdict))
}

/// POST merges into the coffee's verdict when it already has one.
#[instrument(skip(state))]
pub async fn create_verdict(
    State(state): State<AppState>,
    Json(body): Json<VerdictInput>,
) -> Result<(StatusCode, Json<Verdict>), Rejection> {
    let mut store = state.store.lock().await;
    let verdict = store.merge_verdict_for_coffee(body).map_err(reject)?;
    state.persist(&store).await.map_err(internal)?;
    Ok((StatusCode::CREATED, Json(verdict)))
}

#[instrument(skip(state))]
pub async fn update_verdict(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<VerdictInput>,
) -> Result<Json<Verdict>, Rejection> {
    let mut store = state.store.lock().await;
    let verdict = store.upsert_verdict(body, Some(id)).map_err(reject)?;
    state.persist(&store).await.map_err(internal)?;
    Ok(Json(verdict))
}

#[instrument(skip(state))]
pub async fn delete_verdict(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Rejection> {
    let mut store = state.store.lock().await;
    store.delete_verdict(id).map_err(reject)?;
    state.persist(&store).await.map_err(internal)?;
    Ok(StatusCode::NO_CONTENT)
}
