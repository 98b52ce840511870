use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;

use super::dto::AnalyticsSummary;
use super::ranking::{QualityPriceInsight, RankedCoffee, RetestCandidate, StabilityInsight};
use super::services;
use crate::state::AppState;
use crate::store::models::BeverageType;

#[derive(Debug, Deserialize)]
pub struct RankingFilter {
    #[serde(default)]
    pub beverage: Option<BeverageType>,
}

pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/analytics", get(summary))
        .route("/analytics/rankings", get(rankings))
        .route("/analytics/quality-price", get(quality_price))
        .route("/analytics/stability", get(stability))
        .route("/analytics/retest", get(retest))
}

#[instrument(skip(state))]
pub async fn summary(State(state): State<AppState>) -> Json<AnalyticsSummary> {
    let store = state.store.lock().await;
    Json(services::build_summary(&store))
}

#[instrument(skip(state))]
pub async fn rankings(
    State(state): State<AppState>,
    Query(filter): Query<RankingFilter>,
) -> Json<Vec<RankedCoffee>> {
    let store = state.store.lock().await;
    Json(services::rankings(&store, filter.beverage))
}

#[instrument(skip(state))]
pub async fn quality_price(State(state): State<AppState>) -> Json<Vec<QualityPriceInsight>> {
    let store = state.store.lock().await;
    Json(services::quality_price(&store))
}

#[instrument(skip(state))]
pub async fn stability(State(state): State<AppState>) -> Json<Vec<StabilityInsight>> {
    let store = state.store.lock().await;
    Json(services::stability(&store))
}

#[instrument(skip(state))]
pub async fn retest(State(state): State<AppState>) -> Json<Vec<RetestCandidate>> {
    let store = state.store.lock().await;
    Json(services::retest(&store))
}
