use axum::{http::StatusCode, Router};
use tracing::error;

use crate::error::Error;
use crate::state::AppState;

pub mod coffees;
pub mod shots;
pub mod tastings;
pub mod verdicts;
pub mod waters;

pub type Rejection = (StatusCode, String);

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(coffees::coffee_routes())
        .merge(waters::water_routes())
        .merge(shots::shot_routes())
        .merge(tastings::tasting_routes())
        .merge(verdicts::verdict_routes())
        .merge(crate::analytics::router())
}

pub(crate) fn reject(e: Error) -> Rejection {
    let status = match &e {
        Error::UnknownLabel(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Error::DuplicateVerdict(_) => StatusCode::CONFLICT,
        e if e.is_not_found() => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    };
    (status, e.to_string())
}

pub(crate) fn internal(e: anyhow::Error) -> Rejection {
    error!(error = %e, "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
