//! Reports derived from the store: per-coffee analytics and rankings.

pub mod dto;
pub mod handlers;
pub mod ranking;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::analytics_routes()
}
