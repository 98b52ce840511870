//! Barisense: espresso experiment tracking with extraction and tasting analytics.

pub mod analytics;
pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod routes;
pub mod scoring;
pub mod state;
pub mod storage;
pub mod store;

pub use app::build_app;
pub use error::{Error, Result};
pub use state::AppState;
pub use store::Store;
