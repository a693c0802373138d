//! HTTP proxy for a fixed Google Sheets range.
//!
//! One method-dispatched endpoint: GET fetches the read range, POST
//! overwrites the write range with the grid supplied in the request body.

pub mod config;
pub mod errors;
pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::config::SheetsConfig;
use crate::handlers::{ServerState, healthz, read_sheet, write_sheet};

/// Build the application router over the given configuration.
///
/// Methods other than GET and POST on the sheet endpoint get an explicit
/// 405 from the method router.
pub fn app(config: SheetsConfig) -> Router {
    let state = Arc::new(ServerState { config });
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/sheet", get(read_sheet).post(write_sheet))
        .with_state(state)
}
