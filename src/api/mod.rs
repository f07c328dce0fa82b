//! REST API surface for the loyalty intake service.

pub mod error;
pub mod handlers;
pub mod types;

use axum::routing::post;
use axum::Router;

use crate::server::AppState;

/// Build the submission router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/submit-loyalty-program",
        post(handlers::submit_loyalty_program),
    )
}
