pub mod frontend;
pub mod info;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::history::handlers as history;
use crate::matching::handlers as matching;
use crate::state::AppState;

/// Upload cap for `/match-file`.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(frontend::index_handler))
        .route("/api/info", get(info::info_handler))
        // Matching
        .route("/match", post(matching::handle_match))
        .route(
            "/match-file",
            post(matching::handle_match_file).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // History
        .route("/history", get(history::handle_list_history))
        .route("/history/:id", get(history::handle_get_match))
        .route("/history/:id/export", get(history::handle_export_match))
        .with_state(state)
}
