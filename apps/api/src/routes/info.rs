use axum::Json;
use serde_json::{json, Value};

pub const SERVICE_NAME: &str = "Job Matcher API";

/// GET /api/info
/// Returns service name, version, and description.
pub async fn info_handler() -> Json<Value> {
    Json(json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "description": env!("CARGO_PKG_DESCRIPTION")
    }))
}
