//! Axum route handlers for the match history.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::extractors::{ApiPath, ApiQuery};
use crate::history::export::render_markdown;
use crate::history::store::MatchRecord;
use crate::state::AppState;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl HistoryQuery {
    fn validate(&self) -> Result<(), AppError> {
        if !(1..=MAX_LIMIT).contains(&self.limit) {
            return Err(AppError::UnprocessableEntity(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }
        if self.offset < 0 {
            return Err(AppError::UnprocessableEntity(
                "offset must be greater than or equal to 0".to_string(),
            ));
        }
        Ok(())
    }
}

async fn find_record(state: &AppState, id: i64) -> Result<MatchRecord, AppError> {
    state
        .store
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Match not found".to_string()))
}

/// GET /history?limit=&offset=
pub async fn handle_list_history(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<HistoryQuery>,
) -> Result<Json<Vec<MatchRecord>>, AppError> {
    params.validate()?;
    let records = state.store.list(params.limit, params.offset).await?;
    Ok(Json(records))
}

/// GET /history/:id
pub async fn handle_get_match(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<MatchRecord>, AppError> {
    Ok(Json(find_record(&state, id).await?))
}

/// GET /history/:id/export
///
/// Markdown report of a stored match. Records whose reply was never parsed
/// have nothing to report.
pub async fn handle_export_match(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let record = find_record(&state, id).await?;
    let details = record.details().ok_or_else(|| {
        AppError::UnprocessableEntity(format!("Match {id} has no structured result to export"))
    })?;

    let report =
        render_markdown(&record.job_description, &details).map_err(anyhow::Error::from)?;

    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        report,
    ))
}
