//! Axum route handlers for submitting a resume / job description pair.

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::extractors::ApiJson;
use crate::extraction::extract_text;
use crate::matching::analyzer::MatchOutcome;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume_text: String,
    pub job_description: String,
}

/// Analyze, then persist exactly one record for the attempt.
/// A provider failure returns before anything is written.
async fn analyze_and_store(
    state: &AppState,
    resume_text: &str,
    job_description: &str,
) -> Result<MatchOutcome, AppError> {
    let outcome = state.analyzer.analyze(resume_text, job_description).await?;

    let id = state
        .store
        .insert(
            resume_text,
            job_description,
            &outcome.raw_output,
            outcome.parsed_output.as_ref(),
        )
        .await?;

    match &outcome.parsed_output {
        Some(details) => info!("Stored match {id} (score {})", details.score),
        None => info!("Stored match {id} (unparsed reply)"),
    }

    Ok(outcome)
}

/// POST /match
pub async fn handle_match(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<MatchRequest>,
) -> Result<Json<MatchOutcome>, AppError> {
    let outcome =
        analyze_and_store(&state, &request.resume_text, &request.job_description).await?;
    Ok(Json(outcome))
}

/// POST /match-file
///
/// Multipart fields: `resume_file` (.docx or .txt) and `job_description` (text).
/// Unsupported file types are rejected before the model is called.
pub async fn handle_match_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchOutcome>, AppError> {
    let mut resume_file: Option<(String, Bytes)> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume_file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read resume_file: {e}"))
                })?;
                resume_file = Some((filename, bytes));
            }
            Some("job_description") => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read job_description: {e}"))
                })?;
                job_description = Some(text);
            }
            _ => {}
        }
    }

    let (filename, bytes) = resume_file
        .ok_or_else(|| AppError::UnprocessableEntity("resume_file is required".to_string()))?;
    let job_description = job_description.ok_or_else(|| {
        AppError::UnprocessableEntity("job_description is required".to_string())
    })?;

    let resume_text = extract_text(&bytes, &filename)?;
    info!(
        "Extracted {} chars from uploaded resume {filename}",
        resume_text.len()
    );

    let outcome = analyze_and_store(&state, &resume_text, &job_description).await?;
    Ok(Json(outcome))
}
