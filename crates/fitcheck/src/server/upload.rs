//! The `/upload` endpoint: outfit photo in, advice payload out.

use std::path::Path;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::Json;
use fitcheck_core::OutfitAdvice;

use super::error::ApiError;
use super::AppState;

/// Served in place of classification output when analysis fails. The
/// suggestion calls still run so the client gets whatever the LLM offers.
const ANALYSIS_FALLBACK_FEEDBACK: &str = "Error analyzing outfit.";
const ANALYSIS_FALLBACK_DESCRIPTION: &str = "Outfit analysis failed.";

/// Handle an outfit photo upload.
///
/// Expects a multipart form with a `file` field. The photo is saved to the
/// upload directory, classified off the async runtime, and both suggestion
/// calls run before the response is assembled. Analysis and LLM failures
/// degrade to error sentences inside the payload; only save failures
/// produce a 500.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<OutfitAdvice>, ApiError> {
    let Some((raw_name, data)) = next_file_field(&mut multipart).await? else {
        return Err(ApiError::bad_request("No file uploaded"));
    };

    let Some(filename) = sanitize_filename(&raw_name) else {
        return Err(ApiError::bad_request("No file selected"));
    };

    let dest = state.upload_dir.join(&filename);
    tokio::fs::write(&dest, &data)
        .await
        .map_err(|e| ApiError::internal(format!("Error in /upload: {}", e)))?;
    tracing::info!(filename = %filename, bytes = data.len(), "Photo saved");

    let classifier = Arc::clone(&state.classifier);
    let classification = tokio::task::spawn_blocking(move || classifier.classify(&data))
        .await
        .map_err(|e| ApiError::internal(format!("Error in /upload: {}", e)))?;

    let (feedback, outfit_description) = match classification {
        Ok(result) => (result.feedback(), result.outfit_description()),
        Err(e) => {
            tracing::warn!("Outfit analysis failed: {}", e);
            (
                ANALYSIS_FALLBACK_FEEDBACK.to_string(),
                ANALYSIS_FALLBACK_DESCRIPTION.to_string(),
            )
        }
    };

    let recommendations = match state.suggester.outfit_suggestions(&feedback).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Outfit suggestion call failed: {}", e);
            e.to_string()
        }
    };

    let remixing_suggestions = match state.suggester.remix_suggestions(&outfit_description).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Remix suggestion call failed: {}", e);
            e.to_string()
        }
    };

    Ok(Json(OutfitAdvice {
        feedback,
        recommendations,
        remixing_suggestions,
    }))
}

/// Pull the first `file` field out of the form, with its client filename.
async fn next_file_field(multipart: &mut Multipart) -> Result<Option<(String, Bytes)>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to parse multipart data: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let raw_name = field.file_name().unwrap_or("").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read file data: {}", e)))?;
        return Ok(Some((raw_name, data)));
    }
    Ok(None)
}

/// Strip any client-supplied directories from the filename.
fn sanitize_filename(raw: &str) -> Option<String> {
    let name = Path::new(raw).file_name()?.to_str()?;
    Some(name.to_string())
}
