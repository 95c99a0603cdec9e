use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::prompts::{resume_analysis_prompt, RESUME_ANALYSIS_SYSTEM};
use crate::models::resume::{AnalyzedResume, NewResume, ParsedDocument, Resume};
use crate::parser;
use crate::state::AppState;

/// Upload cap for resume files.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: &'static str,
    pub resume: Resume,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
}

/// POST /api/resume/upload
///
/// Accepts a multipart `resume` field, decodes it as text, and stores it.
/// The heuristic segmenter always runs; the LLM analysis is merged in when
/// it succeeds, so an upload never fails because the model was unavailable.
/// Binary formats are not extracted: a PDF or DOCX body is decoded lossily
/// and parses as mostly empty.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("resume") {
            let filename = field.file_name().unwrap_or("resume.txt").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            upload = Some((filename, data));
            break;
        }
    }

    let (filename, data) =
        upload.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    if data.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(
            "File exceeds the 10MB upload limit".to_string(),
        ));
    }

    let content = String::from_utf8_lossy(&data).into_owned();
    let resume = state
        .store
        .create_resume(NewResume {
            filename,
            content: content.clone(),
        })
        .await;

    let basic = parser::parse(&content);

    let (document, message, parse_error) = match state
        .llm
        .chat_json::<AnalyzedResume>(RESUME_ANALYSIS_SYSTEM, &resume_analysis_prompt(&content))
        .await
    {
        Ok(analysis) => (
            ParsedDocument::merge(basic, Some(analysis)),
            "Resume uploaded and analyzed successfully",
            None,
        ),
        Err(e) => {
            warn!("Resume analysis failed: {e}");
            (
                ParsedDocument::merge(basic, None),
                "Resume uploaded successfully, but analysis failed",
                Some(e.to_string()),
            )
        }
    };

    let resume = state.store.update_parsed_data(resume.id, document).await?;

    Ok(Json(UploadResponse {
        message,
        resume,
        parse_error,
    }))
}

/// GET /api/resume/latest
pub async fn handle_latest(State(state): State<AppState>) -> Result<Json<Resume>, AppError> {
    state
        .store
        .latest_resume()
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No resume found".to_string()))
}
