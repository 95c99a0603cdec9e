use anyhow::Context;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{prompts, ChatTurn};
use crate::models::chat::{ChatMessage, ChatRole, Conversation, Message, NewMessage};
use crate::state::AppState;

/// Number of trailing messages sent to the model as chat context.
const HISTORY_WINDOW: usize = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartConversationRequest {
    #[serde(default)]
    pub resume_id: Option<Uuid>,
}

/// POST /api/conversation/start
pub async fn handle_start(
    State(state): State<AppState>,
    Json(req): Json<StartConversationRequest>,
) -> Result<Json<Conversation>, AppError> {
    Ok(Json(state.store.create_conversation(req.resume_id).await))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestConversationQuery {
    #[serde(default)]
    pub resume_id: Option<Uuid>,
}

/// GET /api/conversation/latest
pub async fn handle_latest(
    State(state): State<AppState>,
    Query(params): Query<LatestConversationQuery>,
) -> Result<Json<Conversation>, AppError> {
    state
        .store
        .latest_conversation(params.resume_id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No conversation found".to_string()))
}

/// GET /api/conversation/:id/messages
pub async fn handle_messages(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    let messages = state.store.messages_by_conversation(id).await;
    Ok(Json(messages.iter().map(ChatMessage::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
    #[serde(default = "default_role")]
    pub role: ChatRole,
}

fn default_role() -> ChatRole {
    ChatRole::User
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub user_message: Message,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_message: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /api/conversation/:id/message
///
/// Stores the message; a user-role message additionally triggers an
/// assistant reply generated over the trailing history window. A failed
/// model call degrades to the stored user message plus an error field
/// rather than an error status.
pub async fn handle_send(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<SendMessageResponse>, AppError> {
    if req.content.trim().is_empty() {
        return Err(AppError::Validation(
            "Message content is required".to_string(),
        ));
    }

    let message = state
        .store
        .create_message(NewMessage {
            conversation_id: id,
            role: req.role,
            content: req.content,
        })
        .await;

    if req.role != ChatRole::User {
        return Ok(Json(SendMessageResponse {
            user_message: message,
            ai_message: None,
            error: None,
        }));
    }

    let context_json = resume_context(&state, id).await?;
    let system = prompts::chat_system(&state.portfolio.personal_info.name, &context_json);

    let recent = state.store.messages_by_conversation(id).await;
    let history: Vec<ChatTurn> = trailing_window(&recent, HISTORY_WINDOW)
        .iter()
        .map(|m| ChatTurn {
            role: m.role.as_str(),
            content: m.content.clone(),
        })
        .collect();

    match state.llm.chat(&system, &history).await {
        Ok(reply) => {
            let ai_message = state
                .store
                .create_message(NewMessage {
                    conversation_id: id,
                    role: ChatRole::Assistant,
                    content: reply,
                })
                .await;
            Ok(Json(SendMessageResponse {
                user_message: message,
                ai_message: Some(ai_message),
                error: None,
            }))
        }
        Err(e) => {
            warn!("AI response failed: {e}");
            Ok(Json(SendMessageResponse {
                user_message: message,
                ai_message: None,
                error: Some(format!("Failed to generate AI response: {e}")),
            }))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QuickActionRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct QuickActionResponse {
    pub response: String,
}

/// POST /api/quick-action
/// One-shot question answered against the latest parsed resume, or the
/// static portfolio when nothing has been uploaded.
pub async fn handle_quick(
    State(state): State<AppState>,
    Json(req): Json<QuickActionRequest>,
) -> Result<Json<QuickActionResponse>, AppError> {
    if req.query.trim().is_empty() {
        return Err(AppError::Validation("Query is required".to_string()));
    }

    let latest = state
        .store
        .latest_resume()
        .await
        .and_then(|r| r.parsed_data);
    let context_json = match latest {
        Some(document) => serde_json::to_string(&document),
        None => serde_json::to_string(state.portfolio.as_ref()),
    }
    .context("serializing quick-action context")?;

    let system = prompts::quick_answer_system(&context_json);
    let response = state
        .llm
        .quick(&system, &req.query)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to generate response: {e}")))?;

    Ok(Json(QuickActionResponse { response }))
}

/// Chat context: the parsed data of the conversation's resume when present,
/// otherwise the static portfolio.
async fn resume_context(state: &AppState, conversation_id: Uuid) -> Result<String, AppError> {
    let conversation = state.store.conversation(conversation_id).await;
    let parsed = match conversation.and_then(|c| c.resume_id) {
        Some(resume_id) => state
            .store
            .resume(resume_id)
            .await
            .and_then(|r| r.parsed_data),
        None => None,
    };

    let json = match parsed {
        Some(document) => serde_json::to_string_pretty(&document),
        None => serde_json::to_string_pretty(state.portfolio.as_ref()),
    };
    Ok(json.context("serializing chat resume context")?)
}

fn trailing_window<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}
