/// LLM Client — the single point of entry for all OpenAI calls in the
/// portfolio API.
///
/// ARCHITECTURAL RULE: no other module may call the OpenAI API directly.
/// All LLM interactions MUST go through this module.
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// The model used for all LLM calls. Hardcoded to prevent drift.
pub const MODEL: &str = "gpt-4o";
const MAX_RETRIES: u32 = 3;

const CHAT_MAX_TOKENS: u32 = 1000;
const QUICK_MAX_TOKENS: u32 = 500;
const CHAT_TEMPERATURE: f32 = 0.7;
const JSON_TEMPERATURE: f32 = 0.3;

/// Shown to the visitor when the model returns no text at all.
const EMPTY_REPLY_FALLBACK: &str =
    "I'm sorry, I couldn't generate a response. Please try again.";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One turn of conversation as sent to the chat completions API.
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub role: &'static str,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl ChatCompletion {
    fn text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Wraps the OpenAI chat completions API with retry logic and a structured
/// output helper.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Free-form portfolio chat over a message history.
    /// Returns a canned apology instead of erroring when the model produces
    /// no text, so the widget always has something to show.
    pub async fn chat(&self, system: &str, history: &[ChatTurn]) -> Result<String, LlmError> {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatTurn::system(system));
        messages.extend_from_slice(history);

        let completion = self
            .call(&ChatRequest {
                model: MODEL,
                messages: &messages,
                max_tokens: Some(CHAT_MAX_TOKENS),
                temperature: CHAT_TEMPERATURE,
                response_format: None,
            })
            .await?;

        Ok(completion
            .text()
            .unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_string()))
    }

    /// One-shot answer for the quick-action widget.
    pub async fn quick(&self, system: &str, query: &str) -> Result<String, LlmError> {
        let messages = [ChatTurn::system(system), ChatTurn::user(query)];

        let completion = self
            .call(&ChatRequest {
                model: MODEL,
                messages: &messages,
                max_tokens: Some(QUICK_MAX_TOKENS),
                temperature: CHAT_TEMPERATURE,
                response_format: None,
            })
            .await?;

        Ok(completion
            .text()
            .unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_string()))
    }

    /// Structured extraction: runs in JSON mode and deserializes the reply.
    pub async fn chat_json<T: DeserializeOwned>(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<T, LlmError> {
        let messages = [ChatTurn::system(system), ChatTurn::user(prompt)];

        let completion = self
            .call(&ChatRequest {
                model: MODEL,
                messages: &messages,
                max_tokens: None,
                temperature: JSON_TEMPERATURE,
                response_format: Some(ResponseFormat {
                    format_type: "json_object",
                }),
            })
            .await?;

        let text = completion.text().ok_or(LlmError::EmptyContent)?;
        serde_json::from_str(&text).map_err(LlmError::Parse)
    }

    /// Makes a raw call to the chat completions API.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    async fn call(&self, request: &ChatRequest<'_>) -> Result<ChatCompletion, LlmError> {
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(OPENAI_API_URL)
                .bearer_auth(&self.api_key)
                .json(request)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let completion: ChatCompletion = response.json().await?;

            if let Some(usage) = &completion.usage {
                debug!(
                    "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens, usage.completion_tokens
                );
            }

            return Ok(completion);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}
