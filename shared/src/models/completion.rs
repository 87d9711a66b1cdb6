use serde::Deserialize;
use thiserror::Error;

pub const EMPTY_RESPONSE_MESSAGE: &str = "API response is empty";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompletionError {
    #[error("{0}")]
    Transport(String),
    #[error("{status} {message}")]
    Api { status: u16, message: String },
    #[error("{}", EMPTY_RESPONSE_MESSAGE)]
    EmptyResponse,
    #[error("Malformed API response: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for CompletionError {
    fn from(err: serde_json::Error) -> Self {
        CompletionError::Malformed(err.to_string())
    }
}

/// Token counters reported by the provider for one completion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UsageStats {
    pub total: u32,
    pub prompt: u32,
    pub completion: u32,
}

/// Generated letter plus usage, kept in memory for the current session only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompletionResult {
    pub text: String,
    pub usage: UsageStats,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub total_tokens: u32,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

impl ChatCompletionResponse {
    /// First choice's text and the usage block, or `EmptyResponse` when
    /// either is missing.
    pub fn into_result(self) -> Result<CompletionResult, CompletionError> {
        let text = self
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|t| !t.is_empty())
            .ok_or(CompletionError::EmptyResponse)?;
        let usage = self.usage.ok_or(CompletionError::EmptyResponse)?;

        Ok(CompletionResult {
            text,
            usage: UsageStats {
                total: usage.total_tokens,
                prompt: usage.prompt_tokens,
                completion: usage.completion_tokens,
            },
        })
    }
}

/// Turns a raw provider reply into a result, mapping non-2xx statuses to
/// [`CompletionError::Api`].
pub fn decode_response(status: u16, body: &str) -> Result<CompletionResult, CompletionError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ProviderError>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    "status code (no body)".to_string()
                } else {
                    body.trim().to_string()
                }
            });
        return Err(CompletionError::Api { status, message });
    }

    if body.trim().is_empty() {
        return Err(CompletionError::EmptyResponse);
    }

    serde_json::from_str::<ChatCompletionResponse>(body)?.into_result()
}
