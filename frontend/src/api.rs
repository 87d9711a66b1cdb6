use gloo_net::http::Request;
use shared::models::{CompletionError, CompletionResult, Submission, decode_response};
use shared::prompt;

/// Provider base URL; override at build time with `COVER_LETTER_API_BASE`.
pub const API_BASE: &str = match option_env!("COVER_LETTER_API_BASE") {
    Some(base) => base,
    None => "https://api.openai.com/v1",
};

fn transport(err: gloo_net::Error) -> CompletionError {
    CompletionError::Transport(err.to_string())
}

/// Sends one chat-completion request for the submission. The key travels
/// from the browser straight to the provider.
pub async fn fetch_cover_letter(
    submission: &Submission,
) -> Result<CompletionResult, CompletionError> {
    let body = prompt::build_request(submission);
    tracing::info!(
        "Requesting cover letter: model={} messages={}",
        body.model,
        body.messages.len()
    );

    let resp = Request::post(&format!("{}/chat/completions", API_BASE))
        .header(
            "Authorization",
            &format!("Bearer {}", submission.settings.api_key),
        )
        .json(&body)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)?;

    let status = resp.status();
    let text = resp.text().await.map_err(transport)?;
    let result = decode_response(status, &text)?;

    tracing::info!("Cover letter received: {} tokens", result.usage.total);
    Ok(result)
}
