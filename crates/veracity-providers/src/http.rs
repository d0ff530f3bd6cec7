//! Shared HTTP plumbing

use crate::config::HttpConfig;
use crate::error::ProviderError;
use reqwest::{Client, Response, StatusCode};
use veracity_domain::ToolError;

/// Build a client with the configured timeout and user agent
pub(crate) fn build_client(config: &HttpConfig) -> Result<Client, ProviderError> {
    Ok(Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.clone())
        .build()?)
}

/// Map a transport failure onto the collaborator taxonomy
pub(crate) fn request_error(e: reqwest::Error) -> ToolError {
    if e.is_timeout() {
        ToolError::Network(format!("Request timed out: {}", e))
    } else if e.is_decode() {
        ToolError::Parse(format!("Failed to decode response: {}", e))
    } else {
        ToolError::Network(format!("Request failed: {}", e))
    }
}

/// Reject non-success responses
pub(crate) async fn check_status(response: Response) -> Result<Response, ToolError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    let body: String = body.chars().take(300).collect();
    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ToolError::Credential(format!("HTTP {}: {}", status, body))
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ToolError::Validation(format!("HTTP {}: {}", status, body))
        }
        _ => ToolError::Network(format!("HTTP {}: {}", status, body)),
    })
}

/// Whether a failed request is worth retrying
pub(crate) fn is_transient(error: &ToolError) -> bool {
    matches!(error, ToolError::Network(_))
}
