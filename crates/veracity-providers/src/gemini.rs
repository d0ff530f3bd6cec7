//! Gemini reasoning engine with function calling
//!
//! Each session keeps the full wire history (`contents`) and resends it on
//! every turn. Tool results go back as `functionResponse` parts in the order
//! the calls were requested.

use crate::config::{FunctionCallingMode, GeminiConfig, HttpConfig, GEMINI_API_KEY_ENV};
use crate::error::ProviderError;
use crate::http::{build_client, check_status, is_transient, request_error};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use veracity_domain::traits::{
    EngineMessage, EngineResponse, ReasoningEngine, ReasoningSession, ToolDeclaration,
    ToolInvocation,
};
use veracity_domain::ToolError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_call: Option<FunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_response: Option<FunctionResponse>,
    /// Fields we do not interpret (e.g. thought signatures) are sent back untouched
    #[serde(flatten)]
    extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct FunctionResponse {
    name: String,
    response: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct FunctionDeclaration {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolSet {
    function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolConfig {
    function_calling_config: FunctionCallingConfig,
}

#[derive(Debug, Clone, Serialize)]
struct FunctionCallingConfig {
    mode: FunctionCallingMode,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: &'a Content,
    contents: &'a [Content],
    #[serde(skip_serializing_if = "no_tools")]
    tools: &'a [ToolSet],
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_config: Option<&'a ToolConfig>,
    generation_config: &'a GenerationConfig,
}

fn no_tools(tools: &&[ToolSet]) -> bool {
    tools.is_empty()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Opens Gemini `generateContent` sessions
pub struct GeminiEngine {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiEngine {
    /// Create an engine
    pub fn new(config: GeminiConfig, http: &HttpConfig) -> Result<Self, ProviderError> {
        if config.model.trim().is_empty() {
            return Err(ProviderError::Config("model must not be empty".to_string()));
        }
        Ok(Self {
            client: build_client(http)?,
            config,
        })
    }
}

#[async_trait]
impl ReasoningEngine for GeminiEngine {
    async fn open_session(
        &self,
        system_instruction: &str,
        tools: &[ToolDeclaration],
    ) -> Result<Box<dyn ReasoningSession>, ToolError> {
        let api_key = self
            .config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ToolError::Credential(format!("{} not set", GEMINI_API_KEY_ENV)))?;

        let tool_sets = if tools.is_empty() {
            Vec::new()
        } else {
            vec![ToolSet {
                function_declarations: tools
                    .iter()
                    .map(|t| FunctionDeclaration {
                        name: t.name.clone(),
                        description: t.description.clone(),
                        parameters: t.parameters.clone(),
                    })
                    .collect(),
            }]
        };
        let tool_config = (!tools.is_empty()).then(|| ToolConfig {
            function_calling_config: FunctionCallingConfig {
                mode: self.config.function_calling_mode,
            },
        });

        Ok(Box::new(GeminiSession {
            client: self.client.clone(),
            url: format!(
                "{}/models/{}:generateContent",
                self.config.endpoint.trim_end_matches('/'),
                self.config.model
            ),
            api_key,
            max_retries: self.config.max_retries.max(1),
            system: Content {
                role: "system".to_string(),
                parts: vec![Part {
                    text: Some(system_instruction.to_string()),
                    ..Part::default()
                }],
            },
            tools: tool_sets,
            tool_config,
            generation: GenerationConfig {
                temperature: self.config.temperature,
                top_p: self.config.top_p,
                max_output_tokens: self.config.max_output_tokens,
            },
            history: Vec::new(),
        }))
    }
}

/// One Gemini conversation
pub struct GeminiSession {
    client: reqwest::Client,
    url: String,
    api_key: String,
    max_retries: u32,
    system: Content,
    tools: Vec<ToolSet>,
    tool_config: Option<ToolConfig>,
    generation: GenerationConfig,
    history: Vec<Content>,
}

impl GeminiSession {
    async fn post_once(&self) -> Result<GenerateResponse, ToolError> {
        let request = GenerateRequest {
            system_instruction: &self.system,
            contents: &self.history,
            tools: &self.tools,
            tool_config: self.tool_config.as_ref(),
            generation_config: &self.generation,
        };
        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(request_error)?;
        let body = check_status(response)
            .await?
            .text()
            .await
            .map_err(request_error)?;
        serde_json::from_str(&body)
            .map_err(|e| ToolError::Parse(format!("Invalid generateContent response: {}", e)))
    }

    async fn post_with_retry(&self) -> Result<GenerateResponse, ToolError> {
        let mut attempts = 0;
        loop {
            match self.post_once().await {
                Ok(response) => return Ok(response),
                Err(e) if is_transient(&e) && attempts + 1 < self.max_retries => {
                    attempts += 1;
                    // Exponential backoff: 1s, 2s, 4s, ...
                    let delay = Duration::from_secs(2u64.pow(attempts - 1));
                    warn!("Engine request failed ({}), retrying in {:?}", e, delay);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn user_content(message: EngineMessage) -> Content {
    let parts = match message {
        EngineMessage::User(text) => vec![Part {
            text: Some(text),
            ..Part::default()
        }],
        EngineMessage::ToolResults(results) => results
            .into_iter()
            .map(|result| {
                let key = if result.is_error { "error" } else { "content" };
                let mut response = serde_json::Map::new();
                response.insert(key.to_string(), Value::String(result.content));
                Part {
                    function_response: Some(FunctionResponse {
                        name: result.name,
                        response: Value::Object(response),
                    }),
                    ..Part::default()
                }
            })
            .collect(),
    };
    Content {
        role: "user".to_string(),
        parts,
    }
}

fn interpret(response: GenerateResponse) -> Result<(Content, EngineResponse), ToolError> {
    let feedback = response.prompt_feedback;
    let candidate = response.candidates.into_iter().next().ok_or_else(|| {
        ToolError::Parse(format!(
            "Engine returned no candidates (feedback: {})",
            feedback.map(|f| f.to_string()).unwrap_or_else(|| "none".to_string())
        ))
    })?;
    let mut content = candidate.content.unwrap_or(Content {
        role: "model".to_string(),
        parts: Vec::new(),
    });
    if content.role.is_empty() {
        content.role = "model".to_string();
    }
    if content.parts.is_empty() {
        debug!("Empty candidate (finish reason: {:?})", candidate.finish_reason);
    }

    let texts: Vec<&str> = content
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .filter(|t| !t.trim().is_empty())
        .collect();
    let text = (!texts.is_empty()).then(|| texts.join("\n"));
    let tool_calls = content
        .parts
        .iter()
        .filter_map(|p| p.function_call.as_ref())
        .map(|call| ToolInvocation::new(call.name.clone(), call.args.clone()))
        .collect();

    Ok((content, EngineResponse { text, tool_calls }))
}

#[async_trait]
impl ReasoningSession for GeminiSession {
    async fn send(&mut self, message: EngineMessage) -> Result<EngineResponse, ToolError> {
        self.history.push(user_content(message));
        let result = match self.post_with_retry().await {
            Ok(response) => interpret(response),
            Err(e) => Err(e),
        };
        match result {
            Ok((content, reply)) => {
                debug!(
                    "Engine replied with {} tool call(s)",
                    reply.tool_calls.len()
                );
                self.history.push(content);
                Ok(reply)
            }
            Err(e) => {
                self.history.pop();
                Err(e)
            }
        }
    }
}
