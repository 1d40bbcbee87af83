//! Chat-completions API backend.
//!
//! Sends the prompt as one system + one user message with temperature 0 and
//! a max-token cap, and returns the first choice's content untouched.
//! Requests: POST {api_base}/chat/completions

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{prompt, Backend, BackendError};
use crate::artifact::ArtifactSet;
use crate::config::Config;
use crate::parse::OutputFormat;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

pub struct RemoteApiBackend {
    api_key: String,
    model: String,
    api_base: String,
    max_tokens: u32,
    locale: String,
}

impl RemoteApiBackend {
    pub fn new(api_key: &str, config: &Config) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: config.model.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            max_tokens: config.max_tokens,
            locale: config.locale.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    fn request(&self, artifacts: &ArtifactSet) -> ChatRequest<'_> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt::system_prompt(&self.locale),
                },
                ChatMessage {
                    role: "user",
                    content: prompt::build(artifacts, self.output_format()),
                },
            ],
            max_tokens: self.max_tokens,
            temperature: 0.0,
        }
    }

    async fn complete(&self, request: &ChatRequest<'_>) -> Result<String, BackendError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("crosscheck/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let response = http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        first_content(parsed)
    }
}

/// Content of the first choice, or an error when the API returned none.
fn first_content(response: ChatResponse) -> Result<String, BackendError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| BackendError::MalformedResponse("response has no message content".into()))
}

impl Backend for RemoteApiBackend {
    fn name(&self) -> &'static str {
        "remote-api"
    }

    fn output_format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn invoke(&self, artifacts: &ArtifactSet) -> Result<String, BackendError> {
        let request = self.request(artifacts);
        debug!(endpoint = %self.endpoint(), model = %self.model, "sending chat request");

        let runtime = tokio::runtime::Runtime::new()?;
        let content = runtime.block_on(self.complete(&request))?;

        info!(bytes = content.len(), "received API response");
        Ok(content)
    }
}
