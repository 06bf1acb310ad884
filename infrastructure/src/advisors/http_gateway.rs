//! Advisor gateway backed by an OpenAI-compatible chat completions API.
//!
//! Every advisor shares one HTTP client and model; advisors differ only in
//! their system prompt.

use async_trait::async_trait;
use council_application::{AdvisorError, AdvisorGateway};
use council_domain::{AdvisorId, PromptTemplate, Query};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Connection and sampling settings for [`HttpAdvisorGateway`]
#[derive(Debug, Clone)]
pub struct HttpAdvisorConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub request_timeout: Duration,
}

impl Default for HttpAdvisorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: None,
            model: "gpt-4.1-mini".to_string(),
            max_tokens: 1024,
            temperature: 0.4,
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl HttpAdvisorConfig {
    /// Full completions endpoint, tolerant of a trailing slash or `/v1` in the base URL
    pub fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let base = base.strip_suffix("/v1").unwrap_or(base);
        format!("{}{}", base, COMPLETIONS_PATH)
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
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
    content: Option<String>,
}

/// [`AdvisorGateway`] speaking the chat completions protocol over `reqwest`
pub struct HttpAdvisorGateway {
    client: reqwest::Client,
    config: HttpAdvisorConfig,
    endpoint: String,
}

impl HttpAdvisorGateway {
    pub fn new(config: HttpAdvisorConfig) -> Result<Self, AdvisorError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("advisor-council/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AdvisorError::ConnectionError(e.to_string()))?;

        if config.api_key.is_none() {
            warn!("No API key configured, requests are sent without authorization");
        }

        let endpoint = config.endpoint();
        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    pub fn config(&self) -> &HttpAdvisorConfig {
        &self.config
    }

    fn build_request<'a>(&'a self, system: &'a str, user: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }
}

/// Pull the first choice's text out of a completions body
fn parse_reply(body: &str) -> Result<String, AdvisorError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| AdvisorError::Other(format!("Malformed completion body: {}", e)))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(AdvisorError::EmptyReply)
}

fn map_transport_error(e: reqwest::Error) -> AdvisorError {
    if e.is_timeout() {
        AdvisorError::Timeout
    } else if e.is_connect() {
        AdvisorError::ConnectionError(e.to_string())
    } else {
        AdvisorError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl AdvisorGateway for HttpAdvisorGateway {
    async fn invoke(&self, advisor: AdvisorId, query: &Query) -> Result<String, AdvisorError> {
        let system = PromptTemplate::advisor_system(advisor);
        let user = PromptTemplate::advisor_query(query);
        let body = self.build_request(system, &user);

        debug!(advisor = %advisor, model = %self.config.model, "Sending advisor request");

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            return Err(AdvisorError::RequestFailed(format!(
                "HTTP {} {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                text.trim()
            )));
        }

        parse_reply(&text)
    }
}
