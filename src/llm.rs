//! Azure OpenAI chat completions over blocking HTTP.

use std::io::Read;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{GenerationParams, ModelConfig};
use crate::error::Result;
use crate::prompt::ChatPrompt;
use crate::questions::QuestionGenerator;

/// Timeout for a whole completion request (120 seconds).
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Errors that can occur while calling the model endpoint.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("HTTP error {status}: {message}")]
    HttpStatus { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<ureq::Error> for HttpError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => HttpError::HttpStatus {
                status: code,
                message: format!("Server returned status {code}"),
            },
            _ => HttpError::Network(err.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    messages: [ChatMessage<'a>; 2],
    model: &'a str,
    #[serde(flatten)]
    params: &'a GenerationParams,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat completions client for an Azure OpenAI deployment.
///
/// One request per call; no retries or rate limiting.
#[derive(Debug, Clone)]
pub struct AzureOpenAiClient {
    config: ModelConfig,
    timeout: Duration,
}

impl AzureOpenAiClient {
    /// Create a client from a validated model config.
    pub fn new(config: ModelConfig) -> Result<Self> {
        config.validate()?;
        if !config.endpoint.starts_with("http://") && !config.endpoint.starts_with("https://") {
            return Err(HttpError::InvalidUrl(format!(
                "URL must start with http:// or https://: {}",
                config.endpoint
            ))
            .into());
        }
        Ok(Self {
            config,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Chat completions URL for the configured deployment.
    pub fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.deployment,
            self.config.api_version
        )
    }

    fn request_body(&self, prompt: &ChatPrompt) -> Result<String> {
        let request = ChatRequest {
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            model: &self.config.deployment,
            params: &self.config.params,
        };
        Ok(serde_json::to_string(&request)?)
    }

    fn post(&self, body: &str) -> std::result::Result<String, HttpError> {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .build();
        let agent = ureq::Agent::new_with_config(config);

        let response = agent
            .post(&self.completions_url())
            .header("api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .send(body)?;

        let mut text = String::new();
        response.into_body().into_reader().read_to_string(&mut text)?;
        Ok(text)
    }
}

impl QuestionGenerator for AzureOpenAiClient {
    fn generate(&self, prompt: &ChatPrompt) -> Result<String> {
        let body = self.request_body(prompt)?;
        tracing::info!(
            deployment = %self.config.deployment,
            prompt_chars = prompt.user.len(),
            "requesting chat completion"
        );

        let text = self.post(&body)?;
        Ok(extract_content(&text)?)
    }
}

/// Pull the first choice's message content out of a completions response.
fn extract_content(body: &str) -> std::result::Result<String, HttpError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| HttpError::InvalidResponse(e.to_string()))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| HttpError::InvalidResponse("response has no message content".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;

    fn config(endpoint: &str) -> ModelConfig {
        ModelConfig {
            endpoint: endpoint.to_string(),
            api_key: "key".to_string(),
            api_version: "2024-12-01-preview".to_string(),
            deployment: "gpt-4.1".to_string(),
            params: GenerationParams::default(),
        }
    }

    #[test]
    fn test_invalid_url() {
        let result = AzureOpenAiClient::new(config("myresource.openai.azure.com"));
        assert!(matches!(
            result,
            Err(SchemaError::Http(HttpError::InvalidUrl(_)))
        ));
    }

    #[test]
    fn test_completions_url() {
        let client =
            AzureOpenAiClient::new(config("https://myresource.openai.azure.com/")).unwrap();
        assert_eq!(
            client.completions_url(),
            "https://myresource.openai.azure.com/openai/deployments/gpt-4.1/chat/completions?api-version=2024-12-01-preview"
        );
    }

    #[test]
    fn test_request_body() {
        let client = AzureOpenAiClient::new(config("https://e")).unwrap();
        let prompt = ChatPrompt {
            system: "sys".to_string(),
            user: "usr".to_string(),
        };
        let body: serde_json::Value =
            serde_json::from_str(&client.request_body(&prompt).unwrap()).unwrap();

        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "usr");
        assert_eq!(body["model"], "gpt-4.1");
        assert_eq!(body["max_tokens"], 10_000);
        assert!(body.get("params").is_none());
    }

    #[test]
    fn test_extract_content() {
        let body = r#"{"choices": [
            {"index": 0, "message": {"role": "assistant", "content": "Question: ..."}}
        ]}"#;
        assert_eq!(extract_content(body).unwrap(), "Question: ...");

        assert!(matches!(
            extract_content(r#"{"choices": []}"#),
            Err(HttpError::InvalidResponse(_))
        ));
        assert!(matches!(extract_content("not json"), Err(HttpError::InvalidResponse(_))));
    }
}
