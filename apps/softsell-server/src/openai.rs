//! OpenAI-compatible chat completions backend

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use softsell_core::{ChatBackend, ChatError, ChatMessage};
use tracing::debug;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Sends the whole transcript to `{base_url}/chat/completions`
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
}

impl OpenAiBackend {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// Pull the first choice's text out of a completions response body
fn extract_reply(body: &str) -> Result<String, ChatError> {
    let response: CompletionResponse = serde_json::from_str(body)?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(ChatError::EmptyReply)
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn send(&self, transcript: &[ChatMessage]) -> Result<String, ChatError> {
        let request = CompletionRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: transcript,
        };
        debug!(
            "Sending {} messages to {}",
            transcript.len(),
            self.endpoint()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        extract_reply(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_reply() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"Sure!"}}]}"#;
        assert_eq!(extract_reply(body).unwrap(), "Sure!");
    }

    #[test]
    fn test_extract_reply_without_choices() {
        assert!(matches!(
            extract_reply(r#"{"choices":[]}"#),
            Err(ChatError::EmptyReply)
        ));
        assert!(matches!(
            extract_reply(r#"{"choices":[{"message":{"content":null}}]}"#),
            Err(ChatError::EmptyReply)
        ));
    }

    #[test]
    fn test_extract_reply_rejects_non_json() {
        assert!(matches!(
            extract_reply("<html>bad gateway</html>"),
            Err(ChatError::Serialization(_))
        ));
    }

    #[test]
    fn test_request_shape() {
        let messages = vec![ChatMessage::system("be brief"), ChatMessage::user("hi")];
        let request = CompletionRequest {
            model: DEFAULT_MODEL,
            temperature: DEFAULT_TEMPERATURE,
            messages: &messages,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let backend = OpenAiBackend::new("sk-test").with_base_url("http://localhost:8080/v1/");
        assert_eq!(backend.endpoint(), "http://localhost:8080/v1/chat/completions");
        assert!(!backend.is_demo());
    }
}
