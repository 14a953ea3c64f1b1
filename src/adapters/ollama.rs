use crate::domain::ports::ChatModel;
use crate::utils::error::{AdvisorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "http://127.0.0.1:11434";
pub const DEFAULT_MODEL: &str = "llama3.1:8b";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    stream: bool,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

/// Client for an Ollama-compatible `/api/chat` endpoint. One request per call, no retries.
pub struct OllamaClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl OllamaClient {
    pub fn new(host: &str, model: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/api/chat", normalize_host(host)),
            model: model.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatModel for OllamaClient {
    async fn complete(&self, system_prompt: &str, user_query: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            stream: false,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_query,
                },
            ],
        };

        tracing::debug!("Making chat request to: {}", self.endpoint);
        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        tracing::debug!("Chat response status: {}", status);
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorError::ModelResponse {
                message: format!("HTTP {}: {}", status, body.trim()),
            });
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .message
            .map(|m| m.content)
            .ok_or_else(|| AdvisorError::ModelResponse {
                message: "response has no message".to_string(),
            })?;

        if content.trim().is_empty() {
            return Err(AdvisorError::ModelResponse {
                message: "model returned an empty answer".to_string(),
            });
        }

        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn normalize_host(host: &str) -> String {
    let host = host.trim();
    if host.is_empty() {
        return DEFAULT_HOST.to_string();
    }
    let host = if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    };
    host.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client(server: &MockServer) -> OllamaClient {
        OllamaClient::new(&server.base_url(), DEFAULT_MODEL, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_normalize_host() {
        assert_eq!(normalize_host("localhost:11434"), "http://localhost:11434");
        assert_eq!(normalize_host("https://llm.example.com/"), "https://llm.example.com");
        assert_eq!(normalize_host("  "), DEFAULT_HOST);
    }

    #[tokio::test]
    async fn test_complete_sends_system_and_user_turns() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/chat")
                .json_body(serde_json::json!({
                    "model": "llama3.1:8b",
                    "stream": false,
                    "messages": [
                        {"role": "system", "content": "You advise on packages."},
                        {"role": "user", "content": "I need a blog"}
                    ]
                }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "model": "llama3.1:8b",
                    "message": {"role": "assistant", "content": "Go with Business."},
                    "done": true
                }));
        });

        let answer = client(&server)
            .complete("You advise on packages.", "I need a blog")
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(answer, "Go with Business.");
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api/chat");
            then.status(404).body("model 'llama3.1:8b' not found");
        });

        let err = client(&server).complete("sys", "user").await.unwrap_err();

        api_mock.assert_hits(1);
        assert!(matches!(err, AdvisorError::ModelResponse { ref message } if message.contains("not found")));
    }

    #[tokio::test]
    async fn test_malformed_body_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/chat");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"done": true}));
        });

        let err = client(&server).complete("sys", "user").await.unwrap_err();

        assert!(matches!(err, AdvisorError::ModelResponse { .. }));
    }

    #[tokio::test]
    async fn test_blank_answer_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/chat");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"message": {"role": "assistant", "content": "  "}}));
        });

        let err = client(&server).complete("sys", "user").await.unwrap_err();

        assert!(matches!(err, AdvisorError::ModelResponse { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_api_error() {
        let client =
            OllamaClient::new("http://127.0.0.1:9", DEFAULT_MODEL, Duration::from_secs(2)).unwrap();

        let err = client.complete("sys", "user").await.unwrap_err();

        assert!(matches!(err, AdvisorError::ApiError(_)));
    }
}
