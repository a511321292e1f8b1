//! HTTP client for a locally running Ollama server.
//!
//! One `generate` call is a single blocking-from-the-caller's-view
//! request/response exchange: no retries, no streaming, no partial
//! results. `list_models` is a read-only sibling with a much shorter
//! timeout so a dead server doesn't stall startup.

use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::settings::OllamaSettings;
use tracing::debug;

use crate::error::OllamaError;

/// Shown when a 200 response carries no `response` field.
pub const NO_RESPONSE_PLACEHOLDER: &str = "No response from Ollama";

#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub base_url: String,
    pub generate_timeout: Duration,
    pub tags_timeout: Duration,
}

impl From<&OllamaSettings> for OllamaConfig {
    fn from(s: &OllamaSettings) -> Self {
        Self {
            base_url: s.base_url.clone(),
            generate_timeout: Duration::from_secs(s.generate_timeout_secs),
            tags_timeout: Duration::from_secs(s.tags_timeout_secs),
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self::from(&OllamaSettings::default())
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

/// Fixed generation options sent with every request.
#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f64,
    top_p: f64,
    num_predict: i32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            top_p: 0.9,
            num_predict: 4096,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    name: String,
}

pub struct OllamaClient {
    http: Client,
    config: OllamaConfig,
}

impl OllamaClient {
    /// Timeouts are applied per request, so the client itself carries none.
    pub fn new(config: OllamaConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// Send one composed prompt and return the full response text.
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String, OllamaError> {
        let url = format!("{}/api/generate", self.config.base_url);
        let request = GenerateRequest {
            model,
            prompt,
            stream: false,
            options: GenerateOptions::default(),
        };
        debug!(model, prompt_len = prompt.len(), "sending generate request");

        let resp = self
            .http
            .post(&url)
            .timeout(self.config.generate_timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(OllamaError::ServerError(status.as_u16()));
        }

        let body: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| OllamaError::RequestFailed(format!("failed to parse response body: {e}")))?;

        Ok(body
            .response
            .unwrap_or_else(|| NO_RESPONSE_PLACEHOLDER.to_string()))
    }

    /// List the model names the server has pulled. The caller decides what
    /// to do when this fails (the app falls back to a fixed list).
    pub async fn list_models(&self) -> Result<Vec<String>, OllamaError> {
        let url = format!("{}/api/tags", self.config.base_url);
        let resp = self
            .http
            .get(&url)
            .timeout(self.config.tags_timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(OllamaError::ServerError(status.as_u16()));
        }

        let body: TagsResponse = resp
            .json()
            .await
            .map_err(|e| OllamaError::RequestFailed(format!("failed to parse model list: {e}")))?;

        Ok(body.models.into_iter().map(|m| m.name).collect())
    }

    /// A timeout means the server never answered; fold it into the
    /// connection-unavailable case so the user gets the "is it running?"
    /// hint rather than a raw transport error.
    fn classify(&self, err: reqwest::Error) -> OllamaError {
        if err.is_connect() || err.is_timeout() {
            OllamaError::ConnectionUnavailable {
                base_url: self.config.base_url.clone(),
            }
        } else {
            OllamaError::RequestFailed(err.to_string())
        }
    }
}

/// Quick TCP probe used for the startup status hint. Cheaper than a full
/// HTTP round trip and good enough to tell "running" from "not running".
pub fn reachable(base_url: &str) -> bool {
    let Some((host, port)) = host_and_port(base_url) else {
        return false;
    };
    let Ok(mut addrs) = (host.as_str(), port).to_socket_addrs() else {
        return false;
    };
    addrs.any(|addr| TcpStream::connect_timeout(&addr, Duration::from_millis(200)).is_ok())
}

fn host_and_port(base_url: &str) -> Option<(String, u16)> {
    let rest = base_url
        .strip_prefix("http://")
        .or_else(|| base_url.strip_prefix("https://"))?;
    let authority = rest.split('/').next()?;
    match authority.rsplit_once(':') {
        Some((host, port)) => Some((host.to_string(), port.parse().ok()?)),
        None => Some((authority.to_string(), 80)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base_url: String) -> OllamaConfig {
        OllamaConfig {
            base_url,
            generate_timeout: Duration::from_secs(5),
            tags_timeout: Duration::from_secs(5),
        }
    }

    /// Serve exactly one request with a canned status and body, then exit.
    fn one_shot_server(status: u16, body: &'static str) -> String {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        std::thread::spawn(move || {
            if let Ok(req) = server.recv() {
                let response = tiny_http::Response::from_string(body).with_status_code(status);
                let _ = req.respond(response);
            }
        });
        format!("http://{}", addr)
    }

    /// An address that nothing is listening on.
    fn refused_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    #[test]
    fn generate_request_wire_format() {
        let request = GenerateRequest {
            model: "qwen2.5-coder:7b",
            prompt: "write a room",
            stream: false,
            options: GenerateOptions::default(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "qwen2.5-coder:7b");
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["temperature"], 0.3);
        assert_eq!(json["options"]["top_p"], 0.9);
        assert_eq!(json["options"]["num_predict"], 4096);
    }

    #[tokio::test]
    async fn generate_extracts_response_field() {
        let base = one_shot_server(200, r#"{"response": "X"}"#);
        let client = OllamaClient::new(test_config(base));
        let text = client.generate("m", "p").await.unwrap();
        assert_eq!(text, "X");
    }

    #[tokio::test]
    async fn generate_missing_response_field_yields_placeholder() {
        let base = one_shot_server(200, r#"{"model": "m", "done": true}"#);
        let client = OllamaClient::new(test_config(base));
        let text = client.generate("m", "p").await.unwrap();
        assert_eq!(text, NO_RESPONSE_PLACEHOLDER);
    }

    #[tokio::test]
    async fn generate_non_success_status_is_server_error() {
        let base = one_shot_server(500, "boom");
        let client = OllamaClient::new(test_config(base));
        match client.generate("m", "p").await {
            Err(OllamaError::ServerError(500)) => {}
            other => panic!("expected ServerError(500), got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn generate_connection_refused_is_connection_unavailable() {
        let client = OllamaClient::new(test_config(refused_url()));
        match client.generate("m", "p").await {
            Err(OllamaError::ConnectionUnavailable { .. }) => {}
            other => panic!("expected ConnectionUnavailable, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn generate_timeout_is_connection_unavailable() {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        std::thread::spawn(move || {
            if let Ok(req) = server.recv() {
                std::thread::sleep(Duration::from_millis(500));
                let _ = req.respond(tiny_http::Response::from_string("{}"));
            }
        });
        let config = OllamaConfig {
            base_url: format!("http://{}", addr),
            generate_timeout: Duration::from_millis(100),
            tags_timeout: Duration::from_millis(100),
        };
        let client = OllamaClient::new(config);
        match client.generate("m", "p").await {
            Err(OllamaError::ConnectionUnavailable { .. }) => {}
            other => panic!("expected ConnectionUnavailable, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn generate_garbage_body_is_request_failed() {
        let base = one_shot_server(200, "not json at all");
        let client = OllamaClient::new(test_config(base));
        match client.generate("m", "p").await {
            Err(OllamaError::RequestFailed(_)) => {}
            other => panic!("expected RequestFailed, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn list_models_parses_names() {
        let base = one_shot_server(
            200,
            r#"{"models": [{"name": "qwen2.5-coder:7b"}, {"name": "llama2:latest"}]}"#,
        );
        let client = OllamaClient::new(test_config(base));
        let models = client.list_models().await.unwrap();
        assert_eq!(models, vec!["qwen2.5-coder:7b", "llama2:latest"]);
    }

    #[tokio::test]
    async fn list_models_refused_is_connection_unavailable() {
        let client = OllamaClient::new(test_config(refused_url()));
        assert!(matches!(
            client.list_models().await,
            Err(OllamaError::ConnectionUnavailable { .. })
        ));
    }

    #[test]
    fn host_and_port_parsing() {
        assert_eq!(
            host_and_port("http://localhost:11434"),
            Some(("localhost".to_string(), 11434))
        );
        assert_eq!(
            host_and_port("http://127.0.0.1:11434/api"),
            Some(("127.0.0.1".to_string(), 11434))
        );
        assert_eq!(host_and_port("ftp://nope"), None);
    }

    #[test]
    fn reachable_is_false_for_closed_port() {
        assert!(!reachable(&refused_url()));
    }
}
