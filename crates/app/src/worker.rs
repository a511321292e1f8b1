//! Background worker for one ask action.
//!
//! The GUI thread never blocks on the network: each ask spawns one worker
//! thread that composes the full prompt, performs the single HTTP exchange
//! and reports back over a channel. The sender moves into the thread and
//! drops after its single send, so the receiver observes exactly one
//! outcome followed by a disconnect — never zero, never two.

use std::sync::mpsc::{channel, Receiver};
use std::thread;

use providers::{OllamaClient, OllamaConfig};
use shared::prompt;
use tracing::{error, info};

use crate::types::AskResult;

pub fn spawn_generation(
    config: OllamaConfig,
    model: String,
    question: String,
    context_text: String,
) -> Receiver<AskResult> {
    let (tx, rx) = channel::<AskResult>();

    thread::spawn(move || {
        let full_prompt = prompt::compose(&context_text, &question);

        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                let _ = tx.send(AskResult {
                    response: String::new(),
                    error: Some(format!("Failed to start async runtime: {e}")),
                });
                return;
            }
        };

        let client = OllamaClient::new(config);
        let result = match rt.block_on(client.generate(&model, &full_prompt)) {
            Ok(response) => {
                info!(model, chars = response.len(), "generation complete");
                AskResult {
                    response,
                    error: None,
                }
            }
            Err(e) => {
                error!(model, error = %e, "generation failed");
                AskResult {
                    response: String::new(),
                    error: Some(e.to_string()),
                }
            }
        };
        let _ = tx.send(result);
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::RecvError;
    use std::time::Duration;

    fn test_config(base_url: String) -> OllamaConfig {
        OllamaConfig {
            base_url,
            generate_timeout: Duration::from_secs(5),
            tags_timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn worker_delivers_exactly_one_success_outcome() {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        std::thread::spawn(move || {
            if let Ok(req) = server.recv() {
                let _ = req.respond(tiny_http::Response::from_string(r#"{"response": "hello"}"#));
            }
        });

        let rx = spawn_generation(
            test_config(format!("http://{}", addr)),
            "test-model".into(),
            "question".into(),
            "context".into(),
        );

        let outcome = rx.recv().unwrap();
        assert_eq!(outcome.response, "hello");
        assert!(outcome.error.is_none());

        // Sender dropped after the single send: no second outcome.
        assert_eq!(rx.recv().unwrap_err(), RecvError);
    }

    #[test]
    fn worker_delivers_exactly_one_failure_outcome() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let rx = spawn_generation(
            test_config(format!("http://{}", addr)),
            "test-model".into(),
            "question".into(),
            String::new(),
        );

        let outcome = rx.recv().unwrap();
        assert!(outcome.response.is_empty());
        let error = outcome.error.expect("failure outcome should carry an error");
        assert!(error.contains("connect to Ollama"));

        assert_eq!(rx.recv().unwrap_err(), RecvError);
    }
}
