use thiserror::Error;

/// Failure modes of one Ollama request/response exchange.
#[derive(Debug, Error)]
pub enum OllamaError {
    /// The server could not be reached at all (refused, unreachable, or
    /// timed out without answering).
    #[error("cannot connect to Ollama at {base_url}. Is it running? (ollama serve)")]
    ConnectionUnavailable { base_url: String },

    /// The server answered with a non-success HTTP status.
    #[error("Ollama returned HTTP {0}")]
    ServerError(u16),

    /// Anything else that went wrong during the exchange.
    #[error("Ollama request failed: {0}")]
    RequestFailed(String),
}
