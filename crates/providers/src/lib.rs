pub mod error;
pub mod ollama;

pub use error::OllamaError;
pub use ollama::{OllamaClient, OllamaConfig};
