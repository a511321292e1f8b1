//! Core type definitions for the assistant app.

use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use shared::context::ContextCategory;
use shared::settings::AppSettings;

/// Shown in the model selector when the tags endpoint is unavailable.
pub const FALLBACK_MODELS: [&str; 3] = [
    "qwen2.5-coder:7b",
    "qwen2.5:7b-instruct",
    "llama2:latest",
];

/// How many reference paths are rendered before the "+N more" summary.
/// Independent of the scan cap in `services::reference_scan`.
pub const REFS_DISPLAY_LIMIT: usize = 50;

/// Terminal outcome of one ask action. Exactly one of these arrives per
/// request; `error` is `Some` on failure.
#[derive(Debug)]
pub struct AskResult {
    pub response: String,
    pub error: Option<String>,
}

/// Outcome of the startup model listing.
#[derive(Debug)]
pub struct ModelListResult {
    pub models: Vec<String>,
    pub used_fallback: bool,
}

impl ModelListResult {
    pub fn fallback() -> Self {
        Self {
            models: FALLBACK_MODELS.iter().map(|m| m.to_string()).collect(),
            used_fallback: true,
        }
    }
}

pub struct AppState {
    pub settings: AppSettings,

    pub models: Vec<String>,
    pub selected_model: Option<usize>,
    pub selected_category: ContextCategory,
    pub question: String,

    /// Text currently shown in the response area (may be an inline error).
    pub response_display: String,
    /// Last successful response; powers the save action.
    pub current_response: String,

    pub references: Vec<PathBuf>,
    pub status_message: String,
    pub status_is_error: bool,

    /// Pending outcome of an in-flight ask action, if any.
    pub ask_rx: Option<Receiver<AskResult>>,
    pub models_rx: Option<Receiver<ModelListResult>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            settings: AppSettings::default(),
            models: Vec::new(),
            selected_model: None,
            selected_category: ContextCategory::Driver,
            question: String::new(),
            response_display: String::new(),
            current_response: String::new(),
            references: Vec::new(),
            status_message: String::new(),
            status_is_error: false,
            ask_rx: None,
            models_rx: None,
        }
    }
}
