//! State management for the assistant app.
//!
//! AppState methods wire user actions to the services and providers
//! crates, and poll the background channels each frame.

use std::path::PathBuf;
use std::sync::mpsc::channel;

use anyhow::Context;
use providers::{OllamaClient, OllamaConfig};
use services::context_store::ContextStore;
use services::output::save_response;
use services::reference_scan::scan_references;
use tracing::warn;

use crate::types::{AppState, ModelListResult};
use crate::worker;

pub fn expand_user_path(path_str: &str) -> PathBuf {
    if let Some(stripped) = path_str.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path_str)
}

fn config_path() -> Option<PathBuf> {
    let proj = directories::ProjectDirs::from("com.local", "LPC Dev Assistant", "LpcDevAssistant")?;
    let _ = std::fs::create_dir_all(proj.config_dir());
    Some(proj.config_dir().join("settings.json"))
}

fn load_settings() -> shared::settings::AppSettings {
    let Some(path) = config_path() else {
        return shared::settings::AppSettings::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "settings file unreadable, using defaults");
            shared::settings::AppSettings::default()
        }),
        Err(_) => shared::settings::AppSettings::default(),
    }
}

pub fn save_settings(settings: &shared::settings::AppSettings) -> anyhow::Result<()> {
    let path = config_path().context("no config directory available")?;
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

impl AppState {
    /// Build startup state: persisted settings, default templates, and a
    /// reachability hint if the backend isn't up yet.
    pub fn load() -> Self {
        let mut state = Self {
            settings: load_settings(),
            ..Self::default()
        };

        if let Err(e) = ContextStore::new(state.templates_dir()).ensure_templates_exist() {
            warn!(error = %e, "could not create default templates");
        }

        if !providers::ollama::reachable(&state.settings.ollama.base_url) {
            state.set_status(
                format!(
                    "Ollama is not reachable at {} — start it with `ollama serve`",
                    state.settings.ollama.base_url
                ),
                true,
            );
        }

        state
    }

    pub fn workspace_root(&self) -> PathBuf {
        expand_user_path(&self.settings.workspace_root)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.workspace_root().join("lpc-dev-assistant").join("templates")
    }

    pub fn gen_dir(&self) -> PathBuf {
        self.workspace_root().join("lpc-dev-assistant").join("gen")
    }

    pub fn references_dir(&self) -> PathBuf {
        self.workspace_root().join("mud-references").join("extracted")
    }

    pub fn set_status(&mut self, message: impl Into<String>, is_error: bool) {
        self.status_message = message.into();
        self.status_is_error = is_error;
    }

    pub fn ask_in_flight(&self) -> bool {
        self.ask_rx.is_some()
    }

    /// Fetch the model list off the GUI thread. Falls back to the fixed
    /// list when the tags endpoint is unavailable or empty.
    pub fn start_model_load(&mut self) {
        let (tx, rx) = channel::<ModelListResult>();
        self.models_rx = Some(rx);
        let config = OllamaConfig::from(&self.settings.ollama);

        std::thread::spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(_) => {
                    let _ = tx.send(ModelListResult::fallback());
                    return;
                }
            };
            let client = OllamaClient::new(config);
            let result = match rt.block_on(client.list_models()) {
                Ok(models) if !models.is_empty() => ModelListResult {
                    models,
                    used_fallback: false,
                },
                Ok(_) => ModelListResult::fallback(),
                Err(e) => {
                    warn!(error = %e, "model listing failed, using fallback list");
                    ModelListResult::fallback()
                }
            };
            let _ = tx.send(result);
        });
    }

    pub fn poll_models(&mut self) {
        if let Some(rx) = &self.models_rx {
            if let Ok(result) = rx.try_recv() {
                self.models_rx = None;
                self.models = result.models;
                if self.selected_model.is_none() && !self.models.is_empty() {
                    self.selected_model = Some(0);
                }
                if result.used_fallback && self.status_message.is_empty() {
                    self.set_status("Ollama model list unavailable — showing defaults", false);
                }
            }
        }
    }

    /// Kick off one ask action. At most one request may be in flight: a
    /// second start while one is pending is rejected here, regardless of
    /// whatever the button enablement does.
    pub fn start_ask(&mut self) {
        if self.ask_in_flight() {
            self.set_status("A request is already running — wait for it to finish", true);
            return;
        }
        if self.question.trim().is_empty() {
            self.set_status("Please enter a question", true);
            return;
        }
        let Some(model) = self.selected_model.and_then(|i| self.models.get(i)).cloned() else {
            self.set_status("Please select a model", true);
            return;
        };

        let load = ContextStore::new(self.templates_dir()).load(self.selected_category);
        if let Some(warning) = load.warning {
            // Non-fatal: the question still goes out without boilerplate.
            self.set_status(warning, true);
        } else {
            self.set_status("Generating response...", false);
        }

        self.response_display =
            "Generating response from Ollama...\nThis may take 30-60 seconds.".to_string();

        self.ask_rx = Some(worker::spawn_generation(
            OllamaConfig::from(&self.settings.ollama),
            model,
            self.question.clone(),
            load.text,
        ));
    }

    /// Check for a completed ask action (called each frame).
    pub fn poll_ask_result(&mut self) {
        if let Some(rx) = &self.ask_rx {
            if let Ok(result) = rx.try_recv() {
                self.ask_rx = None;
                match result.error {
                    None => {
                        self.current_response = result.response.clone();
                        self.response_display = result.response;
                        self.set_status("Response received", false);
                    }
                    Some(error) => {
                        self.response_display = format!("Error: {error}");
                        self.set_status(error, true);
                    }
                }
            }
        }
    }

    pub fn search_references(&mut self) {
        let root = self.references_dir();
        match scan_references(&root) {
            Ok(found) => {
                self.set_status(format!("Found {} reference files", found.len()), false);
                self.references = found;
            }
            Err(e) => {
                self.references.clear();
                self.set_status(e.to_string(), true);
            }
        }
    }

    pub fn save_current_response(&mut self) {
        if self.current_response.is_empty() {
            self.set_status("No response to save", true);
            return;
        }
        match save_response(&self.gen_dir(), self.selected_category, &self.current_response) {
            Ok(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.set_status(format!("Saved to: {name}"), false);
            }
            Err(e) => self.set_status(format!("Save failed: {e}"), true),
        }
    }
}
