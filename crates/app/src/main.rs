//! LPC MUD Development Assistant — native egui front-end.
//!
//! All presentational state lives on the GUI thread. Long-running work
//! (generation, model listing) happens on background threads that report
//! back over channels polled once per frame.

use eframe::egui;
use parking_lot::Mutex;
use std::sync::Arc;

mod state;
mod types;
mod worker;

use types::{AppState, REFS_DISPLAY_LIMIT};

const STATUS_OK: egui::Color32 = egui::Color32::from_rgb(76, 175, 80);
const STATUS_ERR: egui::Color32 = egui::Color32::from_rgb(244, 67, 54);

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([800.0, 600.0]),
        vsync: true,
        ..Default::default()
    };
    eframe::run_native(
        "LPC MUD Development Assistant",
        options,
        Box::new(|cc| {
            let mut app_state = AppState::load();
            cc.egui_ctx.set_visuals(if app_state.settings.dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            app_state.start_model_load();
            Box::new(AssistantApp {
                state: Arc::new(Mutex::new(app_state)),
            })
        }),
    )
}

struct AssistantApp {
    state: Arc<Mutex<AppState>>,
}

impl eframe::App for AssistantApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut guard = self.state.lock();
        let s = &mut *guard;

        // Poll background channels (non-blocking)
        s.poll_models();
        s.poll_ask_result();

        // Keep repainting while anything is pending so polls keep running
        if s.ask_in_flight() || s.models_rx.is_some() {
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("🎮 LPC MUD Development Assistant");
            ui.add_space(8.0);

            controls_row(ui, ctx, s);
            status_line(ui, s);

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(8.0);

            question_section(ui, s);
            ui.add_space(8.0);
            response_section(ui, s);
            ui.add_space(8.0);
            references_section(ui, s);
        });
    }
}

fn controls_row(ui: &mut egui::Ui, ctx: &egui::Context, s: &mut AppState) {
    ui.horizontal(|ui| {
        let theme_label = if s.settings.dark_mode { "☀️" } else { "🌙" };
        if ui.button(theme_label).clicked() {
            s.settings.dark_mode = !s.settings.dark_mode;
            ctx.set_visuals(if s.settings.dark_mode {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
            if let Err(e) = state::save_settings(&s.settings) {
                tracing::warn!(error = %e, "could not persist settings");
            }
        }

        ui.add_space(8.0);

        ui.label("Model:");
        let model_label = s
            .selected_model
            .and_then(|i| s.models.get(i))
            .cloned()
            .unwrap_or_else(|| "Select model...".to_string());
        egui::ComboBox::from_id_source("model_select")
            .selected_text(model_label)
            .width(220.0)
            .show_ui(ui, |ui| {
                for (i, name) in s.models.iter().enumerate() {
                    ui.selectable_value(&mut s.selected_model, Some(i), name.as_str());
                }
            });

        ui.add_space(8.0);

        ui.label("Context:");
        egui::ComboBox::from_id_source("context_select")
            .selected_text(s.selected_category.label())
            .width(180.0)
            .show_ui(ui, |ui| {
                for category in shared::context::ContextCategory::ALL {
                    ui.selectable_value(&mut s.selected_category, category, category.label());
                }
            });

        ui.add_space(8.0);

        let generate_label = if s.ask_in_flight() {
            "⏳ Generating..."
        } else {
            "🚀 Ask Ollama"
        };
        if ui
            .add_enabled(!s.ask_in_flight(), egui::Button::new(generate_label))
            .clicked()
        {
            s.start_ask();
        }

        if ui
            .add_enabled(!s.current_response.is_empty(), egui::Button::new("💾 Save"))
            .clicked()
        {
            s.save_current_response();
        }

        if ui.button("🔍 Search Refs").clicked() {
            s.search_references();
        }
    });
}

fn status_line(ui: &mut egui::Ui, s: &AppState) {
    if s.status_message.is_empty() {
        return;
    }
    ui.add_space(4.0);
    let color = if s.status_is_error { STATUS_ERR } else { STATUS_OK };
    ui.colored_label(color, &s.status_message);
}

fn question_section(ui: &mut egui::Ui, s: &mut AppState) {
    ui.label("📝 Your Question:");
    ui.add(
        egui::TextEdit::multiline(&mut s.question)
            .desired_width(f32::INFINITY)
            .desired_rows(5)
            .hint_text(
                "Ask about LPC driver implementation, mudlib features, or C programming...\n\n\
                 Examples:\n\
                 - Write the complete lexer.c for LPC tokens\n\
                 - Implement the VM bytecode interpreter\n\
                 - Create a combat system for the mudlib",
            )
            .font(egui::FontId::monospace(13.0)),
    );
}

fn response_section(ui: &mut egui::Ui, s: &AppState) {
    ui.label("💬 Response:");
    let display = if s.response_display.is_empty() {
        "Response will appear here...\n\n💡 Tip: select a model, choose context, and ask a question!"
    } else {
        s.response_display.as_str()
    };
    egui::ScrollArea::vertical()
        .id_source("response_scroll")
        .max_height(320.0)
        .show(ui, |ui| {
            // &str buffer: selectable/copyable but read-only
            let mut buffer = display;
            ui.add(
                egui::TextEdit::multiline(&mut buffer)
                    .desired_width(f32::INFINITY)
                    .font(egui::FontId::monospace(12.0))
                    .code_editor(),
            );
        });
}

fn references_section(ui: &mut egui::Ui, s: &AppState) {
    ui.label("📚 References:");
    egui::ScrollArea::vertical()
        .id_source("refs_scroll")
        .max_height(150.0)
        .show(ui, |ui| {
            if s.references.is_empty() {
                ui.label("No references searched yet\n\nClick 'Search Refs' to scan the mud-references folder");
                return;
            }
            for (i, path) in s.references.iter().take(REFS_DISPLAY_LIMIT).enumerate() {
                ui.label(format!("{}. {}", i + 1, path.display()));
            }
            if s.references.len() > REFS_DISPLAY_LIMIT {
                ui.label(format!(
                    "... and {} more files",
                    s.references.len() - REFS_DISPLAY_LIMIT
                ));
            }
        });
}
