//! Context categories the user can pick for a question.
//!
//! Each category maps to one template file under the templates folder and
//! to a short name used when saving generated responses.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContextCategory {
    Driver,
    Efuns,
    Mudlib,
    References,
}

impl ContextCategory {
    pub const ALL: [ContextCategory; 4] = [
        ContextCategory::Driver,
        ContextCategory::Efuns,
        ContextCategory::Mudlib,
        ContextCategory::References,
    ];

    /// Human-readable label shown in the context selector.
    pub fn label(&self) -> &'static str {
        match self {
            ContextCategory::Driver => "Driver Development",
            ContextCategory::Efuns => "Efuns Implementation",
            ContextCategory::Mudlib => "MudLib/LPC Code",
            ContextCategory::References => "Reference Libraries",
        }
    }

    /// Template file holding the boilerplate text for this category.
    pub fn template_file(&self) -> &'static str {
        match self {
            ContextCategory::Driver => "driver_context.txt",
            ContextCategory::Efuns => "efuns_context.txt",
            ContextCategory::Mudlib => "mudlib_context.txt",
            ContextCategory::References => "reference_sources.txt",
        }
    }

    /// Short name used as the saved-response filename prefix.
    pub fn save_prefix(&self) -> &'static str {
        match self {
            ContextCategory::Driver => "driver",
            ContextCategory::Efuns => "efuns",
            ContextCategory::Mudlib => "mudlib",
            ContextCategory::References => "reference",
        }
    }
}
