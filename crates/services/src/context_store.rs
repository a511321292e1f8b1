//! Context template store.
//!
//! Each context category maps to one template file under the templates
//! folder. A missing or unreadable template is a warning, never an error:
//! the caller gets empty text plus a message to show, and the question
//! still goes out without boilerplate.

use std::fs;
use std::path::PathBuf;

use shared::context::ContextCategory;
use tracing::warn;

/// Result of one template load. `warning` is set when the text came back
/// empty because the file could not be read.
pub struct ContextLoad {
    pub text: String,
    pub warning: Option<String>,
}

pub struct ContextStore {
    templates_dir: PathBuf,
}

impl ContextStore {
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
        }
    }

    pub fn load(&self, category: ContextCategory) -> ContextLoad {
        let path = self.templates_dir.join(category.template_file());
        match fs::read_to_string(&path) {
            Ok(text) => ContextLoad {
                text,
                warning: None,
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not load context template");
                ContextLoad {
                    text: String::new(),
                    warning: Some(format!(
                        "Could not load context '{}': {}",
                        category.label(),
                        e
                    )),
                }
            }
        }
    }

    /// Create the templates folder and write built-in defaults for any
    /// template that is missing, so a fresh install works out of the box.
    /// Existing files are left untouched.
    pub fn ensure_templates_exist(&self) -> anyhow::Result<()> {
        fs::create_dir_all(&self.templates_dir)?;
        for category in ContextCategory::ALL {
            let path = self.templates_dir.join(category.template_file());
            if !path.exists() {
                fs::write(&path, default_template(category))?;
            }
        }
        Ok(())
    }
}

fn default_template(category: ContextCategory) -> &'static str {
    match category {
        ContextCategory::Driver => {
            "You are helping implement an LPC MUD driver in C.\n\
             Target: a single-threaded select()-based driver with an LPC compiler,\n\
             bytecode interpreter, and object table. Prefer portable C99.\n"
        }
        ContextCategory::Efuns => {
            "You are implementing efuns (external functions) exposed by an LPC MUD\n\
             driver to mudlib code. Each efun validates its arguments from the VM\n\
             stack, performs the operation, and pushes the result.\n"
        }
        ContextCategory::Mudlib => {
            "You are writing LPC mudlib code (rooms, objects, daemons, commands)\n\
             for a FluffOS-compatible mudlib. Follow classic inherit-based mudlib\n\
             structure and use efuns where available.\n"
        }
        ContextCategory::References => {
            "Reference library sources are available under mud-references/.\n\
             Use idioms from FluffOS, Nightmare and Merentha when proposing code.\n"
        }
    }
}
