pub mod context;
pub mod prompt;

pub mod settings {
    use serde::{Deserialize, Serialize};

    fn default_workspace_root() -> String {
        "~/mud-workspace".to_string()
    }

    fn default_base_url() -> String {
        "http://localhost:11434".to_string()
    }

    fn default_generate_timeout() -> u64 {
        300
    }

    fn default_tags_timeout() -> u64 {
        5
    }

    /// Where and how to reach the local Ollama server.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct OllamaSettings {
        #[serde(default = "default_base_url")]
        pub base_url: String,
        /// Generation can take minutes on CPU-only machines.
        #[serde(default = "default_generate_timeout")]
        pub generate_timeout_secs: u64,
        /// Listing models should be near-instant; fail fast instead.
        #[serde(default = "default_tags_timeout")]
        pub tags_timeout_secs: u64,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct AppSettings {
        /// Root folder holding `lpc-dev-assistant/` and `mud-references/`.
        /// A leading `~/` is expanded by the app.
        #[serde(default = "default_workspace_root")]
        pub workspace_root: String,
        #[serde(default)]
        pub ollama: OllamaSettings,
        #[serde(default)]
        pub dark_mode: bool,
    }

    impl Default for OllamaSettings {
        fn default() -> Self {
            Self {
                base_url: default_base_url(),
                generate_timeout_secs: default_generate_timeout(),
                tags_timeout_secs: default_tags_timeout(),
            }
        }
    }

    impl Default for AppSettings {
        fn default() -> Self {
            Self {
                workspace_root: default_workspace_root(),
                ollama: OllamaSettings::default(),
                dark_mode: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::settings::AppSettings;

    #[test]
    fn settings_defaults_from_empty_json() {
        let s: AppSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(s.workspace_root, "~/mud-workspace");
        assert_eq!(s.ollama.base_url, "http://localhost:11434");
        assert_eq!(s.ollama.generate_timeout_secs, 300);
        assert_eq!(s.ollama.tags_timeout_secs, 5);
        assert!(!s.dark_mode);
    }

    #[test]
    fn settings_round_trip() {
        let mut s = AppSettings::default();
        s.workspace_root = "/srv/mud".to_string();
        s.ollama.base_url = "http://127.0.0.1:9999".to_string();
        let json = serde_json::to_string(&s).unwrap();
        let back: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.workspace_root, "/srv/mud");
        assert_eq!(back.ollama.base_url, "http://127.0.0.1:9999");
    }
}
