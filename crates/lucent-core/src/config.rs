use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

fn default_line_count() -> usize {
    40
}

/// Immutable reporting configuration. Loading it is the host's job; the
/// pipeline only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LucentConfig {
    /// Collector credential. Empty disables reporting.
    #[serde(default)]
    pub lucent_key: String,
    /// Collector base url. Empty disables reporting.
    #[serde(default)]
    pub lucent_url: String,
    #[serde(default = "default_true")]
    pub with_request_details: bool,
    #[serde(default = "default_true")]
    pub with_app_details: bool,
    #[serde(default = "default_true")]
    pub with_user_details: bool,
    /// Snippet window size used when resolving frames.
    #[serde(default = "default_line_count")]
    pub line_count: usize,
}

impl Default for LucentConfig {
    fn default() -> Self {
        Self {
            lucent_key: String::new(),
            lucent_url: String::new(),
            with_request_details: true,
            with_app_details: true,
            with_user_details: true,
            line_count: 40,
        }
    }
}
