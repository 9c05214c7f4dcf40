use serde::{Deserialize, Serialize};

fn default_prompt() -> String {
    "slang> ".to_string()
}

fn default_max_results() -> usize {
    50
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_prompt")]
    pub prompt: String,
    /// Cap on definition search rows printed at once
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            max_results: default_max_results(),
        }
    }
}
