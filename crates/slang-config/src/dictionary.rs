use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_seed_path() -> PathBuf {
    PathBuf::from("slang.txt")
}

fn default_working_path() -> PathBuf {
    PathBuf::from("new_slang.txt")
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Read-only dictionary shipped with the app
    #[serde(default = "default_seed_path")]
    pub seed_path: PathBuf,
    /// Mutable copy holding all user edits
    #[serde(default = "default_working_path")]
    pub working_path: PathBuf,
}

impl DictionaryConfig {
    pub fn new() -> Self {
        let seed_path = env::var("SLANG_SEED_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_seed_path());

        let working_path = env::var("SLANG_WORKING_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_working_path());

        Self {
            seed_path,
            working_path,
        }
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            seed_path: default_seed_path(),
            working_path: default_working_path(),
        }
    }
}
