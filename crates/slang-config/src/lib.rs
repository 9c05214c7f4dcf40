use std::env;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::quiz::QuizConfig;
use self::ui::UiConfig;

pub mod dictionary;
pub mod quiz;
pub mod ui;

fn default_channel_capacity() -> usize {
    64
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub quiz: QuizConfig,
    pub ui: UiConfig,

    /// Bound of the channels between the UI and the app loop
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let channel_capacity = env::var("SLANG_CHANNEL_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&v: &usize| v > 0)
            .unwrap_or_else(default_channel_capacity);

        Config {
            dictionary: DictionaryConfig::new(),
            quiz: QuizConfig::new(),
            ui: UiConfig::default(),

            channel_capacity,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dictionary: DictionaryConfig::default(),
            quiz: QuizConfig::default(),
            ui: UiConfig::default(),

            channel_capacity: default_channel_capacity(),
        }
    }
}
