use std::env;

use serde::{Deserialize, Serialize};
use slang_types::QuizDirection;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct QuizConfig {
    pub direction: QuizDirection,
}

impl QuizConfig {
    pub fn new() -> Self {
        let direction = env::var("SLANG_QUIZ_DIRECTION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Self { direction }
    }
}
