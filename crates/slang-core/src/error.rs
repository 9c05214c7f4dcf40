use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Seed file not found: {}", .0.display())]
    SeedMissing(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Slang not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    #[error("Not enough slang words for a quiz: {available} available, {required} required")]
    InsufficientData { available: usize, required: usize },

    #[error("No quiz in progress")]
    NoQuestion,

    #[error("Choice {index} is out of range")]
    InvalidChoice { index: usize },
}
