pub mod dictionary;
pub mod error;
pub mod history;
pub mod persistence;
pub mod preprocess;
pub mod quiz;
pub mod random;
pub mod session;
pub mod store;

pub use dictionary::{Dictionary, Entry};
pub use error::{PersistenceError, QuizError, StoreError};
pub use history::HistoryLog;
pub use quiz::{Choice, Grade, Question, QuizGenerator};
pub use random::{RandomSource, RngSource};
pub use session::Session;
pub use store::{AddOutcome, DefinitionMatch, SlangStore, StorePaths};
