use slang_types::{AddMode, QuizDirection};

use crate::dictionary::Entry;
use crate::error::{PersistenceError, QuizError, StoreError};
use crate::history::HistoryLog;
use crate::quiz::{self, Grade, Question, QuizGenerator};
use crate::random::RandomSource;
use crate::store::{AddOutcome, DefinitionMatch, SlangStore};

/// Everything one user works with: the store, the lookup history and the
/// quiz in progress. Built once at startup and owned by the app loop.
pub struct Session<R> {
    store: SlangStore,
    history: HistoryLog,
    quiz: QuizGenerator,
    rng: R,
    pending: Option<Question>,
}

impl<R: RandomSource> Session<R> {
    pub fn new(store: SlangStore, direction: QuizDirection, rng: R) -> Self {
        Self {
            store,
            history: HistoryLog::new(),
            quiz: QuizGenerator::new(direction),
            rng,
            pending: None,
        }
    }

    pub fn store(&self) -> &SlangStore {
        &self.store
    }

    /// Case-insensitive term lookup, recorded in the history hit or miss
    pub fn search_term(&mut self, term: &str) -> Option<&Entry> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }
        self.history.record(term);
        self.store.lookup_case_insensitive(term)
    }

    pub fn search_definition(&self, keyword: &str) -> Vec<DefinitionMatch> {
        self.store.search_by_definition(keyword)
    }

    /// Stored spelling of `term` if it exists ignoring case
    pub fn existing_term(&self, term: &str) -> Option<&str> {
        self.store
            .lookup_case_insensitive(term)
            .map(|e| e.term.as_str())
    }

    pub fn add(
        &mut self,
        term: &str,
        definition: &str,
        mode: AddMode,
    ) -> Result<AddOutcome, StoreError> {
        self.store.add(term, definition, mode)
    }

    pub fn edit(&mut self, term: &str, definition: &str) -> Result<String, StoreError> {
        self.store.edit(term, definition)
    }

    pub fn delete(&mut self, term: &str) -> Result<Entry, StoreError> {
        self.store.delete(term)
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn random(&mut self) -> Option<&Entry> {
        self.store.random_entry(&mut self.rng)
    }

    /// Generate a question and keep it until it is answered
    pub fn start_quiz(&mut self) -> Result<&Question, QuizError> {
        let question = self.quiz.generate(self.store.dictionary(), &mut self.rng)?;
        Ok(self.pending.insert(question))
    }

    pub fn pending_quiz(&self) -> Option<&Question> {
        self.pending.as_ref()
    }

    /// Grade the pending question by choice index and clear it
    pub fn answer_quiz(&mut self, index: usize) -> Result<Grade, QuizError> {
        let question = self.pending.as_ref().ok_or(QuizError::NoQuestion)?;
        let grade = quiz::grade_index(question, index)?;
        self.pending = None;
        Ok(grade)
    }

    pub fn reset(&mut self) -> Result<(), PersistenceError> {
        self.pending = None;
        self.store.reset()
    }
}
