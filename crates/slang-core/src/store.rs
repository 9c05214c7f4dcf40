use std::path::PathBuf;

use slang_types::AddMode;

use crate::dictionary::{Dictionary, Entry};
use crate::error::{PersistenceError, StoreError};
use crate::persistence::{self, DELIMITER};
use crate::preprocess::{DefaultPreprocessor, Preprocessor};
use crate::random::RandomSource;

#[derive(Debug, Clone)]
pub struct StorePaths {
    /// Original dictionary, only ever read
    pub seed: PathBuf,
    /// Copy that receives every edit
    pub working: PathBuf,
}

impl StorePaths {
    pub fn new(seed: impl Into<PathBuf>, working: impl Into<PathBuf>) -> Self {
        Self {
            seed: seed.into(),
            working: working.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Inserted,
    Overwritten { term: String },
    Appended { term: String },
    /// Append requested but every sense was already there
    AlreadyPresent { term: String },
    Duplicated { term: String },
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionMatch {
    pub term: String,
    /// The full definition field, senses joined as on disk
    pub definition: String,
}

/// Slang dictionary backed by a working file.
///
/// Every mutation is applied to a copy, written out, and only then becomes
/// the in-memory state, so a failed save changes nothing.
pub struct SlangStore {
    paths: StorePaths,
    dictionary: Dictionary,
    preprocessor: DefaultPreprocessor,
}

impl SlangStore {
    /// Seed the working file if needed and load it
    pub fn open(paths: StorePaths) -> Result<Self, PersistenceError> {
        persistence::ensure_working_copy(&paths.seed, &paths.working)?;
        let dictionary = persistence::load(&paths.working)?;

        Ok(Self {
            paths,
            dictionary,
            preprocessor: DefaultPreprocessor,
        })
    }

    /// Store with no entries, for when the files cannot be read
    pub fn empty(paths: StorePaths) -> Self {
        Self {
            paths,
            dictionary: Dictionary::new(),
            preprocessor: DefaultPreprocessor,
        }
    }

    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn len(&self) -> usize {
        self.dictionary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }

    pub fn lookup_exact(&self, term: &str) -> Option<&Entry> {
        self.dictionary.get(term)
    }

    pub fn lookup_case_insensitive(&self, term: &str) -> Option<&Entry> {
        let term = self.preprocessor.process(term);
        if term.is_empty() {
            return None;
        }
        self.dictionary.find_case_insensitive(&term)
    }

    /// Entries whose definition field contains `keyword`, ignoring case.
    /// An empty keyword matches nothing.
    pub fn search_by_definition(&self, keyword: &str) -> Vec<DefinitionMatch> {
        let keyword = self.preprocessor.process(keyword);
        if keyword.is_empty() {
            return Vec::new();
        }

        let needle = self.preprocessor.fold(&keyword);
        self.dictionary
            .iter()
            .filter_map(|entry| {
                let definition = persistence::join_senses(&entry.senses);
                self.preprocessor
                    .fold(&definition)
                    .contains(&needle)
                    .then(|| DefinitionMatch {
                        term: entry.term.clone(),
                        definition,
                    })
            })
            .collect()
    }

    /// Add `definition` under `term`. `mode` only matters when the term
    /// already exists ignoring case.
    pub fn add(
        &mut self,
        term: &str,
        definition: &str,
        mode: AddMode,
    ) -> Result<AddOutcome, StoreError> {
        let term = self.clean_term(term)?;
        let senses = self.clean_definition(definition)?;

        let Some(existing) = self.dictionary.find_case_insensitive(&term).cloned() else {
            let mut next = self.dictionary.clone();
            next.replace_senses(&term, senses);
            self.commit(next)?;
            tracing::info!("Added slang '{}'", term);
            return Ok(AddOutcome::Inserted);
        };

        let mut next = self.dictionary.clone();
        let outcome = match mode {
            AddMode::Cancel => return Ok(AddOutcome::Cancelled),
            AddMode::Overwrite => {
                next.replace_senses(&existing.term, senses);
                AddOutcome::Overwritten {
                    term: existing.term,
                }
            }
            AddMode::AppendSense => {
                let fresh: Vec<String> =
                    senses.into_iter().filter(|s| !existing.covers(s)).collect();
                if fresh.is_empty() {
                    return Ok(AddOutcome::AlreadyPresent {
                        term: existing.term,
                    });
                }
                next.extend_senses(&existing.term, fresh);
                AddOutcome::Appended {
                    term: existing.term,
                }
            }
            AddMode::Duplicate => {
                let key = self.duplicate_key(&term);
                let mut copied = existing.senses.clone();
                copied.extend(senses.into_iter().filter(|s| !existing.covers(s)));
                next.replace_senses(&key, copied);
                AddOutcome::Duplicated { term: key }
            }
        };

        self.commit(next)?;
        tracing::info!("Added slang '{}': {:?}", term, outcome);
        Ok(outcome)
    }

    /// Replace every sense of `term` with `definition`. Returns the stored
    /// spelling of the edited term.
    pub fn edit(&mut self, term: &str, definition: &str) -> Result<String, StoreError> {
        let key = self.resolve(term)?;
        let senses = self.clean_definition(definition)?;

        let mut next = self.dictionary.clone();
        next.replace_senses(&key, senses);
        self.commit(next)?;

        tracing::info!("Edited slang '{}'", key);
        Ok(key)
    }

    pub fn delete(&mut self, term: &str) -> Result<Entry, StoreError> {
        let key = self.resolve(term)?;

        let mut next = self.dictionary.clone();
        let removed = next
            .remove(&key)
            .ok_or_else(|| StoreError::NotFound(key.clone()))?;
        self.commit(next)?;

        tracing::info!("Deleted slang '{}'", key);
        Ok(removed)
    }

    pub fn random_entry<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Option<&Entry> {
        if self.dictionary.is_empty() {
            return None;
        }
        self.dictionary
            .entry_at(rng.next_index(self.dictionary.len()))
    }

    /// Copy the seed over the working file, dropping all edits.
    ///
    /// The seed is read before anything is overwritten, and memory only
    /// switches once the copy is in place.
    pub fn reset(&mut self) -> Result<(), PersistenceError> {
        if !self.paths.seed.exists() {
            return Err(PersistenceError::SeedMissing(self.paths.seed.clone()));
        }
        let seed = persistence::load(&self.paths.seed)?;
        persistence::copy(&self.paths.seed, &self.paths.working)?;
        self.dictionary = seed;

        tracing::info!("Reset slang to {}", self.paths.seed.display());
        Ok(())
    }

    fn commit(&mut self, next: Dictionary) -> Result<(), PersistenceError> {
        if let Err(e) = persistence::save(&self.paths.working, &next) {
            tracing::error!("Keeping previous state, save failed: {e}");
            return Err(e);
        }
        self.dictionary = next;
        Ok(())
    }

    fn resolve(&self, term: &str) -> Result<String, StoreError> {
        self.lookup_case_insensitive(term)
            .map(|e| e.term.clone())
            .ok_or_else(|| StoreError::NotFound(term.trim().to_string()))
    }

    fn clean_term(&self, term: &str) -> Result<String, StoreError> {
        let term = self.preprocessor.process(term);
        if term.is_empty() {
            return Err(StoreError::InvalidInput("slang word is empty".into()));
        }
        if term.contains(DELIMITER) {
            return Err(StoreError::InvalidInput(format!(
                "slang word may not contain '{DELIMITER}'"
            )));
        }
        Ok(term)
    }

    fn clean_definition(&self, definition: &str) -> Result<Vec<String>, StoreError> {
        let senses = persistence::split_senses(&self.preprocessor.process(definition));
        if senses.is_empty() {
            return Err(StoreError::InvalidInput("definition is empty".into()));
        }
        Ok(senses)
    }

    /// `term` itself if it is free as an exact key, else `term (n)`
    fn duplicate_key(&self, term: &str) -> String {
        if !self.dictionary.contains_term(term) {
            return term.to_string();
        }
        (2..)
            .map(|n| format!("{term} ({n})"))
            .find(|candidate| !self.dictionary.contains_term(candidate))
            .unwrap_or_else(|| term.to_string())
    }
}
