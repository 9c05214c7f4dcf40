use std::collections::HashMap;

use slang_types::DisplayEntry;

use crate::preprocess::{DefaultPreprocessor, Preprocessor};

/// A slang term and its senses, in the order they were learned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub term: String,
    pub senses: Vec<String>,
}

impl Entry {
    pub fn new(term: impl Into<String>, senses: Vec<String>) -> Self {
        Self {
            term: term.into(),
            senses,
        }
    }

    /// Whether any sense already contains `text`
    pub fn covers(&self, text: &str) -> bool {
        self.senses.iter().any(|s| s.contains(text))
    }

    pub fn to_display(&self) -> DisplayEntry {
        DisplayEntry {
            term: self.term.clone(),
            senses: self.senses.clone(),
        }
    }
}

/// Insertion-ordered term -> senses map.
///
/// Keys are unique under exact string equality only; differently cased
/// spellings of the same term may coexist.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: Vec<Entry>,
    term_index: HashMap<String, usize>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn terms(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.term.as_str()).collect()
    }

    pub fn entry_at(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.term_index.contains_key(term)
    }

    /// Case-sensitive lookup
    pub fn get(&self, term: &str) -> Option<&Entry> {
        self.term_index.get(term).and_then(|&idx| self.entries.get(idx))
    }

    /// Exact key first, then the first key in insertion order that matches
    /// ignoring case.
    pub fn find_case_insensitive(&self, term: &str) -> Option<&Entry> {
        if let Some(entry) = self.get(term) {
            return Some(entry);
        }

        let preprocessor = DefaultPreprocessor;
        let needle = preprocessor.fold(term);
        self.entries
            .iter()
            .find(|e| preprocessor.fold(&e.term) == needle)
    }

    /// Add senses to `term`, creating it if needed. Senses the term already
    /// holds verbatim are skipped.
    pub fn extend_senses(&mut self, term: &str, senses: impl IntoIterator<Item = String>) {
        let idx = match self.term_index.get(term) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.entries.push(Entry::new(term, Vec::new()));
                self.term_index.insert(term.to_string(), idx);
                idx
            }
        };

        let entry = &mut self.entries[idx];
        for sense in senses {
            if !entry.senses.contains(&sense) {
                entry.senses.push(sense);
            }
        }
    }

    /// Set the full sense list of `term`, keeping its position if present
    pub fn replace_senses(&mut self, term: &str, senses: Vec<String>) {
        match self.term_index.get(term) {
            Some(&idx) => self.entries[idx].senses = senses,
            None => {
                self.term_index.insert(term.to_string(), self.entries.len());
                self.entries.push(Entry::new(term, senses));
            }
        }
    }

    pub fn remove(&mut self, term: &str) -> Option<Entry> {
        let idx = self.term_index.remove(term)?;
        let removed = self.entries.remove(idx);

        // Positions after the removed entry shifted down by one
        for (i, entry) in self.entries.iter().enumerate().skip(idx) {
            self.term_index.insert(entry.term.clone(), i);
        }

        Some(removed)
    }

    /// Same set of term -> senses pairs, ignoring order
    pub fn same_content(&self, other: &Dictionary) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|e| other.get(&e.term).is_some_and(|o| o.senses == e.senses))
    }
}

impl FromIterator<Entry> for Dictionary {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut dict = Dictionary::new();
        for entry in iter {
            dict.extend_senses(&entry.term, entry.senses);
        }
        dict
    }
}
