/// Terms looked up during this run, oldest first. Not persisted.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<String>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, term: impl Into<String>) {
        self.entries.push(term.into());
    }

    pub fn all(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
