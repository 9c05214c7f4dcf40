use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Command issued by the presentation layer
    Ui(UiEvent),
    /// A single term with all its senses (search by term, random)
    ShowEntry(DisplayEntry),
    /// Definition keyword search results, possibly empty
    ShowMatches {
        keyword: String,
        matches: Vec<DisplayMatch>,
    },
    ShowHistory(Vec<String>),
    /// Stored spelling of a term the user asked to delete, awaiting confirmation
    ConfirmDelete(String),
    /// The term being added already exists; the UI must pick an [`AddMode`]
    AddConflict {
        existing: String,
        term: String,
        definition: String,
    },
    ShowQuiz(QuizView),
    QuizGraded {
        correct: bool,
        answer: String,
    },
    Message(String),
    Error(String),
    BackendReady,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    SearchTerm(String),
    SearchDefinition(String),
    Add {
        term: String,
        definition: String,
        mode: Option<AddMode>,
    },
    Edit {
        term: String,
        definition: String,
    },
    /// Resolve a term before asking the user to confirm its deletion
    PrepareDelete(String),
    Delete(String),
    ShowHistory,
    Random,
    StartQuiz,
    /// Zero-based index into the choices of the pending quiz
    AnswerQuiz(usize),
    Reset,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEntry {
    pub term: String,
    pub senses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayMatch {
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Clone)]
pub struct QuizView {
    pub direction: QuizDirection,
    pub prompt: String,
    pub choices: Vec<String>,
}

/// What to do when an added term already exists (case-insensitively)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddMode {
    /// Replace every sense with the new definition
    Overwrite,
    /// Keep existing senses and add the new definition as another sense
    AppendSense,
    /// Create a separate key carrying the existing senses
    Duplicate,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizDirection {
    /// Show a term, choose among definitions
    TermToDefinition,
    /// Show a definition, choose among terms
    DefinitionToTerm,
    /// Pick one of the two per question
    #[default]
    Mixed,
}

impl QuizDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizDirection::TermToDefinition => "term",
            QuizDirection::DefinitionToTerm => "definition",
            QuizDirection::Mixed => "mixed",
        }
    }
}

impl fmt::Display for QuizDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuizDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "term" | "term_to_definition" => Ok(QuizDirection::TermToDefinition),
            "definition" | "definition_to_term" => Ok(QuizDirection::DefinitionToTerm),
            "mixed" | "random" => Ok(QuizDirection::Mixed),
            other => Err(format!("unknown quiz direction '{other}'")),
        }
    }
}
