use slang_types::{QuizDirection, QuizView};

use crate::dictionary::{Dictionary, Entry};
use crate::error::QuizError;
use crate::random::{RandomSource, shuffle};

/// Options offered per question
pub const CHOICE_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub term: String,
    /// What the player sees: the term, or one of its senses
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Question {
    direction: QuizDirection,
    prompt: String,
    choices: Vec<Choice>,
    answer_index: usize,
}

impl Question {
    /// Either `TermToDefinition` or `DefinitionToTerm`, never `Mixed`
    pub fn direction(&self) -> QuizDirection {
        self.direction
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn answer_index(&self) -> usize {
        self.answer_index
    }

    pub fn answer(&self) -> &str {
        &self.choices[self.answer_index].text
    }

    pub fn to_view(&self) -> QuizView {
        QuizView {
            direction: self.direction,
            prompt: self.prompt.clone(),
            choices: self.choices.iter().map(|c| c.text.clone()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grade {
    Correct,
    Incorrect { answer: String },
}

impl Grade {
    pub fn is_correct(&self) -> bool {
        matches!(self, Grade::Correct)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QuizGenerator {
    direction: QuizDirection,
}

impl QuizGenerator {
    pub fn new(direction: QuizDirection) -> Self {
        Self { direction }
    }

    pub fn direction(&self) -> QuizDirection {
        self.direction
    }

    /// Build a four-choice question with exactly one correct option
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        dict: &Dictionary,
        rng: &mut R,
    ) -> Result<Question, QuizError> {
        if dict.len() < CHOICE_COUNT {
            return Err(QuizError::InsufficientData {
                available: dict.len(),
                required: CHOICE_COUNT,
            });
        }

        let direction = match self.direction {
            QuizDirection::Mixed if rng.coin() => QuizDirection::TermToDefinition,
            QuizDirection::Mixed => QuizDirection::DefinitionToTerm,
            fixed => fixed,
        };

        let entries: Vec<&Entry> = dict.iter().collect();
        let correct = entries[rng.next_index(entries.len())];
        let correct_sense = pick_sense(correct, rng);

        let mut order: Vec<usize> = (0..entries.len()).collect();
        shuffle(&mut order, rng);

        // No two choices show the same sense, and no distractor term holds
        // the prompted sense
        let mut used = vec![correct_sense.clone()];
        let mut choices = Vec::with_capacity(CHOICE_COUNT);
        for entry in order.into_iter().map(|idx| entries[idx]) {
            if choices.len() == CHOICE_COUNT - 1 {
                break;
            }
            if entry.term == correct.term {
                continue;
            }
            let text = match direction {
                QuizDirection::DefinitionToTerm if entry.senses.contains(&correct_sense) => {
                    continue;
                }
                QuizDirection::DefinitionToTerm => entry.term.clone(),
                _ => match unused_sense(entry, &used, rng) {
                    Some(sense) => {
                        used.push(sense.clone());
                        sense
                    }
                    None => continue,
                },
            };
            choices.push(Choice {
                term: entry.term.clone(),
                text,
            });
        }

        if choices.len() < CHOICE_COUNT - 1 {
            return Err(QuizError::InsufficientData {
                available: choices.len() + 1,
                required: CHOICE_COUNT,
            });
        }

        let answer_index = rng.next_index(CHOICE_COUNT);
        let answer_text = match direction {
            QuizDirection::DefinitionToTerm => correct.term.clone(),
            _ => correct_sense.clone(),
        };
        choices.insert(
            answer_index,
            Choice {
                term: correct.term.clone(),
                text: answer_text,
            },
        );

        let prompt = match direction {
            QuizDirection::DefinitionToTerm => {
                format!("Which slang word matches this definition?\n{correct_sense}")
            }
            _ => format!("What does \"{}\" mean?", correct.term),
        };

        Ok(Question {
            direction,
            prompt,
            choices,
            answer_index,
        })
    }
}

/// Exact string comparison against the correct option's text
pub fn grade(question: &Question, submitted: &str) -> Grade {
    if submitted == question.answer() {
        Grade::Correct
    } else {
        Grade::Incorrect {
            answer: question.answer().to_string(),
        }
    }
}

/// Grade by zero-based choice position
pub fn grade_index(question: &Question, index: usize) -> Result<Grade, QuizError> {
    let choice = question
        .choices
        .get(index)
        .ok_or(QuizError::InvalidChoice { index })?;
    Ok(grade(question, &choice.text))
}

fn pick_sense<R: RandomSource + ?Sized>(entry: &Entry, rng: &mut R) -> String {
    match entry.senses.len() {
        0 => String::new(),
        1 => entry.senses[0].clone(),
        n => entry.senses[rng.next_index(n)].clone(),
    }
}

/// A random sense of `entry` not in `used`, falling back to the first free one
fn unused_sense<R: RandomSource + ?Sized>(
    entry: &Entry,
    used: &[String],
    rng: &mut R,
) -> Option<String> {
    let sense = pick_sense(entry, rng);
    if !sense.is_empty() && !used.contains(&sense) {
        return Some(sense);
    }
    entry.senses.iter().find(|s| !used.contains(s)).cloned()
}
