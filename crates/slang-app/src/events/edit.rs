use slang_core::{AddOutcome, RandomSource, Session};
use slang_types::{AddMode, AppEvent};

use super::store_error_reply;

/// Without a mode, an existing term is bounced back to the UI as a conflict
pub fn handle_add<R: RandomSource>(
    session: &mut Session<R>,
    term: String,
    definition: String,
    mode: Option<AddMode>,
) -> AppEvent {
    let mode = match mode {
        Some(mode) => mode,
        None => match session.existing_term(&term) {
            Some(existing) => {
                return AppEvent::AddConflict {
                    existing: existing.to_string(),
                    term,
                    definition,
                };
            }
            // Only consulted on conflict
            None => AddMode::Overwrite,
        },
    };

    match session.add(&term, &definition, mode) {
        Ok(outcome) => AppEvent::Message(describe_outcome(&outcome)),
        Err(e) => store_error_reply(e),
    }
}

fn describe_outcome(outcome: &AddOutcome) -> String {
    match outcome {
        AddOutcome::Inserted => "Slang added successfully!".to_string(),
        AddOutcome::Overwritten { term } => format!("Slang '{term}' overwritten."),
        AddOutcome::Appended { term } => format!("Definition added to '{term}'."),
        AddOutcome::AlreadyPresent { term } => {
            format!("'{term}' already has that definition, nothing changed.")
        }
        AddOutcome::Duplicated { term } => format!("Slang added as '{term}'."),
        AddOutcome::Cancelled => "Nothing added.".to_string(),
    }
}

pub fn handle_edit<R: RandomSource>(
    session: &mut Session<R>,
    term: &str,
    definition: &str,
) -> AppEvent {
    match session.edit(term, definition) {
        Ok(key) => AppEvent::Message(format!("Slang '{key}' updated successfully!")),
        Err(e) => store_error_reply(e),
    }
}

/// Stored spelling for the confirmation prompt, nothing is removed yet
pub fn handle_prepare_delete<R: RandomSource>(session: &Session<R>, term: &str) -> AppEvent {
    match session.existing_term(term) {
        Some(existing) => AppEvent::ConfirmDelete(existing.to_string()),
        None => AppEvent::Message("Slang not found!".into()),
    }
}

pub fn handle_delete<R: RandomSource>(session: &mut Session<R>, term: &str) -> AppEvent {
    match session.delete(term) {
        Ok(entry) => AppEvent::Message(format!("Slang '{}' deleted successfully!", entry.term)),
        Err(e) => store_error_reply(e),
    }
}

pub fn handle_reset<R: RandomSource>(session: &mut Session<R>) -> AppEvent {
    match session.reset() {
        Ok(()) => AppEvent::Message("Slang words reset to original list successfully!".into()),
        Err(e) => {
            tracing::error!("Reset failed: {e}");
            AppEvent::Error(format!("Error resetting slang words: {e}"))
        }
    }
}
