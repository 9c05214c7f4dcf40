use slang_core::{RandomSource, Session};
use slang_types::{AppEvent, DisplayMatch};

pub fn handle_term_search<R: RandomSource>(session: &mut Session<R>, term: &str) -> AppEvent {
    match session.search_term(term) {
        Some(entry) => AppEvent::ShowEntry(entry.to_display()),
        None => {
            tracing::debug!("No slang for '{}'", term);
            AppEvent::Message("No slang found!".into())
        }
    }
}

pub fn handle_definition_search<R: RandomSource>(
    session: &Session<R>,
    keyword: String,
) -> AppEvent {
    let matches: Vec<DisplayMatch> = session
        .search_definition(&keyword)
        .into_iter()
        .map(|m| DisplayMatch {
            term: m.term,
            definition: m.definition,
        })
        .collect();
    tracing::debug!("Definition search '{}': {} matches", keyword, matches.len());

    AppEvent::ShowMatches { keyword, matches }
}

pub fn handle_history<R: RandomSource>(session: &Session<R>) -> AppEvent {
    AppEvent::ShowHistory(session.history().all().to_vec())
}

pub fn handle_random<R: RandomSource>(session: &mut Session<R>) -> AppEvent {
    match session.random() {
        Some(entry) => AppEvent::ShowEntry(entry.to_display()),
        None => AppEvent::Message("No slang words available!".into()),
    }
}
