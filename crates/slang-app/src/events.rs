use kanal::{AsyncReceiver, AsyncSender};
use slang_core::{RandomSource, Session, StoreError};
use slang_types::{AppEvent, UiEvent};

pub mod edit;
pub mod lookup;
pub mod quiz;

use edit::{handle_add, handle_delete, handle_edit, handle_prepare_delete, handle_reset};
use lookup::{handle_definition_search, handle_history, handle_random, handle_term_search};
use quiz::{handle_quiz_answer, handle_quiz_start};

/// App's main loop. Owns the session and handles one command at a time.
pub async fn event_loop<R>(
    mut session: Session<R>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()>
where
    R: RandomSource + Send,
{
    app_to_ui_tx.send(AppEvent::BackendReady).await?;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let Ok(event) = ui_to_app_rx.recv().await else {
            tracing::info!("[EVENT_LOOP] UI channel closed");
            break;
        };

        match event {
            AppEvent::Ui(UiEvent::Quit) => {
                tracing::info!("[EVENT_LOOP] Quit requested");
                break;
            }
            AppEvent::Ui(command) => {
                tracing::debug!("[EVENT_LOOP] Handling {:?}", command);
                let reply = handle_ui_event(&mut session, command);
                app_to_ui_tx.send(reply).await?;
            }
            other => {
                tracing::debug!(
                    "[EVENT_LOOP] Ignoring UI-only event {:?}",
                    std::mem::discriminant(&other)
                );
            }
        }
    }

    Ok(())
}

/// Run one command against the session and build the reply for the UI
pub fn handle_ui_event<R: RandomSource>(session: &mut Session<R>, event: UiEvent) -> AppEvent {
    match event {
        UiEvent::SearchTerm(term) => handle_term_search(session, &term),
        UiEvent::SearchDefinition(keyword) => handle_definition_search(session, keyword),
        UiEvent::Add {
            term,
            definition,
            mode,
        } => handle_add(session, term, definition, mode),
        UiEvent::Edit { term, definition } => handle_edit(session, &term, &definition),
        UiEvent::PrepareDelete(term) => handle_prepare_delete(session, &term),
        UiEvent::Delete(term) => handle_delete(session, &term),
        UiEvent::ShowHistory => handle_history(session),
        UiEvent::Random => handle_random(session),
        UiEvent::StartQuiz => handle_quiz_start(session),
        UiEvent::AnswerQuiz(index) => handle_quiz_answer(session, index),
        UiEvent::Reset => handle_reset(session),
        UiEvent::Quit => AppEvent::Message("Bye!".into()),
    }
}

/// Expected misses become plain messages, everything else is an error
fn store_error_reply(err: StoreError) -> AppEvent {
    match err {
        StoreError::NotFound(_) => AppEvent::Message("Slang not found!".into()),
        StoreError::InvalidInput(reason) => AppEvent::Error(reason),
        StoreError::Persistence(e) => {
            tracing::error!("Persistence failure: {e}");
            AppEvent::Error(format!("Error saving file: {e}"))
        }
    }
}
