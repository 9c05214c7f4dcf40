use std::fs;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use slang_core::random::ScriptedSource;
use slang_core::{Session, SlangStore, StorePaths};
use slang_types::{AddMode, AppEvent, QuizDirection, UiEvent};
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::events::event_loop;

const SEED: &str = "yeet`to throw something forcefully\n\
                    bet`an affirmation\n\
                    sus`suspicious| shady\n\
                    mid`mediocre\n";

struct Harness {
    dir: TempDir,
    tx: AsyncSender<AppEvent>,
    rx: AsyncReceiver<AppEvent>,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl Harness {
    async fn start(seed: &str, picks: Vec<usize>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let paths = StorePaths::new(dir.path().join("slang.txt"), dir.path().join("new_slang.txt"));
        fs::write(&paths.seed, seed).unwrap();

        let store = SlangStore::open(paths).unwrap();
        let session = Session::new(store, QuizDirection::DefinitionToTerm, ScriptedSource::new(picks));

        let (ui_tx, app_rx) = kanal::unbounded_async::<AppEvent>();
        let (app_tx, ui_rx) = kanal::unbounded_async::<AppEvent>();
        let handle = tokio::spawn(event_loop(session, app_rx, app_tx));

        let harness = Self {
            dir,
            tx: ui_tx,
            rx: ui_rx,
            handle,
        };
        assert!(matches!(harness.next().await, AppEvent::BackendReady));
        harness
    }

    async fn next(&self) -> AppEvent {
        match timeout(Duration::from_secs(2), self.rx.recv()).await {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => panic!("Channel error: {}", e),
            Err(_) => panic!("Timeout - reply never arrived!"),
        }
    }

    async fn ask(&self, event: UiEvent) -> AppEvent {
        self.tx.send(AppEvent::Ui(event)).await.expect("send failed");
        self.next().await
    }

    fn working_file(&self) -> String {
        fs::read_to_string(self.dir.path().join("new_slang.txt")).unwrap()
    }
}

fn message(event: AppEvent) -> String {
    match event {
        AppEvent::Message(text) => text,
        other => panic!("Expected message, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_then_history() {
    let h = Harness::start(SEED, vec![0]).await;

    match h.ask(UiEvent::SearchTerm("SUS".into())).await {
        AppEvent::ShowEntry(entry) => {
            assert_eq!(entry.term, "sus");
            assert_eq!(entry.senses, vec!["suspicious", "shady"]);
        }
        other => panic!("Wrong event type: {:?}", other),
    }
    assert_eq!(message(h.ask(UiEvent::SearchTerm("rizz".into())).await), "No slang found!");

    match h.ask(UiEvent::ShowHistory).await {
        AppEvent::ShowHistory(terms) => assert_eq!(terms, vec!["SUS", "rizz"]),
        other => panic!("Wrong event type: {:?}", other),
    }
}

#[tokio::test]
async fn test_definition_search_reports_empty_matches() {
    let h = Harness::start(SEED, vec![0]).await;

    match h.ask(UiEvent::SearchDefinition("SHADY".into())).await {
        AppEvent::ShowMatches { matches, .. } => {
            assert_eq!(matches.len(), 1);
            assert_eq!(matches[0].term, "sus");
            assert_eq!(matches[0].definition, "suspicious| shady");
        }
        other => panic!("Wrong event type: {:?}", other),
    }

    match h.ask(UiEvent::SearchDefinition("nothing like this".into())).await {
        AppEvent::ShowMatches { matches, .. } => assert!(matches.is_empty()),
        other => panic!("Wrong event type: {:?}", other),
    }
}

#[tokio::test]
async fn test_add_conflict_round_trip() {
    let h = Harness::start(SEED, vec![0]).await;

    let reply = h
        .ask(UiEvent::Add {
            term: "BET".into(),
            definition: "sure".into(),
            mode: None,
        })
        .await;
    match reply {
        AppEvent::AddConflict { existing, term, definition } => {
            assert_eq!(existing, "bet");
            assert_eq!(term, "BET");
            assert_eq!(definition, "sure");
        }
        other => panic!("Wrong event type: {:?}", other),
    }

    let reply = h
        .ask(UiEvent::Add {
            term: "BET".into(),
            definition: "sure".into(),
            mode: Some(AddMode::AppendSense),
        })
        .await;
    assert_eq!(message(reply), "Definition added to 'bet'.");
    assert!(h.working_file().contains("bet`an affirmation| sure\n"));
}

#[tokio::test]
async fn test_add_edit_delete_persist() {
    let h = Harness::start(SEED, vec![0]).await;

    let reply = h
        .ask(UiEvent::Add {
            term: "rizz".into(),
            definition: "charm".into(),
            mode: None,
        })
        .await;
    assert_eq!(message(reply), "Slang added successfully!");

    let reply = h
        .ask(UiEvent::Edit {
            term: "RIZZ".into(),
            definition: "charisma".into(),
        })
        .await;
    assert_eq!(message(reply), "Slang 'rizz' updated successfully!");
    assert!(h.working_file().contains("rizz`charisma\n"));

    let reply = h.ask(UiEvent::Delete("yeet".into())).await;
    assert_eq!(message(reply), "Slang 'yeet' deleted successfully!");
    assert!(!h.working_file().contains("yeet"));

    assert_eq!(message(h.ask(UiEvent::Delete("yeet".into())).await), "Slang not found!");
}

#[tokio::test]
async fn test_delete_confirms_stored_spelling() {
    let h = Harness::start(SEED, vec![0]).await;

    h.ask(UiEvent::Add {
        term: "Bet".into(),
        definition: "a wager".into(),
        mode: Some(AddMode::Duplicate),
    })
    .await;

    match h.ask(UiEvent::PrepareDelete("BET".into())).await {
        AppEvent::ConfirmDelete(term) => assert_eq!(term, "bet"),
        other => panic!("Wrong event type: {:?}", other),
    }
    match h.ask(UiEvent::PrepareDelete("Bet".into())).await {
        AppEvent::ConfirmDelete(term) => assert_eq!(term, "Bet"),
        other => panic!("Wrong event type: {:?}", other),
    }
    assert_eq!(
        message(h.ask(UiEvent::PrepareDelete("rizz".into())).await),
        "Slang not found!"
    );
    // Resolving alone removes nothing
    assert!(h.working_file().contains("Bet`"));

    let reply = h.ask(UiEvent::Delete("Bet".into())).await;
    assert_eq!(message(reply), "Slang 'Bet' deleted successfully!");
    assert!(!h.working_file().contains("Bet`"));
    assert!(h.working_file().contains("bet`an affirmation\n"));
}

#[tokio::test]
async fn test_invalid_input_is_an_error_reply() {
    let h = Harness::start(SEED, vec![0]).await;

    let reply = h
        .ask(UiEvent::Add {
            term: "a`b".into(),
            definition: "broken".into(),
            mode: None,
        })
        .await;
    assert!(matches!(reply, AppEvent::Error(_)));
}

#[tokio::test]
async fn test_quiz_round() {
    // correct = yeet, the shuffle rotates it to the back, the answer goes to slot 0
    let h = Harness::start(SEED, vec![0, 0, 0, 0]).await;

    let view = match h.ask(UiEvent::StartQuiz).await {
        AppEvent::ShowQuiz(view) => view,
        other => panic!("Wrong event type: {:?}", other),
    };
    assert_eq!(view.choices.len(), 4);
    assert!(view.prompt.ends_with("to throw something forcefully"));
    let answer = view.choices.iter().position(|c| c == "yeet").unwrap();

    match h.ask(UiEvent::AnswerQuiz(answer)).await {
        AppEvent::QuizGraded { correct, .. } => assert!(correct),
        other => panic!("Wrong event type: {:?}", other),
    }

    assert!(matches!(h.ask(UiEvent::AnswerQuiz(0)).await, AppEvent::Error(_)));
}

#[tokio::test]
async fn test_wrong_quiz_answer_reveals_term() {
    let h = Harness::start(SEED, vec![0, 0, 0, 0]).await;

    let view = match h.ask(UiEvent::StartQuiz).await {
        AppEvent::ShowQuiz(view) => view,
        other => panic!("Wrong event type: {:?}", other),
    };
    let wrong = view.choices.iter().position(|c| c != "yeet").unwrap();

    match h.ask(UiEvent::AnswerQuiz(wrong)).await {
        AppEvent::QuizGraded { correct, answer } => {
            assert!(!correct);
            assert_eq!(answer, "yeet");
        }
        other => panic!("Wrong event type: {:?}", other),
    }
}

#[tokio::test]
async fn test_quiz_and_random_on_small_store() {
    let h = Harness::start("yeet`to throw\n", vec![0]).await;

    assert_eq!(
        message(h.ask(UiEvent::StartQuiz).await),
        "Not enough slang words for a quiz: 1 available, 4 required"
    );
    match h.ask(UiEvent::Random).await {
        AppEvent::ShowEntry(entry) => assert_eq!(entry.term, "yeet"),
        other => panic!("Wrong event type: {:?}", other),
    }

    h.ask(UiEvent::Delete("yeet".into())).await;
    assert_eq!(message(h.ask(UiEvent::Random).await), "No slang words available!");
}

#[tokio::test]
async fn test_reset_restores_seed() {
    let h = Harness::start(SEED, vec![0]).await;

    h.ask(UiEvent::Add {
        term: "rizz".into(),
        definition: "charm".into(),
        mode: None,
    })
    .await;
    let reply = h.ask(UiEvent::Reset).await;
    assert_eq!(message(reply), "Slang words reset to original list successfully!");
    assert_eq!(h.working_file(), SEED);
    assert_eq!(message(h.ask(UiEvent::SearchTerm("rizz".into())).await), "No slang found!");
}

#[tokio::test]
async fn test_quit_stops_loop() {
    let h = Harness::start(SEED, vec![0]).await;
    h.tx.send(AppEvent::Ui(UiEvent::Quit)).await.expect("send failed");

    let result = timeout(Duration::from_secs(2), h.handle).await;
    assert!(matches!(result, Ok(Ok(Ok(())))));
}
