use std::io::Write;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use slang_config::Config;
use slang_types::{AppEvent, UiEvent};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::commands::{self, Command, HELP};

type Input = Lines<BufReader<Stdin>>;

/// Terminal front end: reads commands from stdin, forwards them to the app
/// loop and prints each reply before reading the next line.
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: Arc<RwLock<Config>>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (prompt, max_results) = {
        let config = config.read().await;
        (config.ui.prompt.clone(), config.ui.max_results)
    };
    let interactive = atty::is(atty::Stream::Stdin);

    match app_to_ui_rx.recv().await? {
        AppEvent::BackendReady => tracing::debug!("[UI] Backend ready"),
        other => tracing::warn!("[UI] Unexpected first event {:?}", other),
    }

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut ui = Terminal {
        rx: app_to_ui_rx,
        tx: ui_to_app_tx,
        interactive,
        max_results,
        cancel,
    };

    if interactive {
        println!("Slang Dictionary. Type 'help' for commands.");
    }

    loop {
        let Some(line) = ui.read_line(&mut input, &prompt).await? else {
            ui.tx.send(AppEvent::Ui(UiEvent::Quit)).await?;
            break;
        };

        let command = match commands::parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            Command::Help => println!("{HELP}"),
            Command::Send(UiEvent::Quit) => {
                ui.tx.send(AppEvent::Ui(UiEvent::Quit)).await?;
                break;
            }
            Command::Send(event) => {
                if !ui.confirm(&mut input, &event).await? {
                    continue;
                }
                if !ui.exchange(&mut input, event).await? {
                    break;
                }
            }
        }
    }

    tracing::info!("[UI] Terminal loop stopping");
    Ok(())
}

struct Terminal {
    rx: AsyncReceiver<AppEvent>,
    tx: AsyncSender<AppEvent>,
    interactive: bool,
    max_results: usize,
    cancel: CancellationToken,
}

impl Terminal {
    /// `None` on end of input or shutdown
    async fn read_line(&self, input: &mut Input, prompt: &str) -> anyhow::Result<Option<String>> {
        if self.interactive {
            print!("{prompt}");
            std::io::stdout().flush()?;
        }

        tokio::select! {
            line = input.next_line() => Ok(line?),
            _ = self.cancel.cancelled() => Ok(None),
        }
    }

    /// Ask before a reset. Deletes are confirmed once the app has resolved
    /// the stored spelling.
    async fn confirm(&self, input: &mut Input, event: &UiEvent) -> anyhow::Result<bool> {
        if !matches!(event, UiEvent::Reset) {
            return Ok(true);
        }

        let question = "Reset the slang words to the original list? \
                        This will overwrite all changes. [y/N] ";
        let answer = self.read_line(input, question).await?.unwrap_or_default();
        Ok(commands::is_yes(&answer))
    }

    /// Send one command and render replies until the exchange is complete.
    /// Returns false once input ended mid-exchange.
    async fn exchange(&self, input: &mut Input, event: UiEvent) -> anyhow::Result<bool> {
        self.tx.send(AppEvent::Ui(event)).await?;

        loop {
            let reply = self.rx.recv().await?;
            if let Some(text) = render(&reply, self.max_results) {
                println!("{text}");
            }

            let follow_up = match reply {
                AppEvent::AddConflict {
                    existing,
                    term,
                    definition,
                } => {
                    let Some(mode) = self.ask_add_mode(input, &existing).await? else {
                        return Ok(false);
                    };
                    UiEvent::Add {
                        term,
                        definition,
                        mode: Some(mode),
                    }
                }
                AppEvent::ConfirmDelete(term) => {
                    let question =
                        format!("Are you sure you want to delete the slang: {term}? [y/N] ");
                    let Some(answer) = self.read_line(input, &question).await? else {
                        return Ok(false);
                    };
                    if !commands::is_yes(&answer) {
                        return Ok(true);
                    }
                    UiEvent::Delete(term)
                }
                AppEvent::ShowQuiz(view) => {
                    let Some(index) = self.ask_choice(input, view.choices.len()).await? else {
                        return Ok(false);
                    };
                    UiEvent::AnswerQuiz(index)
                }
                _ => return Ok(true),
            };

            self.tx.send(AppEvent::Ui(follow_up)).await?;
        }
    }

    async fn ask_add_mode(
        &self,
        input: &mut Input,
        existing: &str,
    ) -> anyhow::Result<Option<slang_types::AddMode>> {
        let question = format!(
            "Slang word already exists (as {existing}). \
             [o]verwrite, [a]ppend, [d]uplicate or [c]ancel? "
        );
        loop {
            let Some(answer) = self.read_line(input, &question).await? else {
                return Ok(None);
            };
            match commands::parse_add_mode(&answer) {
                Some(mode) => return Ok(Some(mode)),
                None => println!("Please answer o, a, d or c."),
            }
        }
    }

    async fn ask_choice(&self, input: &mut Input, choices: usize) -> anyhow::Result<Option<usize>> {
        let question = format!("Your answer [1-{choices}]: ");
        loop {
            let Some(answer) = self.read_line(input, &question).await? else {
                return Ok(None);
            };
            match commands::parse_choice(&answer, choices) {
                Some(index) => return Ok(Some(index)),
                None => println!("Please pick a number between 1 and {choices}."),
            }
        }
    }
}

/// Text shown for an app reply, if it has any
pub fn render(event: &AppEvent, max_results: usize) -> Option<String> {
    let text = match event {
        AppEvent::ShowEntry(entry) => {
            let mut out = entry.term.clone();
            for sense in &entry.senses {
                out.push_str("\n  - ");
                out.push_str(sense);
            }
            out
        }
        AppEvent::ShowMatches { keyword, matches } => {
            if matches.is_empty() {
                return Some(format!("No matches found for '{keyword}'!"));
            }
            let mut lines: Vec<String> = matches
                .iter()
                .take(max_results)
                .map(|m| format!("{} = {}", m.term, m.definition))
                .collect();
            if matches.len() > max_results {
                lines.push(format!("... and {} more", matches.len() - max_results));
            }
            lines.join("\n")
        }
        AppEvent::ShowHistory(terms) => {
            if terms.is_empty() {
                "No history available!".to_string()
            } else {
                terms.join("\n")
            }
        }
        AppEvent::AddConflict { .. } | AppEvent::ConfirmDelete(_) => return None,
        AppEvent::ShowQuiz(view) => {
            let mut out = view.prompt.clone();
            for (i, choice) in view.choices.iter().enumerate() {
                out.push_str(&format!("\n  {}) {}", i + 1, choice));
            }
            out
        }
        AppEvent::QuizGraded { correct: true, .. } => "Correct!".to_string(),
        AppEvent::QuizGraded {
            correct: false,
            answer,
        } => format!("Wrong! The correct answer is: {answer}"),
        AppEvent::Message(message) => message.clone(),
        AppEvent::Error(message) => format!("Error: {message}"),
        AppEvent::Ui(_) | AppEvent::BackendReady => return None,
    };

    Some(text)
}
