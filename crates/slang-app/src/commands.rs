use slang_types::{AddMode, UiEvent};

pub const HELP: &str = "\
Commands:
  search <term>          look up a slang word
  define <keyword>       find slang whose definition mentions a keyword
  add <term> = <def>     add a slang word
  edit <term> = <def>    replace a slang word's definition
  delete <term>          remove a slang word
  history                show searched slang words
  random                 show a random slang word
  quiz                   answer a multiple-choice question
  reset                  restore the original slang list
  help                   show this help
  quit                   exit";

#[derive(Debug, Clone)]
pub enum Command {
    Help,
    Send(UiEvent),
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let event = match verb.to_lowercase().as_str() {
        "help" | "?" => return Ok(Some(Command::Help)),
        "search" | "s" => UiEvent::SearchTerm(required(rest, "search <term>")?),
        "define" | "d" => UiEvent::SearchDefinition(required(rest, "define <keyword>")?),
        "add" | "a" => {
            let (term, definition) = pair(rest, "add <term> = <definition>")?;
            UiEvent::Add {
                term,
                definition,
                mode: None,
            }
        }
        "edit" | "e" => {
            let (term, definition) = pair(rest, "edit <term> = <definition>")?;
            UiEvent::Edit { term, definition }
        }
        "delete" | "del" | "rm" => UiEvent::PrepareDelete(required(rest, "delete <term>")?),
        "history" | "h" => UiEvent::ShowHistory,
        "random" | "r" => UiEvent::Random,
        "quiz" | "q" => UiEvent::StartQuiz,
        "reset" => UiEvent::Reset,
        "quit" | "exit" => UiEvent::Quit,
        other => return Err(format!("Unknown command '{other}', type 'help'")),
    };

    Ok(Some(Command::Send(event)))
}

fn required(rest: &str, usage: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("Usage: {usage}"))
    } else {
        Ok(rest.to_string())
    }
}

/// `<term> = <definition>`. A spaced `" = "` separates first, so a bare
/// `=` may appear inside the term.
fn pair(rest: &str, usage: &str) -> Result<(String, String), String> {
    let (term, definition) = rest
        .split_once(" = ")
        .or_else(|| rest.split_once('='))
        .ok_or_else(|| format!("Usage: {usage}"))?;
    let (term, definition) = (term.trim(), definition.trim());
    if term.is_empty() || definition.is_empty() {
        return Err(format!("Usage: {usage}"));
    }
    Ok((term.to_string(), definition.to_string()))
}

/// Answer to the add-conflict question. Blank means cancel.
pub fn parse_add_mode(input: &str) -> Option<AddMode> {
    match input.trim().to_lowercase().as_str() {
        "o" | "overwrite" => Some(AddMode::Overwrite),
        "a" | "append" => Some(AddMode::AppendSense),
        "d" | "duplicate" => Some(AddMode::Duplicate),
        "" | "c" | "cancel" => Some(AddMode::Cancel),
        _ => None,
    }
}

/// One-based choice number to zero-based index
pub fn parse_choice(input: &str, choices: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=choices).contains(&n).then(|| n - 1)
}

pub fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
