//! Line-oriented file format: `term` + '`' + `definition`, one entry per line.
//! Multiple senses share one definition field, joined by `"| "`.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::dictionary::{Dictionary, Entry};
use crate::error::PersistenceError;

pub const DELIMITER: char = '`';
pub const SENSE_SEPARATOR: &str = "| ";

/// Split a definition field into its senses, dropping empty ones
pub fn split_senses(field: &str) -> Vec<String> {
    field
        .split(SENSE_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_senses(senses: &[String]) -> String {
    senses.join(SENSE_SEPARATOR)
}

/// Parse one line, `None` if it is malformed
pub fn parse_line(line: &str) -> Option<(String, Vec<String>)> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let (term, definition) = line.split_once(DELIMITER)?;

    let term = term.trim();
    if term.is_empty() {
        return None;
    }

    let senses = split_senses(definition);
    if senses.is_empty() {
        return None;
    }

    Some((term.to_string(), senses))
}

pub fn format_entry(entry: &Entry) -> String {
    format!("{}{}{}", entry.term, DELIMITER, join_senses(&entry.senses))
}

/// Parse a whole file body. Lines sharing a term accumulate senses.
pub fn parse(content: &str) -> Dictionary {
    parse_bytes(content.as_bytes())
}

/// Like [`parse`], but each line is decoded on its own so a line that is not
/// UTF-8 is skipped like any other malformed line.
pub fn parse_bytes(content: &[u8]) -> Dictionary {
    let mut dict = Dictionary::new();

    for (number, raw) in content.split(|&b| b == b'\n').enumerate() {
        let Ok(line) = std::str::from_utf8(raw) else {
            tracing::debug!("Skipping line {} with invalid UTF-8", number + 1);
            continue;
        };
        match parse_line(line) {
            Some((term, senses)) => dict.extend_senses(&term, senses),
            None => {
                if !line.trim().is_empty() {
                    tracing::debug!("Skipping malformed line {}", number + 1);
                }
            }
        }
    }

    dict
}

pub fn load(path: &Path) -> Result<Dictionary, PersistenceError> {
    tracing::info!("Loading slang from file: {}", path.display());

    let content = fs::read(path).map_err(|source| PersistenceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let dict = parse_bytes(&content);

    tracing::info!("Loaded {} slang entries", dict.len());
    Ok(dict)
}

/// Rewrite `path` with the whole dictionary.
///
/// The content goes to a sibling temporary file first and is renamed over
/// `path`, so a failed write leaves the previous file intact.
pub fn save(path: &Path, dict: &Dictionary) -> Result<(), PersistenceError> {
    let write_err = |source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp = temp_path(path);
    let result = write_all(&tmp, dict).and_then(|_| fs::rename(&tmp, path));
    if let Err(source) = result {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(source));
    }

    tracing::debug!("Saved {} slang entries to {}", dict.len(), path.display());
    Ok(())
}

fn write_all(path: &Path, dict: &Dictionary) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for entry in dict.iter() {
        writeln!(writer, "{}", format_entry(entry))?;
    }
    writer.flush()?;
    writer.get_ref().sync_all()
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Full content duplication of `source` onto `destination`, through a
/// temporary file like [`save`]
pub fn copy(source: &Path, destination: &Path) -> Result<(), PersistenceError> {
    if !source.exists() {
        return Err(PersistenceError::SeedMissing(source.to_path_buf()));
    }

    let copy_err = |source_err| PersistenceError::Copy {
        from: source.to_path_buf(),
        to: destination.to_path_buf(),
        source: source_err,
    };

    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(copy_err)?;
    }

    let tmp = temp_path(destination);
    let result = fs::copy(source, &tmp).and_then(|_| fs::rename(&tmp, destination));
    if let Err(source_err) = result {
        let _ = fs::remove_file(&tmp);
        return Err(copy_err(source_err));
    }
    Ok(())
}

/// Seed the working file from the original unless it already exists.
/// Returns whether a copy was made.
pub fn ensure_working_copy(seed: &Path, working: &Path) -> Result<bool, PersistenceError> {
    if working.exists() {
        return Ok(false);
    }

    tracing::info!(
        "Creating working copy {} from {}",
        working.display(),
        seed.display()
    );
    copy(seed, working)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_splits_on_first_delimiter() {
        let (term, senses) = parse_line("yeet`to throw something forcefully").unwrap();
        assert_eq!(term, "yeet");
        assert_eq!(senses, vec!["to throw something forcefully"]);

        let (_, senses) = parse_line("code`a `backticked` word").unwrap();
        assert_eq!(senses, vec!["a `backticked` word"]);
    }

    #[test]
    fn test_parse_line_splits_senses() {
        let (term, senses) = parse_line("#1`Number one| The best\r").unwrap();
        assert_eq!(term, "#1");
        assert_eq!(senses, vec!["Number one", "The best"]);
    }

    #[test]
    fn test_parse_line_rejects_malformed() {
        assert!(parse_line("no delimiter here").is_none());
        assert!(parse_line("`orphan definition").is_none());
        assert!(parse_line("term`").is_none());
        assert!(parse_line("term`| ").is_none());
        assert!(parse_line("").is_none());
    }

    #[test]
    fn test_parse_accumulates_repeated_terms() {
        let dict = parse("cap`a lie\nmalformed\ncap`a hat\nbet`an affirmation\n");
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get("cap").unwrap().senses, vec!["a lie", "a hat"]);
        assert_eq!(dict.terms(), vec!["cap", "bet"]);
    }

    #[test]
    fn test_format_entry_joins_senses() {
        let entry = Entry::new("cap", vec!["a lie".into(), "a hat".into()]);
        assert_eq!(format_entry(&entry), "cap`a lie| a hat");
    }

    #[test]
    fn test_save_then_load_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slang.txt");
        fs::write(
            &path,
            "yeet`to throw something forcefully\nsus`suspicious| shady\nsus`sketchy\nbroken line\n",
        )
        .unwrap();

        let first = load(&path).unwrap();
        save(&path, &first).unwrap();
        let second = load(&path).unwrap();

        assert!(first.same_content(&second));
        assert_eq!(second.get("sus").unwrap().senses, vec!["suspicious", "shady", "sketchy"]);
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("new_slang.txt");
        let dict = parse("bet`an affirmation\n");

        save(&path, &dict).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "bet`an affirmation\n");
    }

    #[test]
    fn test_ensure_working_copy_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let seed = dir.path().join("slang.txt");
        let working = dir.path().join("new_slang.txt");
        fs::write(&seed, "yeet`to throw\n").unwrap();

        assert!(ensure_working_copy(&seed, &working).unwrap());
        fs::write(&working, "bet`an affirmation\n").unwrap();
        assert!(!ensure_working_copy(&seed, &working).unwrap());

        assert_eq!(fs::read_to_string(&working).unwrap(), "bet`an affirmation\n");
    }

    #[test]
    fn test_missing_seed_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = ensure_working_copy(&dir.path().join("nope.txt"), &dir.path().join("w.txt"))
            .unwrap_err();
        assert!(matches!(err, PersistenceError::SeedMissing(_)));
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, PersistenceError::Read { .. }));
    }

    #[test]
    fn test_load_skips_lines_that_are_not_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slang.txt");
        fs::write(&path, b"yeet`to throw\ncaf\xE9`a coffee shop\r\nbet`sure\r\n").unwrap();

        let dict = load(&path).unwrap();
        assert_eq!(dict.terms(), vec!["yeet", "bet"]);
        assert_eq!(dict.get("bet").unwrap().senses, vec!["sure"]);
    }

    #[test]
    fn test_failed_copy_leaves_destination() {
        let dir = tempfile::tempdir().unwrap();
        let seed = dir.path().join("slang.txt");
        let working = dir.path().join("new_slang.txt");
        fs::write(&seed, "yeet`to throw\n").unwrap();
        fs::write(&working, "bet`sure\n").unwrap();
        fs::create_dir(temp_path(&working)).unwrap();

        assert!(matches!(copy(&seed, &working), Err(PersistenceError::Copy { .. })));
        assert_eq!(fs::read_to_string(&working).unwrap(), "bet`sure\n");
    }
}
