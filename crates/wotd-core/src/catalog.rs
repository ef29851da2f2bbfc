//! Word-list loading and validation.
//!
//! The word source is a JSON array of `{word, definition, emoji}` objects.
//! Invalid entries are dropped (with a per-index report), not fatal; only an
//! unreadable or unparseable file is a `Load` error. The fallback-set policy
//! lives in `load_or_fallback`, not in `load` itself.

use std::{collections::HashSet, fs, path::Path};

use serde::Deserialize;
use tracing::warn;

use crate::{domain::Word, errors::Error, selector::CycleSelector, Result};

/// Raw on-disk shape. Fields are optional so a partially-filled entry is a
/// validation issue rather than a parse failure for the whole file.
#[derive(Debug, Deserialize)]
struct RawEntry {
    word: Option<String>,
    definition: Option<String>,
    emoji: Option<String>,
}

/// One dropped entry from a load pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationIssue {
    pub index: usize,
    pub reason: String,
}

/// Result of a load pass: the usable words plus whatever was dropped.
#[derive(Clone, Debug, Default)]
pub struct LoadReport {
    pub words: Vec<Word>,
    pub issues: Vec<ValidationIssue>,
}

/// Load and validate the word list at `path`.
///
/// Fails only if the file cannot be read or is not a JSON array; individual
/// bad entries land in `LoadReport::issues`.
pub fn load(path: &Path) -> Result<LoadReport> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::Load(format!("cannot read {}: {e}", path.display())))?;
    let raw: Vec<RawEntry> = serde_json::from_str(&contents)
        .map_err(|e| Error::Load(format!("cannot parse {}: {e}", path.display())))?;

    Ok(validate_entries(raw))
}

fn validate_entries(raw: Vec<RawEntry>) -> LoadReport {
    let mut report = LoadReport::default();
    // The cycle tracks words by text key, so duplicate texts would collapse
    // in the used set; keep the first occurrence and drop the rest.
    let mut seen_texts = HashSet::new();

    for (index, entry) in raw.into_iter().enumerate() {
        match validate_entry(entry) {
            Ok(word) => {
                if seen_texts.insert(word.text.clone()) {
                    report.words.push(word);
                } else {
                    report.issues.push(ValidationIssue {
                        index,
                        reason: format!("duplicate `word` \"{}\"", word.text),
                    });
                }
            }
            Err(reason) => report.issues.push(ValidationIssue { index, reason }),
        }
    }

    report
}

fn validate_entry(entry: RawEntry) -> std::result::Result<Word, String> {
    let text = required_field(entry.word, "word")?;
    let definition = required_field(entry.definition, "definition")?;
    let emoji = required_field(entry.emoji, "emoji")?;

    Ok(Word {
        text,
        definition,
        emoji,
    })
}

fn required_field(value: Option<String>, name: &str) -> std::result::Result<String, String> {
    let trimmed = value.as_deref().unwrap_or("").trim();
    if trimmed.is_empty() {
        return Err(format!("missing or empty `{name}`"));
    }
    Ok(trimmed.to_string())
}

/// The built-in set used when the external source yields nothing usable.
pub fn fallback_words() -> Vec<Word> {
    [
        (
            "Serendipity",
            "The occurrence of happy or beneficial events by chance.",
            "🍀",
        ),
        (
            "Ephemeral",
            "Lasting for a very short time.",
            "🌸",
        ),
        (
            "Luminous",
            "Full of or shedding light; bright or shining.",
            "💡",
        ),
    ]
    .into_iter()
    .map(|(text, definition, emoji)| Word {
        text: text.to_string(),
        definition: definition.to_string(),
        emoji: emoji.to_string(),
    })
    .collect()
}

/// Load `path`, logging dropped entries, and substitute the built-in
/// fallback set when the source is unusable or yields zero valid words.
/// Initialization never fails because of the word source.
pub fn load_or_fallback(path: &Path) -> Vec<Word> {
    let report = match load(path) {
        Ok(report) => report,
        Err(e) => {
            warn!("word source unusable ({e}); using fallback set");
            return fallback_words();
        }
    };

    for issue in &report.issues {
        warn!(index = issue.index, "dropped word entry: {}", issue.reason);
    }

    if report.words.is_empty() {
        warn!("word source has no valid entries; using fallback set");
        return fallback_words();
    }

    report.words
}

/// Administrative reload: re-load the source and swap it into the selector,
/// resetting the cycle so stale used-keys cannot reference absent words.
/// On failure the active sequence is left untouched.
pub fn reload(path: &Path, selector: &mut CycleSelector) -> Result<usize> {
    let report = load(path)?;
    for issue in &report.issues {
        warn!(index = issue.index, "dropped word entry: {}", issue.reason);
    }
    if report.words.is_empty() {
        return Err(Error::EmptyCatalog);
    }

    let count = report.words.len();
    selector.replace_words(report.words);
    Ok(count)
}
