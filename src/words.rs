//! Word list loading. Words are trimmed and uppercased; duplicates are left
//! for [`Crossword`](crate::crossword::Crossword) to collapse.

use crate::error::{Error, Result};
use std::path::Path;

/// One word per line; blank lines are skipped.
pub fn parse_words(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_uppercase)
        .collect()
}

/// Either a JSON array of strings or an object whose keys are the words.
pub fn parse_json_words(contents: &str) -> Result<Vec<String>> {
    let json: serde_json::Value =
        serde_json::from_str(contents).map_err(|e| Error::word_list(e.to_string()))?;

    let words: Vec<&str> = match &json {
        serde_json::Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .ok_or_else(|| Error::word_list(format!("expected a string, found {}", item)))
            })
            .collect::<Result<_>>()?,
        serde_json::Value::Object(obj) => obj.keys().map(String::as_str).collect(),
        other => {
            return Err(Error::word_list(format!(
                "expected an array or object, found {}",
                other
            )))
        }
    };

    Ok(words
        .into_iter()
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_uppercase)
        .collect())
}

/// Loads a word list, choosing the format from the file extension.
pub fn load_words(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_json_words(&contents),
        _ => Ok(parse_words(&contents)),
    }
}
