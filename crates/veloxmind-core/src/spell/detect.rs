use regex::Regex;

use super::checker::SpellChecker;
use super::correct::Correction;

/// Words this short are never flagged.
const MIN_FLAGGED_LEN: usize = 3;

/// Characters of surrounding text shown on each side of a flagged word.
const CONTEXT_RADIUS: usize = 20;

const MAX_SUGGESTIONS: usize = 5;

/// A misspelled word with its span in the checked text, ranked
/// replacement candidates, and a display context window.
#[derive(Debug, Clone, PartialEq)]
pub struct SpellingError {
    pub word: String,
    pub start: usize,
    pub end: usize,
    pub suggestions: Vec<String>,
    pub context: String,
}

/// Scan `text` for words the checker does not know. Words shorter than
/// three characters are skipped, as are unknown words the checker has no
/// suggestions for.
pub fn find_spelling_errors(text: &str, checker: &dyn SpellChecker) -> Vec<SpellingError> {
    let word_pattern = Regex::new(r"\b[a-zA-Z]+\b").unwrap();
    let mut errors = Vec::new();

    for m in word_pattern.find_iter(text) {
        let word = m.as_str();
        if word.len() < MIN_FLAGGED_LEN {
            continue;
        }
        if checker.is_known(word) {
            continue;
        }

        let suggestions: Vec<String> = checker
            .suggest(word)
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .collect();
        if suggestions.is_empty() {
            continue;
        }

        errors.push(SpellingError {
            word: word.to_string(),
            start: m.start(),
            end: m.end(),
            suggestions,
            context: word_context(text, m.start(), m.end()),
        });
    }

    errors
}

/// Map each error to a correction using its best suggestion, for the
/// one-click auto-correct path.
pub fn auto_corrections(errors: &[SpellingError]) -> Vec<Correction> {
    errors
        .iter()
        .filter_map(|error| {
            error
                .suggestions
                .first()
                .map(|s| Correction::new(error.start, error.end, s.clone()))
        })
        .collect()
}

/// Surrounding text for display, ellipsized where truncated at either
/// string boundary.
fn word_context(text: &str, start: usize, end: usize) -> String {
    let before = &text[..start];
    let after = &text[end..];

    let prefix: String = {
        let reversed: String = before.chars().rev().take(CONTEXT_RADIUS).collect();
        reversed.chars().rev().collect()
    };
    let suffix: String = after.chars().take(CONTEXT_RADIUS).collect();

    let mut context = String::new();
    if before.chars().count() > CONTEXT_RADIUS {
        context.push_str("...");
    }
    context.push_str(&prefix);
    context.push_str(&text[start..end]);
    context.push_str(&suffix);
    if after.chars().count() > CONTEXT_RADIUS {
        context.push_str("...");
    }

    context
}
