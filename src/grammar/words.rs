use std::collections::BTreeSet;

use super::{Terminal, Word, EMPTY_SET, LAMBDA};

/// Concatenation of two languages.
///
/// An empty operand means "nothing known yet" and acts as the identity, so
/// `concat(∅, B) = B` rather than `∅`.
pub fn concat(a: &BTreeSet<Word>, b: &BTreeSet<Word>) -> BTreeSet<Word> {
    if a.is_empty() {
        return b.clone();
    }
    if b.is_empty() {
        return a.clone();
    }
    a.iter()
        .flat_map(|u| {
            b.iter().map(move |v| {
                let mut w = u.clone();
                w.extend(v.iter().copied());
                w
            })
        })
        .collect()
}

pub fn format_word(word: &[Terminal]) -> String {
    if word.is_empty() {
        LAMBDA.to_string()
    } else {
        word.iter().map(|t| t.as_char()).collect()
    }
}

/// Renders a set of words in canonical order, e.g. `{λ, a, ab}` or `∅`.
pub fn format_words(words: &BTreeSet<Word>) -> String {
    if words.is_empty() {
        return EMPTY_SET.to_string();
    }
    format!(
        "{{{}}}",
        words
            .iter()
            .map(|w| format_word(w))
            .collect::<Vec<_>>()
            .join(", ")
    )
}
