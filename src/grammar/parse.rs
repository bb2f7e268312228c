use std::collections::BTreeSet;

use crate::grammar::{Grammar, GrammarError, Nonterminal, Production, Symbol, Terminal};

/// `\w` of the rule notation: letters, digits and underscore.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Splits `S -> aSb` into its left-hand letter and right-hand letter run.
fn split_production(line: &str) -> Option<(char, &str)> {
    let left = line.chars().next().filter(char::is_ascii_uppercase)?;

    let run_start = left.len_utf8();
    let run_len = line[run_start..]
        .find(is_word_char)
        .unwrap_or(line.len() - run_start);
    let run = &line[run_start..run_start + run_len];

    if !run.contains("->") {
        return None;
    }

    let right = &line[run_start + run_len..];
    let right_len = right
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(right.len());
    Some((left, &right[..right_len]))
}

impl Grammar {
    /// Reads one production per line, e.g. `S -> aSb`.
    ///
    /// Blank lines and lines starting with `#` are skipped. Uppercase letters
    /// are nonterminals, lowercase letters terminals, and an empty right side
    /// is a lambda production.
    pub fn parse(grammar: &str) -> Result<Self, GrammarError> {
        let mut nonterminals: BTreeSet<Nonterminal> = BTreeSet::new();
        let mut terminals: BTreeSet<Terminal> = BTreeSet::new();
        let mut productions: Vec<Production> = Vec::new();

        for (i, line) in grammar.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (left, right) = split_production(line).ok_or_else(|| GrammarError::Syntax {
                line: i + 1,
                text: line.to_string(),
            })?;

            let start = Nonterminal::new(left)?;
            nonterminals.insert(start);

            let mut end = Vec::with_capacity(right.len());
            for c in right.chars() {
                let symbol = if c.is_ascii_uppercase() {
                    let nt = Nonterminal::new(c)?;
                    nonterminals.insert(nt);
                    Symbol::Nonterminal(nt)
                } else {
                    let t = Terminal::new(c)?;
                    terminals.insert(t);
                    Symbol::Terminal(t)
                };
                end.push(symbol);
            }

            productions.push(Production::new(start, end));
        }

        Self::new(nonterminals, terminals, productions)
    }
}
