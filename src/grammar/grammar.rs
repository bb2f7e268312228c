use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::{GrammarError, Nonterminal, SententialForm, Symbol, Terminal, LAMBDA};

/// Rewrite rule `start -> end`; an empty `end` is a lambda production.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    pub start: Nonterminal,
    pub end: SententialForm,
}

impl Production {
    pub fn new(start: Nonterminal, end: SententialForm) -> Self {
        Self { start, end }
    }

    pub fn is_lambda(&self) -> bool {
        self.end.is_empty()
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.end.contains(&symbol)
    }

    /// Part of `end` after the first occurrence of `symbol`.
    ///
    /// Empty both when `symbol` does not occur and when it is the last
    /// symbol; check [`Production::contains`] to tell the two apart.
    pub fn after_symbol(&self, symbol: Symbol) -> &[Symbol] {
        match self.end.iter().position(|s| *s == symbol) {
            Some(idx) => &self.end[idx + 1..],
            None => &[],
        }
    }

    /// Replaces the leftmost nonterminal of `form` with `end`, provided that
    /// nonterminal is `start`.
    pub fn rewrite_leftmost(&self, form: &[Symbol]) -> Option<SententialForm> {
        let idx = form.iter().position(|s| s.non_terminal().is_some())?;
        if form[idx] != Symbol::Nonterminal(self.start) {
            return None;
        }
        let mut rewritten = form[..idx].to_vec();
        rewritten.extend(self.end.iter().copied());
        rewritten.extend(form[idx + 1..].iter().copied());
        Some(rewritten)
    }

    pub fn right_to_string(&self) -> String {
        if self.end.is_empty() {
            LAMBDA.to_string()
        } else {
            self.end.iter().map(|s| s.as_char()).collect()
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.right_to_string())
    }
}

/// Immutable context-free grammar: nonterminals, terminals, sentence symbol
/// and productions, with the productions grouped by the nonterminal they
/// rewrite.
#[derive(Debug, Clone)]
pub struct Grammar {
    nonterminals: BTreeSet<Nonterminal>,
    terminals: BTreeSet<Terminal>,
    sentence_symbol: Nonterminal,
    productions: Vec<Production>,
    productions_by_nonterminal: BTreeMap<Nonterminal, Vec<Production>>,
}

impl Grammar {
    /// Builds a grammar whose sentence symbol is `S`.
    pub fn new(
        nonterminals: impl IntoIterator<Item = Nonterminal>,
        terminals: impl IntoIterator<Item = Terminal>,
        productions: impl IntoIterator<Item = Production>,
    ) -> Result<Self, GrammarError> {
        Self::with_sentence_symbol(nonterminals, terminals, Nonterminal::new('S')?, productions)
    }

    pub fn with_sentence_symbol(
        nonterminals: impl IntoIterator<Item = Nonterminal>,
        terminals: impl IntoIterator<Item = Terminal>,
        sentence_symbol: Nonterminal,
        productions: impl IntoIterator<Item = Production>,
    ) -> Result<Self, GrammarError> {
        let nonterminals: BTreeSet<Nonterminal> = nonterminals.into_iter().collect();
        let terminals: BTreeSet<Terminal> = terminals.into_iter().collect();

        if !nonterminals.contains(&sentence_symbol) {
            return Err(GrammarError::MissingSentenceSymbol(sentence_symbol));
        }

        let mut unique: Vec<Production> = Vec::new();
        for production in productions {
            if !nonterminals.contains(&production.start) {
                return Err(GrammarError::UndeclaredNonterminal {
                    symbol: production.start,
                    production,
                });
            }
            let undeclared = production.end.iter().copied().find(|s| match s {
                Symbol::Nonterminal(nt) => !nonterminals.contains(nt),
                Symbol::Terminal(t) => !terminals.contains(t),
            });
            if let Some(symbol) = undeclared {
                return Err(GrammarError::UndeclaredSymbol { production, symbol });
            }
            if !unique.contains(&production) {
                unique.push(production);
            }
        }

        let productions_by_nonterminal = nonterminals
            .iter()
            .map(|nt| {
                let prods = unique.iter().filter(|p| p.start == *nt).cloned().collect();
                (*nt, prods)
            })
            .collect();

        Ok(Self {
            nonterminals,
            terminals,
            sentence_symbol,
            productions: unique,
            productions_by_nonterminal,
        })
    }

    pub fn nonterminals(&self) -> &BTreeSet<Nonterminal> {
        &self.nonterminals
    }

    pub fn terminals(&self) -> &BTreeSet<Terminal> {
        &self.terminals
    }

    pub fn sentence_symbol(&self) -> Nonterminal {
        self.sentence_symbol
    }

    /// All productions in declaration order.
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Productions rewriting `nt`, in declaration order.
    pub fn productions_of(&self, nt: Nonterminal) -> &[Production] {
        self.productions_by_nonterminal
            .get(&nt)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
