use std::collections::BTreeMap;

use log::{debug, trace};

use super::{
    words::format_word, AnalyzerConfig, Grammar, GrammarError, LLkParsingTable, Nonterminal,
    Production, Symbol, Terminal, Word,
};

/// Stack-based LL(k) recognizer for a grammar.
///
/// The grammar and table are never touched after construction, so one parser
/// can serve any number of `parse` calls.
#[derive(Debug, Clone)]
pub struct LLkParser {
    grammar: Grammar,
    table: LLkParsingTable,
}

impl LLkParser {
    /// Searches k without an upper bound.
    pub fn new(grammar: Grammar) -> Result<Self, GrammarError> {
        Self::with_config(grammar, &AnalyzerConfig::default())
    }

    pub fn with_config(grammar: Grammar, config: &AnalyzerConfig) -> Result<Self, GrammarError> {
        let table = grammar.analyze(config)?;
        Ok(Self { grammar, table })
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn table(&self) -> &LLkParsingTable {
        &self.table
    }

    pub fn k(&self) -> usize {
        self.table.k()
    }

    pub fn parse(&self, word: &str) -> bool {
        self.derive(word).is_some()
    }

    /// Leftmost derivation of `word`, or `None` when it is rejected.
    pub fn derive(&self, word: &str) -> Option<Vec<Production>> {
        let k = self.k();

        let mut input: Word = Vec::new();
        for c in word.chars() {
            match Terminal::new(c) {
                Ok(t) if self.grammar.terminals().contains(&t) => input.push(t),
                _ => {
                    debug!("{:?} is not a terminal of the grammar", c);
                    return None;
                }
            }
        }
        input.extend(std::iter::repeat(Terminal::END).take(k));

        let mut stack: Vec<Symbol> = vec![Symbol::Terminal(Terminal::END); k];
        stack.push(Symbol::Nonterminal(self.grammar.sentence_symbol()));
        let mut cursor = 0;
        let mut derivation = Vec::new();

        // Stack height under each nonterminal expanded since the last match.
        let mut expanded: BTreeMap<Nonterminal, usize> = BTreeMap::new();

        while let Some(top) = stack.pop() {
            expanded.retain(|_, height| *height <= stack.len());

            match top {
                Symbol::Nonterminal(nt) => {
                    if expanded.insert(nt, stack.len()).is_some() {
                        debug!("{} derives itself at position {}", nt, cursor);
                        return None;
                    }

                    let window = &input[cursor..(cursor + k).min(input.len())];
                    let production = match self.table.get(nt, window) {
                        Some(production) => production,
                        None => {
                            trace!("no entry for {} on {}", nt, format_word(window));
                            return None;
                        }
                    };
                    trace!("{} on {}: {}", nt, format_word(window), production);

                    stack.extend(production.end.iter().rev().copied());
                    derivation.push(production.clone());
                }
                Symbol::Terminal(t) => {
                    if input.get(cursor) != Some(&t) {
                        trace!("expected {} at position {}", t, cursor);
                        return None;
                    }
                    cursor += 1;
                    expanded.clear();
                }
            }
        }

        (cursor == input.len()).then_some(derivation)
    }
}
