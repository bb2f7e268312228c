use std::collections::BTreeMap;

use log::{debug, warn};

use super::{words::format_word, Grammar, GrammarError, Nonterminal, Production, Terminal, Word};

/// Knobs for the minimal-k search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Give up once k would exceed this bound. `None` searches forever, which
    /// never terminates for a grammar that is not LL(k) for any k.
    pub max_k: Option<usize>,
}

/// Lookahead-indexed parse table: `rows[A][w]` is the production to apply
/// when `A` is on top of the stack and `w` are the next `k` input terminals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LLkParsingTable {
    k: usize,
    rows: BTreeMap<Nonterminal, BTreeMap<Word, Production>>,
}

impl LLkParsingTable {
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn rows(&self) -> &BTreeMap<Nonterminal, BTreeMap<Word, Production>> {
        &self.rows
    }

    pub fn get(&self, nt: Nonterminal, lookahead: &[Terminal]) -> Option<&Production> {
        self.rows.get(&nt)?.get(lookahead)
    }
}

impl Grammar {
    /// Smallest k for which the lookahead sets of every pair of alternatives
    /// are disjoint.
    ///
    /// Every conflict bumps k at once and the remaining pairs of the pass are
    /// compared with the new k; passes repeat until one finds no conflict.
    pub fn find_k(&self, config: &AnalyzerConfig) -> Result<usize, GrammarError> {
        if self
            .nonterminals()
            .iter()
            .all(|nt| self.productions_of(*nt).len() == 1)
        {
            return Ok(0);
        }

        let exceeds = |k: usize| match config.max_k {
            Some(max_k) if k > max_k => Err(GrammarError::NotLlk { max_k }),
            _ => Ok(()),
        };

        let mut k = 1;
        exceeds(k)?;
        loop {
            let mut clean = true;
            for nt in self.nonterminals() {
                let productions = self.productions_of(*nt);
                for (i, a) in productions.iter().enumerate() {
                    for b in &productions[i + 1..] {
                        let conflict = !self
                            .look_ahead(k, a)
                            .is_disjoint(&self.look_ahead(k, b));
                        if conflict {
                            debug!("{} and {} share a lookahead with k = {}", a, b, k);
                            k += 1;
                            clean = false;
                            exceeds(k)?;
                        }
                    }
                }
            }
            if clean {
                debug!("grammar is LL({})", k);
                return Ok(k);
            }
        }
    }

    pub fn generate_llk_parsing_table(&self, k: usize) -> LLkParsingTable {
        let mut rows = BTreeMap::new();
        for nt in self.nonterminals() {
            let mut row: BTreeMap<Word, Production> = BTreeMap::new();
            for production in self.productions_of(*nt) {
                for word in self.look_ahead(k, production) {
                    if let Some(previous) = row.insert(word.clone(), production.clone()) {
                        warn!(
                            "lookahead {} of {} is taken over from {}",
                            format_word(&word),
                            production,
                            previous
                        );
                    }
                }
            }
            rows.insert(*nt, row);
        }

        debug!(
            "LL({}) table with {} entries",
            k,
            rows.values().map(BTreeMap::len).sum::<usize>()
        );
        LLkParsingTable { k, rows }
    }

    /// Finds the minimal k and builds the matching table.
    pub fn analyze(&self, config: &AnalyzerConfig) -> Result<LLkParsingTable, GrammarError> {
        let k = self.find_k(config)?;
        Ok(self.generate_llk_parsing_table(k))
    }
}
