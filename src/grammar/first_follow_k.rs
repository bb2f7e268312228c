use std::collections::BTreeSet;

use super::{
    symbol::word_to_form, words::concat, Grammar, Nonterminal, Production, Symbol, Terminal, Word,
};

impl Grammar {
    /// Words of at most `k` terminals that can begin a derivation of `w`.
    pub fn first_k(&self, k: usize, w: &[Symbol]) -> BTreeSet<Word> {
        self.first_k_impl(k, w, &mut BTreeSet::new())
    }

    fn first_k_impl(
        &self,
        k: usize,
        w: &[Symbol],
        visited: &mut BTreeSet<Nonterminal>,
    ) -> BTreeSet<Word> {
        if k == 0 {
            return BTreeSet::new();
        }
        let (first_symbol, rest) = match w.split_first() {
            Some(split) => split,
            None => return BTreeSet::from([Word::new()]),
        };

        match first_symbol {
            Symbol::Terminal(t) => concat(
                &BTreeSet::from([vec![*t]]),
                &self.first_k_impl(k - 1, rest, visited),
            ),
            Symbol::Nonterminal(nt) => {
                // cycle on this call chain
                if !visited.insert(*nt) {
                    return BTreeSet::new();
                }

                let mut firsts = BTreeSet::new();
                for production in self.productions_of(*nt) {
                    if production.is_lambda() {
                        firsts.extend(self.first_k_impl(k, rest, visited));
                    } else {
                        // `rest` is not appended to the expansion; only exact
                        // for single-symbol forms.
                        firsts.extend(self.first_k_impl(k, &production.end, visited));
                    }
                }

                visited.remove(nt);
                firsts
            }
        }
    }

    /// Words of `k` terminals that can follow `nt` in a derivation from the
    /// sentence symbol.
    pub fn follow_k(&self, k: usize, nt: Nonterminal) -> BTreeSet<Word> {
        self.follow_k_impl(k, nt, &mut BTreeSet::new())
    }

    fn follow_k_impl(
        &self,
        k: usize,
        nt: Nonterminal,
        visited: &mut BTreeSet<Nonterminal>,
    ) -> BTreeSet<Word> {
        let mut follow = BTreeSet::new();
        if nt == self.sentence_symbol() {
            follow.insert(vec![Terminal::END; k]);
        }
        if !visited.insert(nt) {
            return follow;
        }

        let symbol = Symbol::Nonterminal(nt);
        for production in self.productions() {
            // `nt` as the last symbol is skipped just like a missing `nt`.
            let rhs = production.after_symbol(symbol);
            if rhs.is_empty() {
                continue;
            }
            for extra in self.follow_k_impl(k, production.start, visited) {
                let mut form = rhs.to_vec();
                form.extend(word_to_form(&extra));
                follow.extend(self.first_k(k, &form));
            }
        }

        visited.remove(&nt);
        follow
    }

    /// Lookahead words selecting `production`.
    ///
    /// With `k = 0` the empty window is the only lookahead, so a grammar with
    /// one production per nonterminal still gets a usable table.
    pub fn look_ahead(&self, k: usize, production: &Production) -> BTreeSet<Word> {
        if k == 0 {
            return BTreeSet::from([Word::new()]);
        }

        let mut words = BTreeSet::new();
        for follow in self.follow_k(k, production.start) {
            let mut form = production.end.clone();
            form.extend(word_to_form(&follow));
            words.extend(self.first_k(k, &form));
        }
        words
    }
}
