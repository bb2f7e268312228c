extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod grammar;
pub use grammar::{
    AnalyzerConfig, Grammar, GrammarError, LLkParser, LLkParsingTable, Nonterminal, Production,
    SententialForm, Symbol, Terminal, Word,
};

fn build_parser(grammar: &str, max_k: usize) -> Result<LLkParser, GrammarError> {
    let g = Grammar::parse(grammar)?;
    LLkParser::with_config(g, &AnalyzerConfig { max_k: Some(max_k) })
}

fn error_json(e: impl std::fmt::Display) -> String {
    serde_json::json!({ "error": e.to_string() }).to_string()
}

#[wasm_bindgen]
pub fn llk_table_to_json(grammar: &str, max_k: usize) -> String {
    match build_parser(grammar, max_k) {
        Ok(parser) => parser
            .table()
            .to_output()
            .to_json()
            .unwrap_or_else(error_json),
        Err(e) => error_json(e),
    }
}

/// `{"accepted": bool}`, or `{"error": ...}` when the grammar is unusable.
#[wasm_bindgen]
pub fn llk_accepts(grammar: &str, max_k: usize, word: &str) -> String {
    match build_parser(grammar, max_k) {
        Ok(parser) => serde_json::json!({ "accepted": parser.parse(word) }).to_string(),
        Err(e) => error_json(e),
    }
}

#[cfg(test)]
mod test_grammars {
    pub const ANBN: &str = "S -> aSb\nS -> c";

    pub const SHARED_PREFIX: &str = "S -> abc\nS -> abd";

    pub const LISTS: &str = "\
# a* b x* y c, or d
S -> AbBc
S -> d
A -> aA
A ->
B -> xB
B -> y";
}




#[cfg(test)]
mod words_tests {
    use std::collections::BTreeSet;

    use crate::grammar::symbol::word_from_str;
    use crate::grammar::words::{concat, format_words};
    use crate::Word;

    fn set(words: &[&str]) -> BTreeSet<Word> {
        words.iter().map(|w| word_from_str(w).unwrap()).collect()
    }

    #[test]
    fn empty_set_is_identity() {
        let a = set(&["a", "b"]);
        assert_eq!(concat(&a, &BTreeSet::new()), a);
        assert_eq!(concat(&BTreeSet::new(), &a), a);
        assert!(concat(&BTreeSet::new(), &BTreeSet::new()).is_empty());
    }

    #[test]
    fn concatenation() {
        let a = set(&["a", ""]);
        let b = set(&["b", "c"]);
        assert_eq!(concat(&a, &b), set(&["ab", "ac", "b", "c"]));
    }

    #[test]
    fn formatting() {
        assert_eq!(format_words(&BTreeSet::new()), "∅");
        assert_eq!(format_words(&set(&[""])), "{λ}");
        assert_eq!(format_words(&set(&["ab", "a", ""])), "{λ, a, ab}");
    }
}

#[cfg(test)]
mod first_follow_tests {
    use std::collections::BTreeSet;

    use super::test_grammars::{ANBN, LISTS};
    use crate::grammar::symbol::word_from_str;
    use crate::{Grammar, Nonterminal, Symbol, Word};

    fn set(words: &[&str]) -> BTreeSet<Word> {
        words.iter().map(|w| word_from_str(w).unwrap()).collect()
    }

    fn end_set(words: &[&str]) -> BTreeSet<Word> {
        words
            .iter()
            .map(|w| w.chars().map(|c| end_or_terminal(c)).collect())
            .collect()
    }

    fn end_or_terminal(c: char) -> crate::Terminal {
        if c == '$' {
            crate::Terminal::END
        } else {
            crate::Terminal::new(c).unwrap()
        }
    }

    fn form(g: &Grammar, nt: char) -> Vec<Symbol> {
        let nt = Nonterminal::new(nt).unwrap();
        assert!(g.nonterminals().contains(&nt));
        vec![Symbol::Nonterminal(nt)]
    }

    #[test]
    fn first_of_anbn() {
        let g = Grammar::parse(ANBN).unwrap();
        assert_eq!(g.first_k(1, &form(&g, 'S')), set(&["a", "c"]));
        // the inner S is on the call chain already
        assert_eq!(g.first_k(2, &form(&g, 'S')), set(&["a", "c"]));

        let s = Symbol::Nonterminal(g.sentence_symbol());
        let a = Symbol::Terminal(crate::Terminal::new('a').unwrap());
        let b = Symbol::Terminal(crate::Terminal::new('b').unwrap());
        assert_eq!(g.first_k(2, &[a, s, b]), set(&["aa", "ac"]));
        assert_eq!(g.first_k(3, &[a, s, b]), set(&["aa", "ac"]));
    }

    #[test]
    fn first_base_cases() {
        let g = Grammar::parse(ANBN).unwrap();
        assert!(g.first_k(0, &form(&g, 'S')).is_empty());
        assert_eq!(g.first_k(3, &[]), set(&[""]));
    }

    #[test]
    fn first_of_lambda_continues_with_rest() {
        let g = Grammar::parse("S -> AB\nA ->\nA -> a\nB -> b").unwrap();
        let a = Nonterminal::new('A').unwrap();
        let b = Nonterminal::new('B').unwrap();
        let w = vec![Symbol::Nonterminal(a), Symbol::Nonterminal(b)];
        // the non-lambda alternative of A drops the trailing B
        assert_eq!(g.first_k(2, &w), set(&["a", "b"]));
    }

    #[test]
    fn first_stops_on_cycles() {
        let g = Grammar::parse("S -> A\nA -> S\nA -> x").unwrap();
        assert_eq!(g.first_k(1, &form(&g, 'S')), set(&["x"]));
    }

    #[test]
    fn first_words_never_exceed_k() {
        let g = Grammar::parse(LISTS).unwrap();
        for k in 1..4 {
            for nt in g.nonterminals() {
                for w in g.first_k(k, &[Symbol::Nonterminal(*nt)]) {
                    assert!(w.len() <= k);
                }
            }
        }
    }

    #[test]
    fn follow_of_anbn() {
        let g = Grammar::parse(ANBN).unwrap();
        let s = Nonterminal::new('S').unwrap();
        assert_eq!(g.follow_k(1, s), end_set(&["$", "b"]));
        assert_eq!(g.follow_k(2, s), end_set(&["$$", "b$"]));
    }

    #[test]
    fn follow_of_lists() {
        let g = Grammar::parse(LISTS).unwrap();
        let s = Nonterminal::new('S').unwrap();
        let a = Nonterminal::new('A').unwrap();
        let b = Nonterminal::new('B').unwrap();
        assert_eq!(g.follow_k(1, s), end_set(&["$"]));
        assert_eq!(g.follow_k(1, a), end_set(&["b"]));
        assert_eq!(g.follow_k(1, b), end_set(&["c"]));
        assert_eq!(g.follow_k(2, b), end_set(&["c$"]));
    }

    #[test]
    fn follow_skips_trailing_occurrences() {
        // E only ever ends a production
        let g = Grammar::parse("S -> aE\nE -> bE\nE ->").unwrap();
        assert!(g.follow_k(1, Nonterminal::new('E').unwrap()).is_empty());
    }

    #[test]
    fn sentence_symbol_follow_words_have_length_k() {
        let g = Grammar::parse(ANBN).unwrap();
        let s = Nonterminal::new('S').unwrap();
        for k in 1..5 {
            for w in g.follow_k(k, s) {
                assert_eq!(w.len(), k);
            }
        }
    }

    #[test]
    fn follow_words_can_be_shorter_than_k() {
        let g = Grammar::parse(LISTS).unwrap();
        let a = Nonterminal::new('A').unwrap();
        let b = Nonterminal::new('B').unwrap();
        // FIRST_k of `bBc$$$` stops after the first symbol B expands to
        assert_eq!(g.follow_k(3, a), end_set(&["bx", "by"]));
        assert_eq!(g.follow_k(3, b), end_set(&["c$$"]));
        for k in 1..5 {
            for nt in g.nonterminals() {
                assert!(g.follow_k(k, *nt).iter().all(|w| w.len() <= k));
            }
        }
    }

    #[test]
    fn look_ahead_of_anbn() {
        let g = Grammar::parse(ANBN).unwrap();
        let s = Nonterminal::new('S').unwrap();
        let prods = g.productions_of(s);
        assert_eq!(g.look_ahead(1, &prods[0]), set(&["a"]));
        assert_eq!(g.look_ahead(1, &prods[1]), set(&["c"]));
        assert_eq!(g.look_ahead(0, &prods[0]), set(&[""]));
    }
}

#[cfg(test)]
mod find_k_tests {
    use super::test_grammars::{ANBN, LISTS, SHARED_PREFIX};
    use crate::{AnalyzerConfig, Grammar, GrammarError};

    fn find_k(grammar: &str) -> usize {
        let _ = env_logger::builder().is_test(true).try_init();
        Grammar::parse(grammar)
            .unwrap()
            .find_k(&AnalyzerConfig::default())
            .unwrap()
    }

    #[test]
    fn single_production_per_nonterminal() {
        assert_eq!(find_k("S -> aA\nA -> b"), 0);
        assert_eq!(find_k("S ->"), 0);
    }

    #[test]
    fn anbn_is_ll1() {
        assert_eq!(find_k(ANBN), 1);
    }

    #[test]
    fn shared_prefix_needs_more_lookahead() {
        assert_eq!(find_k("S -> ab\nS -> ac"), 2);
        assert_eq!(find_k(SHARED_PREFIX), 3);
    }

    #[test]
    fn lists_is_ll1() {
        assert_eq!(find_k(LISTS), 1);
    }

    #[test]
    fn bounded_search_gives_up() {
        let g = Grammar::parse("S -> Ab\nS -> Ac\nA -> a").unwrap();
        assert_eq!(
            g.find_k(&AnalyzerConfig { max_k: Some(4) }),
            Err(GrammarError::NotLlk { max_k: 4 })
        );
    }

    #[test]
    fn left_recursion_separates_at_two() {
        // the S -> Sa lookahead stops at the inner b, which is shorter than k
        assert_eq!(find_k("S -> Sa\nS -> b"), 2);
    }

    #[test]
    fn bound_below_needed_k() {
        let g = Grammar::parse(SHARED_PREFIX).unwrap();
        assert_eq!(
            g.find_k(&AnalyzerConfig { max_k: Some(2) }),
            Err(GrammarError::NotLlk { max_k: 2 })
        );
        assert_eq!(g.find_k(&AnalyzerConfig { max_k: Some(3) }), Ok(3));
    }

    #[test]
    fn shared_leading_nonterminal_never_separates() {
        // FIRST_k drops whatever follows an expanded nonterminal
        let g = Grammar::parse("S -> Ab\nS -> Ac\nA -> a").unwrap();
        assert_eq!(
            g.find_k(&AnalyzerConfig { max_k: Some(3) }),
            Err(GrammarError::NotLlk { max_k: 3 })
        );
    }

    #[test]
    fn table_rows() {
        let g = Grammar::parse(ANBN).unwrap();
        let table = g.analyze(&AnalyzerConfig::default()).unwrap();
        assert_eq!(table.k(), 1);
        let s = g.sentence_symbol();
        let row = &table.rows()[&s];
        assert_eq!(row.len(), 2);
        let a = crate::Terminal::new('a').unwrap();
        assert_eq!(table.get(s, &[a]).unwrap().to_string(), "S -> aSb");
        assert!(table.get(s, &[crate::Terminal::END]).is_none());
    }

    #[test]
    fn later_production_takes_over_shared_lookahead() {
        let g = Grammar::parse("S -> a\nS -> ab").unwrap();
        let table = g.generate_llk_parsing_table(1);
        let a = crate::Terminal::new('a').unwrap();
        assert_eq!(table.get(g.sentence_symbol(), &[a]).unwrap().to_string(), "S -> ab");
    }
}
