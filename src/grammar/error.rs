use thiserror::Error;

use super::{Nonterminal, Production, Symbol};

/// Configuration errors raised while building symbols, grammars and tables.
///
/// Rejecting an input word is not an error: [`LLkParser::parse`](super::LLkParser::parse)
/// just answers `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("nonterminal must be an uppercase letter, got {0:?}")]
    InvalidNonterminal(char),

    #[error("terminal must be a lowercase letter, got {0:?}")]
    InvalidTerminal(char),

    #[error("sentence symbol {0} is not a nonterminal of the grammar")]
    MissingSentenceSymbol(Nonterminal),

    #[error("production {production} rewrites undeclared nonterminal {symbol}")]
    UndeclaredNonterminal {
        production: Production,
        symbol: Nonterminal,
    },

    #[error("production {production} uses undeclared symbol {symbol}")]
    UndeclaredSymbol { production: Production, symbol: Symbol },

    #[error("Line {line}: wrong syntax for production: {text:?}")]
    Syntax { line: usize, text: String },

    #[error("grammar is not LL(k) for any k <= {max_k}")]
    NotLlk { max_k: usize },
}
