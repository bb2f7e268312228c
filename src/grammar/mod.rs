pub mod error;
pub mod first_follow_k;
pub mod grammar;
pub mod llk_parsing_table;
pub mod parse;
pub mod parser;
pub mod pretty_print;
pub mod symbol;
pub mod words;

pub use error::GrammarError;
pub use grammar::{Grammar, Production};
pub use llk_parsing_table::{AnalyzerConfig, LLkParsingTable};
pub use parser::LLkParser;
pub use symbol::{Nonterminal, SententialForm, Symbol, Terminal, Word};

pub const END_MARK: char = '$';
pub const LAMBDA: &str = "λ";
pub const EMPTY_SET: &str = "∅";
