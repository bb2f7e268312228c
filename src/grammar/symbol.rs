use std::fmt;

use super::{GrammarError, END_MARK};

/// A rewritable syntactic category, always an uppercase ASCII letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Nonterminal(char);

/// An atomic input unit, a lowercase ASCII letter or the end marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Terminal(char);

impl Nonterminal {
    pub fn new(c: char) -> Result<Self, GrammarError> {
        if c.is_ascii_uppercase() {
            Ok(Self(c))
        } else {
            Err(GrammarError::InvalidNonterminal(c))
        }
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl Terminal {
    /// Sentinel padding the input and the parse stack, never part of the
    /// input alphabet.
    pub const END: Terminal = Terminal(END_MARK);

    pub fn new(c: char) -> Result<Self, GrammarError> {
        if c.is_ascii_lowercase() {
            Ok(Self(c))
        } else {
            Err(GrammarError::InvalidTerminal(c))
        }
    }

    pub fn as_char(self) -> char {
        self.0
    }

    pub fn is_end(self) -> bool {
        self == Self::END
    }
}

/// Symbols compare by variant first, so `Nonterminal('a')` can never equal
/// `Terminal('a')` even if the characters match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Nonterminal(Nonterminal),
    Terminal(Terminal),
}

impl Symbol {
    pub fn non_terminal(&self) -> Option<Nonterminal> {
        match self {
            Symbol::Nonterminal(nt) => Some(*nt),
            Symbol::Terminal(_) => None,
        }
    }

    pub fn terminal(&self) -> Option<Terminal> {
        match self {
            Symbol::Nonterminal(_) => None,
            Symbol::Terminal(t) => Some(*t),
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            Symbol::Nonterminal(nt) => nt.as_char(),
            Symbol::Terminal(t) => t.as_char(),
        }
    }
}

impl From<Nonterminal> for Symbol {
    fn from(nt: Nonterminal) -> Self {
        Symbol::Nonterminal(nt)
    }
}

impl From<Terminal> for Symbol {
    fn from(t: Terminal) -> Self {
        Symbol::Terminal(t)
    }
}

impl fmt::Display for Nonterminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

pub type SententialForm = Vec<Symbol>;

/// Terminal-only sequence; the empty word is lambda.
pub type Word = Vec<Terminal>;

/// Widens a word back into a sentential form.
pub fn word_to_form(word: &[Terminal]) -> SententialForm {
    word.iter().copied().map(Symbol::Terminal).collect()
}

/// Turns a string of terminal characters into a word.
pub fn word_from_str(word: &str) -> Result<Word, GrammarError> {
    word.chars().map(Terminal::new).collect()
}
