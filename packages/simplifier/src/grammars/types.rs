use derive_more::Display;

use crate::language::{Symbol, Word, EPSILON};

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Terminal(pub Symbol);

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonTerminal(pub Symbol);

impl NonTerminal {
    pub fn new(c: char) -> Self {
        NonTerminal(Symbol::new(c))
    }
}

impl Terminal {
    pub fn new(c: char) -> Self {
        Terminal(Symbol::new(c))
    }
}

#[derive(Debug, Display, Clone, PartialEq, Eq, Hash)]
pub enum ProductionSymbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
}

impl ProductionSymbol {
    pub fn as_non_terminal(&self) -> Option<&NonTerminal> {
        match self {
            ProductionSymbol::NonTerminal(nt) => Some(nt),
            ProductionSymbol::Terminal(_) => None,
        }
    }
}

/// The right-hand side of a production.
///
/// The empty body is its own variant rather than a reserved terminal character, so a
/// grammar is free to use any character as a terminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Body {
    Epsilon,
    Word(Word<ProductionSymbol>),
}

impl Body {
    pub fn unit(nt: NonTerminal) -> Self {
        Body::Word(Word(vec![ProductionSymbol::NonTerminal(nt)]))
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Body::Epsilon)
    }

    pub fn as_word(&self) -> Option<&Word<ProductionSymbol>> {
        match self {
            Body::Word(word) => Some(word),
            Body::Epsilon => None,
        }
    }

    /// The referenced non-terminal if this body is a unit production.
    pub fn as_unit(&self) -> Option<&NonTerminal> {
        match self {
            Body::Word(word) if word.len() == 1 => word.0[0].as_non_terminal(),
            _ => None,
        }
    }

    /// Symbols of the body; empty for [`Body::Epsilon`].
    pub fn symbols(&self) -> impl Iterator<Item = &ProductionSymbol> {
        self.as_word().into_iter().flat_map(|word| word.iter())
    }

    pub fn non_terminals(&self) -> impl Iterator<Item = &NonTerminal> {
        self.symbols().filter_map(ProductionSymbol::as_non_terminal)
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Body::Epsilon => write!(f, "{EPSILON}"),
            Body::Word(word) => write!(f, "{word}"),
        }
    }
}

impl From<Word<ProductionSymbol>> for Body {
    fn from(word: Word<ProductionSymbol>) -> Self {
        if word.is_empty() {
            Body::Epsilon
        } else {
            Body::Word(word)
        }
    }
}
