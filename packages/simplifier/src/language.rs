use derive_more::Display;

pub const EPSILON: &str = "ε";

/// A single grammar character.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(char);

impl Symbol {
    pub fn new(c: char) -> Self {
        Symbol(c)
    }

    pub fn as_char(&self) -> char {
        self.0
    }
}

/// A sequence of symbols.
///
/// Words may be empty while bodies are being built. An empty word never ends up in a
/// grammar: converting it into a `Body` yields `Body::Epsilon`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word<T>(pub Vec<T>);

impl<T> Word<T> {
    pub fn new(symbols: impl IntoIterator<Item = T>) -> Self {
        Word(symbols.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Word<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for symbol in &self.0 {
            write!(f, "{symbol}")?;
        }

        Ok(())
    }
}
