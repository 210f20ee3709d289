use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

use crate::{
    error::MalformedGrammarError,
    grammars::types::{Body, NonTerminal, ProductionSymbol, Terminal},
    language::{Word, EPSILON},
};

#[derive(Debug, Clone)]
pub struct ContextFreeGrammar {
    pub(super) variables: IndexSet<NonTerminal>,
    pub(super) start_symbol: NonTerminal,
    pub(super) productions: IndexMap<NonTerminal, IndexSet<Body>>,
}

impl ContextFreeGrammar {
    pub fn new(
        variables: impl IntoIterator<Item = char>,
        start_symbol: char,
    ) -> Result<Self, MalformedGrammarError> {
        let mut declared = IndexSet::new();

        for c in variables {
            if EPSILON.chars().eq([c]) {
                return Err(MalformedGrammarError::EpsilonAsVariable(c));
            }
            if !declared.insert(NonTerminal::new(c)) {
                return Err(MalformedGrammarError::DuplicateVariable(c));
            }
        }

        let start_symbol = NonTerminal::new(start_symbol);
        if !declared.contains(&start_symbol) {
            return Err(MalformedGrammarError::UndeclaredStart(
                start_symbol.0.as_char(),
            ));
        }

        Ok(Self {
            variables: declared,
            start_symbol,
            productions: IndexMap::new(),
        })
    }

    /// Builds a grammar from rules written as `S → aA | ε`.
    ///
    /// Characters listed in `variables` are non-terminals, everything else is a terminal.
    pub fn from_productions(
        variables: &str,
        start_symbol: char,
        productions: &[impl AsRef<str>],
    ) -> Result<Self, MalformedGrammarError> {
        let mut grammar = Self::new(
            variables.chars().filter(|c| !c.is_whitespace()),
            start_symbol,
        )?;

        for production in productions {
            let production = production.as_ref();
            let invalid = || MalformedGrammarError::InvalidProduction(production.to_owned());

            let (lhs, rhs) = production
                .split_once("→")
                .or_else(|| production.split_once("->"))
                .ok_or_else(invalid)?;

            let lhs = lhs.trim().chars().exactly_one().map_err(|_| invalid())?;

            for rhs in rhs.split('|').map(str::trim) {
                if rhs == EPSILON {
                    grammar.add_erasing_production(lhs)?;
                } else {
                    grammar.add_production(lhs, rhs)?;
                }
            }
        }

        Ok(grammar)
    }

    pub fn classify(&self, c: char) -> ProductionSymbol {
        let nt = NonTerminal::new(c);
        if self.variables.contains(&nt) {
            ProductionSymbol::NonTerminal(nt)
        } else {
            ProductionSymbol::Terminal(Terminal::new(c))
        }
    }

    pub fn is_variable(&self, nt: &NonTerminal) -> bool {
        self.variables.contains(nt)
    }

    pub fn add_erasing_production(&mut self, lhs: char) -> Result<(), MalformedGrammarError> {
        let lhs = self.declared(lhs)?;
        self.insert_body(lhs, Body::Epsilon);

        Ok(())
    }

    pub fn add_production(&mut self, lhs: char, rhs: &str) -> Result<(), MalformedGrammarError> {
        let lhs = self.declared(lhs)?;
        if rhs.is_empty() {
            return Err(MalformedGrammarError::EmptyBody(lhs.0.as_char()));
        }

        let body = if rhs == EPSILON {
            Body::Epsilon
        } else {
            Body::Word(Word::new(rhs.chars().map(|c| self.classify(c))))
        };
        self.insert_body(lhs, body);

        Ok(())
    }

    fn declared(&self, lhs: char) -> Result<NonTerminal, MalformedGrammarError> {
        let lhs = NonTerminal::new(lhs);
        if self.is_variable(&lhs) {
            Ok(lhs)
        } else {
            Err(MalformedGrammarError::UndeclaredLeftHandSide(lhs.0.as_char()))
        }
    }

    pub(crate) fn insert_body(&mut self, lhs: NonTerminal, body: Body) {
        self.productions
            .entry(lhs)
            .or_insert_with(IndexSet::new)
            .insert(body);
    }

    /// A grammar sharing this one's start symbol. Passes build their result through here so
    /// the input is never touched.
    pub(crate) fn derive(
        &self,
        variables: IndexSet<NonTerminal>,
        productions: IndexMap<NonTerminal, IndexSet<Body>>,
    ) -> Self {
        Self {
            variables,
            start_symbol: self.start_symbol.clone(),
            productions,
        }
    }

    pub fn variables(&self) -> &IndexSet<NonTerminal> {
        &self.variables
    }

    pub fn start_symbol(&self) -> &NonTerminal {
        &self.start_symbol
    }

    pub fn productions(&self) -> &IndexMap<NonTerminal, IndexSet<Body>> {
        &self.productions
    }

    pub fn bodies(&self, nt: &NonTerminal) -> impl Iterator<Item = &Body> {
        self.productions.get(nt).into_iter().flatten()
    }

    pub fn production_count(&self) -> usize {
        self.productions.values().map(IndexSet::len).sum()
    }

    pub fn definition(&self) -> String {
        let start_symbol = &self.start_symbol;

        let mut non_terminals = self.variables.clone();
        non_terminals.sort_by(|a, b| {
            if a == start_symbol {
                return std::cmp::Ordering::Less;
            }
            if b == start_symbol {
                return std::cmp::Ordering::Greater;
            }
            a.cmp(b)
        });

        let mut terminals = self
            .productions
            .values()
            .flatten()
            .flat_map(Body::symbols)
            .filter_map(|symbol| match symbol {
                ProductionSymbol::Terminal(t) => Some(t.clone()),
                ProductionSymbol::NonTerminal(_) => None,
            })
            .collect::<IndexSet<_>>();
        terminals.sort();

        let mut definition = format!(
            "G = ({{{}}}, {{{}}}, P, {})\n\n",
            non_terminals.iter().join(", "),
            terminals.iter().join(", "),
            start_symbol
        );

        definition += "P = {\n";

        for lhs in &non_terminals {
            let rhs = self.bodies(lhs).join(" | ");
            if !rhs.is_empty() {
                definition += &format!("  {} → {}\n", lhs, rhs);
            }
        }

        definition += "}\n";

        definition
    }
}

/// Grammars are equal when they declare the same variables and start symbol and give every
/// non-terminal the same set of bodies. Order is not significant, and a non-terminal without
/// bodies equals one that has no entry at all.
impl PartialEq for ContextFreeGrammar {
    fn eq(&self, other: &Self) -> bool {
        if self.variables != other.variables || self.start_symbol != other.start_symbol {
            return false;
        }

        let non_empty = |grammar: &Self| {
            grammar
                .productions
                .iter()
                .filter(|(_, rhs)| !rhs.is_empty())
                .map(|(lhs, rhs)| (lhs.clone(), rhs.clone()))
                .collect::<IndexMap<_, _>>()
        };

        non_empty(self) == non_empty(other)
    }
}

impl Eq for ContextFreeGrammar {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn classifies_by_declared_variables() {
        let grammar = ContextFreeGrammar::new("SA".chars(), 'S').unwrap();

        assert_eq!(
            grammar.classify('A'),
            ProductionSymbol::NonTerminal(NonTerminal::new('A'))
        );
        assert_eq!(
            grammar.classify('B'),
            ProductionSymbol::Terminal(Terminal::new('B'))
        );
        assert_eq!(
            grammar.classify('h'),
            ProductionSymbol::Terminal(Terminal::new('h'))
        );
    }

    #[test]
    fn rejects_malformed_declarations() {
        assert_eq!(
            ContextFreeGrammar::new("AB".chars(), 'S').unwrap_err(),
            MalformedGrammarError::UndeclaredStart('S')
        );
        assert_eq!(
            ContextFreeGrammar::new("SAS".chars(), 'S').unwrap_err(),
            MalformedGrammarError::DuplicateVariable('S')
        );
        assert_eq!(
            ContextFreeGrammar::new("Sε".chars(), 'S').unwrap_err(),
            MalformedGrammarError::EpsilonAsVariable('ε')
        );
        assert_eq!(
            ContextFreeGrammar::from_productions("S", 'S', &["A → a"]).unwrap_err(),
            MalformedGrammarError::UndeclaredLeftHandSide('A')
        );
        assert_eq!(
            ContextFreeGrammar::from_productions("S", 'S', &["S a"]).unwrap_err(),
            MalformedGrammarError::InvalidProduction("S a".to_owned())
        );
        assert_eq!(
            ContextFreeGrammar::from_productions("S", 'S', &["S → a |"]).unwrap_err(),
            MalformedGrammarError::EmptyBody('S')
        );
    }

    #[test]
    fn builds_from_arrow_notation() {
        let grammar =
            ContextFreeGrammar::from_productions("S A", 'S', &["S → aA | ε", "A -> b"]).unwrap();

        let s = NonTerminal::new('S');
        let a = NonTerminal::new('A');

        assert_eq!(grammar.start_symbol(), &s);
        assert_eq!(grammar.production_count(), 3);
        assert!(grammar.bodies(&s).any(Body::is_epsilon));
        assert_eq!(grammar.bodies(&a).join(" | "), "b");
    }

    #[test]
    fn equality_ignores_order_and_empty_entries() {
        let left =
            ContextFreeGrammar::from_productions("S A", 'S', &["S → a | bA", "A → b"]).unwrap();
        let mut right =
            ContextFreeGrammar::from_productions("A S", 'S', &["A → b", "S → bA | a"]).unwrap();
        right
            .productions
            .insert(NonTerminal::new('Z'), IndexSet::new());

        assert_eq!(left, right);

        let different =
            ContextFreeGrammar::from_productions("S A", 'S', &["S → a", "A → b"]).unwrap();
        assert_ne!(left, different);
    }

    #[test]
    fn definition_lists_start_symbol_first() {
        let grammar =
            ContextFreeGrammar::from_productions("A S", 'S', &["A → b", "S → aA | ε"]).unwrap();

        assert_eq!(
            grammar.definition(),
            "G = ({S, A}, {a, b}, P, S)\n\nP = {\n  S → aA | ε\n  A → b\n}\n"
        );
    }
}
