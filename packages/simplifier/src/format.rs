//! The line-oriented grammar file format.
//!
//! ```text
//! S A B
//! S
//! S aA
//! S h
//! A b
//! ```
//!
//! The first line declares the variables, the second names the start symbol, and every
//! following line holds one production as `<variable> <body>`. A body consisting of just the
//! epsilon marker (`h` unless configured otherwise, `ε` always) is the empty body.

use std::{fmt::Display, fs, path::Path, str::FromStr};

use winnow::{
    ascii::{space0, space1},
    combinator::{delimited, separated, terminated},
    error::{StrContext, StrContextValue},
    token::{any, take_till},
    ModalResult, Parser,
};

use crate::{
    error::{Error, MalformedGrammarError, Result},
    grammars::{Body, ContextFreeGrammar, ProductionSymbol},
    language::EPSILON,
};

pub const DEFAULT_EPSILON_MARKER: char = 'h';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextFormat {
    pub epsilon_marker: char,
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            epsilon_marker: DEFAULT_EPSILON_MARKER,
        }
    }
}

fn symbol(input: &mut &str) -> ModalResult<char> {
    any.verify(|c: &char| !c.is_whitespace())
        .context(StrContext::Expected(StrContextValue::Description(
            "a single-character symbol",
        )))
        .parse_next(input)
}

fn variables_line(input: &mut &str) -> ModalResult<Vec<char>> {
    delimited(space0, separated(1.., symbol, space1), space0).parse_next(input)
}

fn start_line(input: &mut &str) -> ModalResult<char> {
    delimited(space0, symbol, space0).parse_next(input)
}

fn production_line<'i>(input: &mut &'i str) -> ModalResult<(char, &'i str)> {
    (
        delimited(space0, symbol, space1),
        terminated(take_till(1.., char::is_whitespace), space0),
    )
        .parse_next(input)
}

fn syntax(line: usize, error: impl Display) -> Error {
    Error::Syntax {
        line,
        message: error.to_string(),
    }
}

impl TextFormat {
    pub fn new(epsilon_marker: char) -> Self {
        Self { epsilon_marker }
    }

    fn is_epsilon(&self, body: &str) -> bool {
        body == EPSILON || body.chars().eq([self.epsilon_marker])
    }

    pub fn parse(&self, text: &str) -> Result<ContextFreeGrammar> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let (line, variables) = lines.next().ok_or(Error::MissingLine("variables"))?;
        let variables = variables_line
            .parse(variables)
            .map_err(|e| syntax(line, e))?;

        let (line, start_symbol) = lines.next().ok_or(Error::MissingLine("start symbol"))?;
        let start_symbol = start_line
            .parse(start_symbol)
            .map_err(|e| syntax(line, e))?;

        if variables.contains(&self.epsilon_marker) {
            return Err(MalformedGrammarError::EpsilonAsVariable(self.epsilon_marker).into());
        }

        let mut grammar = ContextFreeGrammar::new(variables, start_symbol)?;

        for (line, production) in lines {
            let (lhs, rhs) = production_line
                .parse(production)
                .map_err(|e| syntax(line, e))?;

            if self.is_epsilon(rhs) {
                grammar.add_erasing_production(lhs)?;
            } else {
                grammar.add_production(lhs, rhs)?;
            }
        }

        tracing::debug!(
            "Parsed grammar with {} variables and {} productions",
            grammar.variables().len(),
            grammar.production_count()
        );

        Ok(grammar)
    }

    pub fn write(&self, grammar: &ContextFreeGrammar) -> Result<String> {
        if let Some(nt) = grammar
            .variables()
            .iter()
            .find(|nt| nt.0.as_char() == self.epsilon_marker)
        {
            return Err(MalformedGrammarError::EpsilonAsVariable(nt.0.as_char()).into());
        }

        let variables = grammar
            .variables()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();

        let mut text = format!("{}\n{}\n", variables.join(" "), grammar.start_symbol());

        for lhs in grammar.variables() {
            for body in grammar.bodies(lhs) {
                let body = match body {
                    Body::Epsilon => self.epsilon_marker.to_string(),
                    Body::Word(word) => {
                        let symbol = match word.0.as_slice() {
                            [ProductionSymbol::Terminal(t)] => Some(t.0),
                            [ProductionSymbol::NonTerminal(nt)] => Some(nt.0),
                            _ => None,
                        };
                        if symbol.is_some_and(|s| s.as_char() == self.epsilon_marker) {
                            return Err(Error::AmbiguousBody {
                                variable: lhs.0.as_char(),
                                marker: self.epsilon_marker,
                            });
                        }
                        word.to_string()
                    }
                };

                text += &format!("{} {}\n", lhs, body);
            }
        }

        Ok(text)
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<ContextFreeGrammar> {
        self.parse(&fs::read_to_string(path)?)
    }

    pub fn save(&self, grammar: &ContextFreeGrammar, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.write(grammar)?)?;

        Ok(())
    }
}

impl FromStr for ContextFreeGrammar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TextFormat::default().parse(s)
    }
}
