//! Simplification of context-free grammars: removal of erasing (ε), unit and useless
//! productions, the preparation step before a conversion to Chomsky normal form.
//!
//! ```
//! use simplifier::ContextFreeGrammar;
//!
//! let grammar: ContextFreeGrammar = "S A B\nS\nS aA\nS B\nA b\nB Bc\n".parse()?;
//! let simplified = grammar.simplify();
//!
//! assert_eq!(simplified.definition(), "G = ({S, A}, {a, b}, P, S)\n\nP = {\n  S → aA\n  A → b\n}\n");
//! # Ok::<(), simplifier::Error>(())
//! ```

pub mod error;
pub mod format;
pub mod grammars;
pub mod language;

pub use error::{Error, MalformedGrammarError, Result};
pub use format::TextFormat;
pub use grammars::{ContextFreeGrammar, Pass};
