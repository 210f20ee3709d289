use std::{
    collections::{BTreeSet, HashMap},
    path::PathBuf,
};

use simplifier::{
    grammars::{NonTerminal, ProductionSymbol},
    ContextFreeGrammar, TextFormat,
};

/// Helper function to get a path to a grammar in the test data directory
pub fn grammar_path(filename: &str) -> PathBuf {
    let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push(format!("tests/grammars/{}", filename));
    p
}

pub fn load(filename: &str) -> ContextFreeGrammar {
    TextFormat::default()
        .load(grammar_path(filename))
        .expect("failed to load test grammar")
}

#[allow(dead_code)]
pub const FIXTURES: &[&str] = &[
    "empty_start.txt",
    "unit_chain.txt",
    "useless_variables.txt",
    "already_simple.txt",
    "mixed.txt",
    "expression.txt",
];

/// Terminal strings of at most `max_len` characters derivable from the start symbol.
#[allow(dead_code)]
pub fn language_up_to(grammar: &ContextFreeGrammar, max_len: usize) -> BTreeSet<String> {
    let mut language: HashMap<NonTerminal, BTreeSet<String>> = HashMap::new();

    loop {
        let mut changed = false;

        for lhs in grammar.variables() {
            for body in grammar.bodies(lhs) {
                let mut prefixes = BTreeSet::from([String::new()]);

                for symbol in body.symbols() {
                    let options = match symbol {
                        ProductionSymbol::Terminal(t) => BTreeSet::from([t.to_string()]),
                        ProductionSymbol::NonTerminal(nt) => {
                            language.get(nt).cloned().unwrap_or_default()
                        }
                    };

                    prefixes = prefixes
                        .iter()
                        .flat_map(|prefix| options.iter().map(move |o| format!("{prefix}{o}")))
                        .filter(|s| s.chars().count() <= max_len)
                        .collect();
                }

                let derived = language.entry(lhs.clone()).or_default();
                for s in prefixes {
                    changed |= derived.insert(s);
                }
            }
        }

        if !changed {
            break;
        }
    }

    language
        .remove(grammar.start_symbol())
        .unwrap_or_default()
}
