use indexmap::IndexSet;
use itertools::Itertools;

use crate::{
    grammars::{
        context_free::ContextFreeGrammar,
        types::{Body, NonTerminal, ProductionSymbol},
    },
    language::Word,
};

fn is_nullable(symbol: &ProductionSymbol, nullable: &IndexSet<NonTerminal>) -> bool {
    symbol
        .as_non_terminal()
        .is_some_and(|nt| nullable.contains(nt))
}

/// Every word obtained from `word` by deleting any subset of its nullable symbols, `word`
/// itself included. The empty word is never produced.
pub fn expand_nullable(
    word: &Word<ProductionSymbol>,
    nullable: &IndexSet<NonTerminal>,
) -> IndexSet<Word<ProductionSymbol>> {
    let mut combinations = IndexSet::new();
    collect_combinations(word.clone(), nullable, &mut combinations);
    combinations
}

fn collect_combinations(
    word: Word<ProductionSymbol>,
    nullable: &IndexSet<NonTerminal>,
    combinations: &mut IndexSet<Word<ProductionSymbol>>,
) {
    // a word seen before has already contributed all of its shorter variants
    if !combinations.insert(word.clone()) {
        return;
    }

    for position in word.iter().positions(|symbol| is_nullable(symbol, nullable)) {
        let mut shorter = word.0.clone();
        shorter.remove(position);

        if !shorter.is_empty() {
            collect_combinations(Word(shorter), nullable, combinations);
        }
    }
}

impl ContextFreeGrammar {
    /// Non-terminals with an empty body, plus those with a unit body naming one of them.
    ///
    /// Propagation is a single sweep in declaration order: `B → A` marks `B` only if `A` was
    /// already marked when `B` is visited, and bodies made of several nullable symbols never
    /// mark their left-hand side.
    pub fn nullable_non_terminals(&self) -> IndexSet<NonTerminal> {
        let mut nullable = self
            .variables
            .iter()
            .filter(|nt| self.bodies(nt).any(Body::is_epsilon))
            .cloned()
            .collect::<IndexSet<_>>();

        for nt in &self.variables {
            if self
                .bodies(nt)
                .filter_map(Body::as_unit)
                .any(|unit| nullable.contains(unit))
            {
                nullable.insert(nt.clone());
            }
        }

        nullable
    }

    #[tracing::instrument(skip_all)]
    pub fn eliminate_erasing_productions(&self) -> Self {
        let nullable = self.nullable_non_terminals();
        tracing::debug!(
            "Nullable non-terminals: {{{}}}",
            nullable.iter().join(", ")
        );

        let productions = self
            .productions
            .iter()
            .map(|(lhs, rhs)| {
                let mut next_productions = IndexSet::new();

                for body in rhs {
                    let Body::Word(word) = body else {
                        continue;
                    };

                    if body.as_unit().is_some_and(|nt| nullable.contains(nt)) {
                        tracing::trace!("Dropping {} → {}", lhs, body);
                        continue;
                    }

                    if word.iter().any(|symbol| is_nullable(symbol, &nullable)) {
                        let combinations = expand_nullable(word, &nullable);
                        tracing::trace!(
                            "Expanding {} → {} into {}",
                            lhs,
                            body,
                            combinations.iter().join(" | ")
                        );
                        next_productions.extend(combinations.into_iter().map(Body::Word));
                    } else {
                        next_productions.insert(body.clone());
                    }
                }

                (lhs.clone(), next_productions)
            })
            .collect();

        self.derive(self.variables.clone(), productions)
    }
}
