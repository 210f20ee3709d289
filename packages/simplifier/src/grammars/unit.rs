use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

use crate::grammars::{
    context_free::ContextFreeGrammar,
    types::{Body, NonTerminal},
};

impl ContextFreeGrammar {
    /// Pairs `(A, B)` such that `A` derives `B` through unit productions alone, `A ≠ B`.
    pub fn unit_pairs(&self) -> IndexSet<(NonTerminal, NonTerminal)> {
        let mut pairs = self
            .variables
            .iter()
            .flat_map(|lhs| {
                self.bodies(lhs)
                    .filter_map(Body::as_unit)
                    .filter(move |nt| *nt != lhs)
                    .map(move |nt| (lhs.clone(), nt.clone()))
            })
            .collect::<IndexSet<_>>();

        loop {
            let indirect = pairs
                .iter()
                .flat_map(|(a, b)| {
                    pairs
                        .iter()
                        .filter(move |(c, d)| c == b && d != a)
                        .map(move |(_, d)| (a.clone(), d.clone()))
                })
                .filter(|pair| !pairs.contains(pair))
                .collect::<Vec<_>>();

            if indirect.is_empty() {
                break;
            }

            pairs.extend(indirect);
        }

        pairs
    }

    #[tracing::instrument(skip_all)]
    pub fn eliminate_unit_productions(&self) -> Self {
        let mut productions = self
            .productions
            .iter()
            .map(|(lhs, rhs)| {
                let rhs = rhs
                    .iter()
                    .filter(|body| body.as_unit() != Some(lhs))
                    .cloned()
                    .collect::<IndexSet<_>>();

                (lhs.clone(), rhs)
            })
            .collect::<IndexMap<_, _>>();

        let non_unit_productions = productions
            .iter()
            .map(|(lhs, rhs)| {
                let rhs = rhs
                    .iter()
                    .filter(|body| body.as_unit().is_none())
                    .cloned()
                    .collect::<Vec<_>>();

                (lhs.clone(), rhs)
            })
            .collect::<IndexMap<_, _>>();

        let unit_pairs = self.unit_pairs();
        tracing::debug!(
            "Unit pairs: {{{}}}",
            unit_pairs
                .iter()
                .map(|(a, b)| format!("({a}, {b})"))
                .join(", ")
        );

        for (a, b) in &unit_pairs {
            let rhs = productions.entry(a.clone()).or_insert_with(IndexSet::new);
            rhs.shift_remove(&Body::unit(b.clone()));

            if let Some(replacements) = non_unit_productions.get(b) {
                rhs.extend(replacements.iter().cloned());
            }
        }

        self.derive(self.variables.clone(), productions)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn pairs(pairs: &[(char, char)]) -> IndexSet<(NonTerminal, NonTerminal)> {
        pairs
            .iter()
            .map(|&(a, b)| (NonTerminal::new(a), NonTerminal::new(b)))
            .collect()
    }

    #[test]
    fn closes_unit_pairs_transitively() {
        let grammar = ContextFreeGrammar::from_productions(
            "S A B C",
            'S',
            &["S → A | a", "A → B", "B → C | b", "C → c"],
        )
        .unwrap();

        assert_eq!(
            grammar.unit_pairs(),
            pairs(&[
                ('S', 'A'),
                ('A', 'B'),
                ('B', 'C'),
                ('S', 'B'),
                ('A', 'C'),
                ('S', 'C'),
            ])
        );
    }

    #[test]
    fn unit_cycles_never_pair_a_variable_with_itself() {
        let grammar = ContextFreeGrammar::from_productions(
            "S A",
            'S',
            &["S → A | S | a", "A → S | b"],
        )
        .unwrap();

        assert_eq!(grammar.unit_pairs(), pairs(&[('S', 'A'), ('A', 'S')]));
    }

    #[test]
    fn replaces_unit_production_with_target_bodies() {
        let grammar =
            ContextFreeGrammar::from_productions("S A", 'S', &["S → A | a", "A → b"]).unwrap();

        let result = grammar.eliminate_unit_productions();

        let s = NonTerminal::new('S');
        assert_eq!(result.bodies(&s).join(" | "), "a | b");
        assert_eq!(
            result,
            ContextFreeGrammar::from_productions("S A", 'S', &["S → a | b", "A → b"]).unwrap()
        );
    }

    #[test]
    fn resolves_chains_and_cycles() {
        let grammar = ContextFreeGrammar::from_productions(
            "S A B",
            'S',
            &["S → A | S | aS", "A → B | a", "B → A | bb"],
        )
        .unwrap();

        let result = grammar.eliminate_unit_productions();

        let expected = ContextFreeGrammar::from_productions(
            "S A B",
            'S',
            &["S → aS | a | bb", "A → a | bb", "B → bb | a"],
        )
        .unwrap();

        assert_eq!(result, expected);
        assert!(result
            .productions()
            .values()
            .flatten()
            .all(|body| body.as_unit().is_none()));
    }
}
