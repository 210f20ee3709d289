use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

use crate::grammars::{
    context_free::ContextFreeGrammar,
    types::{Body, NonTerminal, ProductionSymbol},
};

impl ContextFreeGrammar {
    /// Whether `nt` derives at least one string made only of terminals.
    pub fn generates_terminal_string(&self, nt: &NonTerminal) -> bool {
        self.derives_terminal_string(nt, &mut IndexSet::new(), &mut IndexSet::new())
    }

    /// `in_progress` holds the non-terminals on the current derivation path; meeting one of
    /// them again fails that branch. `known` only ever holds proven results.
    fn derives_terminal_string(
        &self,
        nt: &NonTerminal,
        in_progress: &mut IndexSet<NonTerminal>,
        known: &mut IndexSet<NonTerminal>,
    ) -> bool {
        if known.contains(nt) {
            return true;
        }
        if !in_progress.insert(nt.clone()) {
            return false;
        }

        let mut derives = false;
        'bodies: for body in self.bodies(nt) {
            for symbol in body.symbols() {
                if let ProductionSymbol::NonTerminal(child) = symbol {
                    if !self.derives_terminal_string(child, in_progress, known) {
                        continue 'bodies;
                    }
                }
            }

            derives = true;
            break;
        }

        in_progress.pop();

        if derives {
            known.insert(nt.clone());
        }

        derives
    }

    pub fn generating_non_terminals(&self) -> IndexSet<NonTerminal> {
        let mut known = IndexSet::new();

        self.variables
            .iter()
            .filter(|nt| self.derives_terminal_string(nt, &mut IndexSet::new(), &mut known))
            .cloned()
            .collect()
    }

    /// Non-terminals reachable from the start symbol through bodies whose non-terminals are
    /// all generating. The start symbol is always included.
    pub fn reachable_non_terminals(
        &self,
        generating: &IndexSet<NonTerminal>,
    ) -> IndexSet<NonTerminal> {
        let mut stack = vec![self.start_symbol.clone()];
        let mut reachable = IndexSet::new();

        while let Some(nt) = stack.pop() {
            if !reachable.insert(nt.clone()) {
                continue;
            }

            for body in self.bodies(&nt) {
                if !body.non_terminals().all(|child| generating.contains(child)) {
                    continue;
                }

                stack.extend(
                    body.non_terminals()
                        .filter(|child| !reachable.contains(*child))
                        .cloned(),
                );
            }
        }

        reachable
    }

    #[tracing::instrument(skip_all)]
    pub fn eliminate_useless_productions(&self) -> Self {
        let generating = self.generating_non_terminals();
        tracing::debug!(
            "Generating non-terminals: {{{}}}",
            generating.iter().join(", ")
        );

        let reachable = self.reachable_non_terminals(&generating);
        tracing::debug!(
            "Reachable non-terminals: {{{}}}",
            reachable.iter().join(", ")
        );

        if !generating.contains(&self.start_symbol) {
            tracing::warn!(
                "Start symbol {} derives no terminal string; the language is empty",
                self.start_symbol
            );
        }

        // every reachable non-terminal but the start symbol is generating
        let useful = |body: &Body| body.non_terminals().all(|nt| reachable.contains(nt));

        let variables = self
            .variables
            .iter()
            .filter(|nt| reachable.contains(*nt))
            .cloned()
            .collect::<IndexSet<_>>();

        let productions = variables
            .iter()
            .map(|nt| {
                let rhs = self
                    .bodies(nt)
                    .filter(|body| useful(*body))
                    .cloned()
                    .collect::<IndexSet<_>>();

                (nt.clone(), rhs)
            })
            .collect::<IndexMap<_, _>>();

        self.derive(variables, productions)
    }
}
