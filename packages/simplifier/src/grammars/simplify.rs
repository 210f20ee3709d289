use std::fmt::Display;

use enumflags2::{bitflags, BitFlags};
use tabled::{builder::Builder, settings::Style};

use crate::grammars::context_free::ContextFreeGrammar;

#[bitflags]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Erasing = 0b001,
    Unit = 0b010,
    Useless = 0b100,
}

impl Pass {
    /// The order passes always run in, whichever are selected.
    pub const ORDER: [Pass; 3] = [Pass::Erasing, Pass::Unit, Pass::Useless];

    pub fn name(self) -> &'static str {
        match self {
            Pass::Erasing => "erasing",
            Pass::Unit => "unit",
            Pass::Useless => "useless",
        }
    }

    fn apply(self, grammar: &ContextFreeGrammar) -> ContextFreeGrammar {
        match self {
            Pass::Erasing => grammar.eliminate_erasing_productions(),
            Pass::Unit => grammar.eliminate_unit_productions(),
            Pass::Useless => grammar.eliminate_useless_productions(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSummary {
    pub stage: &'static str,
    pub variables: usize,
    pub productions: usize,
}

impl StageSummary {
    fn of(stage: &'static str, grammar: &ContextFreeGrammar) -> Self {
        Self {
            stage,
            variables: grammar.variables().len(),
            productions: grammar.production_count(),
        }
    }
}

/// Grammar size before simplification and after every pass that ran.
#[derive(Debug, Clone)]
pub struct SimplificationSummary {
    pub stages: Vec<StageSummary>,
}

impl Display for SimplificationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut builder = Builder::default();

        builder.push_record(["stage", "variables", "productions"].map(String::from));
        for stage in &self.stages {
            builder.push_record([
                stage.stage.to_string(),
                stage.variables.to_string(),
                stage.productions.to_string(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::rounded());

        writeln!(f, "{}", table)
    }
}

impl ContextFreeGrammar {
    /// Removes erasing, unit and useless productions, in that order, once each.
    pub fn simplify(&self) -> Self {
        self.simplify_with(BitFlags::all())
    }

    pub fn simplify_with(&self, passes: BitFlags<Pass>) -> Self {
        self.simplify_traced(passes).0
    }

    #[tracing::instrument(skip_all, fields(passes = ?passes))]
    pub fn simplify_traced(&self, passes: BitFlags<Pass>) -> (Self, SimplificationSummary) {
        let mut summary = SimplificationSummary {
            stages: vec![StageSummary::of("input", self)],
        };

        let mut grammar = self.clone();
        for pass in Pass::ORDER.into_iter().filter(|pass| passes.contains(*pass)) {
            grammar = pass.apply(&grammar);

            let stage = StageSummary::of(pass.name(), &grammar);
            tracing::debug!(
                "After {} pass: {} variables, {} productions",
                stage.stage,
                stage.variables,
                stage.productions
            );
            summary.stages.push(stage);
        }

        (grammar, summary)
    }
}
