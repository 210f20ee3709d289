mod context_free;
mod erasing;
mod simplify;
mod types;
mod unit;
mod useless;

pub use context_free::ContextFreeGrammar;
pub use erasing::expand_nullable;
pub use simplify::{Pass, SimplificationSummary, StageSummary};
pub use types::{Body, NonTerminal, ProductionSymbol, Terminal};
