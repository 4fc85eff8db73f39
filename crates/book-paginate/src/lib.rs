pub mod flow;
mod book;
mod paginator;
pub mod rules;
mod setup;
mod types;
pub mod units;

pub use book::{Book, Page};
pub use flow::{ContentFlow, ContentRange, Measurement, TextFlow};
pub use paginator::{Paginator, RunContext, RunState, StepOutcome, paginate};
pub use rules::{
    BreakContext, BreakDecider, BreakVote, PageAnnotator, PageTransformer, Rule, RuleFailure,
    RuleSet, SetupValidator,
};
pub use setup::{PageMargins, PageSetup, PageSize, is_valid};
pub use types::*;
