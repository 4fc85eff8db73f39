//! Pagination rules
//!
//! A rule is a named object that opts into any of four hooks:
//!
//! - [`SetupValidator`]: checked once before the first page
//! - [`BreakDecider`]: votes at every candidate break point
//! - [`PageTransformer`]: edits each page right after it is cut
//! - [`PageAnnotator`]: numbering and footers, after all transformers
//!
//! [`RuleSet`] resolves the hooks a rule declares when it is added, so the
//! paginator only ever calls rules that implement the hook at hand.

mod builtin;

pub use builtin::{
    AvoidOrphans, BreakBefore, KeepWithNext, MaxPages, MinContentHeight, PageNumbering,
    RunningFooter,
};

use crate::book::{Book, Page};
use crate::flow::ContentFlow;
use crate::setup::PageSetup;
use crate::types::*;
use std::fmt;
use thiserror::Error;

/// A rule's verdict on one candidate break point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakVote {
    /// End the page here even if more would fit
    Force,
    /// Never end the page here; wins over any number of `Force` votes
    Forbid,
    #[default]
    Abstain,
}

/// Fatal complaint raised from a rule hook
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct RuleFailure(pub String);

impl RuleFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// What a break decider sees at a candidate
pub struct BreakContext<'a> {
    /// Index of the page being built
    pub page_index: usize,
    /// First content offset on the page being built
    pub page_start: usize,
    /// Offset where the page would end
    pub candidate: usize,
    /// Last offset that still fits in the content box
    pub fit_limit: usize,
    pub flow: &'a dyn ContentFlow,
}

impl BreakContext<'_> {
    /// Whether content up to the candidate fits on the page
    pub fn fits(&self) -> bool {
        self.candidate <= self.fit_limit
    }

    /// Tag of the block right after the candidate
    pub fn next_tag(&self) -> Option<&str> {
        self.flow.block_tag(self.candidate)
    }

    /// Tag of the block right before the candidate
    pub fn previous_tag(&self) -> Option<&str> {
        self.candidate
            .checked_sub(1)
            .and_then(|offset| self.flow.block_tag(offset))
    }
}

pub trait SetupValidator {
    fn validate_setup(&self, setup: &PageSetup) -> std::result::Result<(), RuleFailure>;
}

pub trait BreakDecider {
    fn decide_break(&self, ctx: &BreakContext<'_>) -> std::result::Result<BreakVote, RuleFailure>;
}

pub trait PageTransformer {
    /// `book` holds the pages before `page`
    fn transform_page(&self, page: &mut Page, book: &Book) -> std::result::Result<(), RuleFailure>;
}

pub trait PageAnnotator {
    /// `book` holds the pages before `page`
    fn annotate_page(&self, page: &mut Page, book: &Book) -> std::result::Result<(), RuleFailure>;
}

/// A pagination rule. Override the accessor of each hook the rule
/// implements to return `Some(self)`.
pub trait Rule: Send + Sync {
    fn name(&self) -> &str;

    fn setup_validator(&self) -> Option<&dyn SetupValidator> {
        None
    }

    fn break_decider(&self) -> Option<&dyn BreakDecider> {
        None
    }

    fn page_transformer(&self) -> Option<&dyn PageTransformer> {
        None
    }

    fn page_annotator(&self) -> Option<&dyn PageAnnotator> {
        None
    }
}

/// Ordered rules with their hooks resolved at registration
#[derive(Default)]
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
    validators: Vec<usize>,
    deciders: Vec<usize>,
    transformers: Vec<usize>,
    annotators: Vec<usize>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        let mut set = Self::new();
        for rule in rules {
            set.add(rule);
        }
        set
    }

    /// Append a rule; registration order is hook order
    pub fn add(&mut self, rule: Box<dyn Rule>) {
        let idx = self.rules.len();
        if rule.setup_validator().is_some() {
            self.validators.push(idx);
        }
        if rule.break_decider().is_some() {
            self.deciders.push(idx);
        }
        if rule.page_transformer().is_some() {
            self.transformers.push(idx);
        }
        if rule.page_annotator().is_some() {
            self.annotators.push(idx);
        }
        self.rules.push(rule);
    }

    pub fn push(&mut self, rule: impl Rule + 'static) {
        self.add(Box::new(rule));
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.name())
    }

    pub(crate) fn validate_setup(&self, setup: &PageSetup) -> Result<()> {
        for &idx in &self.validators {
            let rule = &self.rules[idx];
            if let Some(hook) = rule.setup_validator() {
                hook.validate_setup(setup)
                    .map_err(|failure| rule_failure(&**rule, failure))?;
            }
        }
        Ok(())
    }

    /// Poll every decider and combine the votes.
    ///
    /// Any `Forbid` wins, then any `Force`, otherwise `Abstain`.
    pub(crate) fn resolve_break(&self, ctx: &BreakContext<'_>) -> Result<BreakVote> {
        let mut forced = false;
        let mut forbidden = false;

        for &idx in &self.deciders {
            let rule = &self.rules[idx];
            let Some(hook) = rule.break_decider() else {
                continue;
            };
            match hook
                .decide_break(ctx)
                .map_err(|failure| rule_failure(&**rule, failure))?
            {
                BreakVote::Force => forced = true,
                BreakVote::Forbid => forbidden = true,
                BreakVote::Abstain => {}
            }
        }

        Ok(if forbidden {
            BreakVote::Forbid
        } else if forced {
            BreakVote::Force
        } else {
            BreakVote::Abstain
        })
    }

    pub(crate) fn transform(&self, page: &mut Page, book: &Book) -> Result<()> {
        for &idx in &self.transformers {
            let rule = &self.rules[idx];
            if let Some(hook) = rule.page_transformer() {
                hook.transform_page(page, book)
                    .map_err(|failure| rule_failure(&**rule, failure))?;
            }
        }
        Ok(())
    }

    pub(crate) fn annotate(&self, page: &mut Page, book: &Book) -> Result<()> {
        for &idx in &self.annotators {
            let rule = &self.rules[idx];
            if let Some(hook) = rule.page_annotator() {
                hook.annotate_page(page, book)
                    .map_err(|failure| rule_failure(&**rule, failure))?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

fn rule_failure(rule: &dyn Rule, failure: RuleFailure) -> PaginationError {
    PaginationError::RuleValidationFailure {
        rule: rule.name().to_string(),
        reason: failure.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{ContentRange, TextFlow};

    struct Voter(&'static str, BreakVote);

    impl Rule for Voter {
        fn name(&self) -> &str {
            self.0
        }

        fn break_decider(&self) -> Option<&dyn BreakDecider> {
            Some(self)
        }
    }

    impl BreakDecider for Voter {
        fn decide_break(&self, _ctx: &BreakContext<'_>) -> std::result::Result<BreakVote, RuleFailure> {
            Ok(self.1)
        }
    }

    struct Silent;

    impl Rule for Silent {
        fn name(&self) -> &str {
            "silent"
        }
    }

    fn vote(rules: &RuleSet) -> BreakVote {
        let flow = TextFlow::new("a\nb\nc", 10.0);
        let ctx = BreakContext {
            page_index: 0,
            page_start: 0,
            candidate: 1,
            fit_limit: 3,
            flow: &flow,
        };
        rules.resolve_break(&ctx).unwrap()
    }

    #[test]
    fn test_hooks_resolved_at_registration() {
        let mut rules = RuleSet::new();
        rules.push(Silent);
        rules.push(Voter("force", BreakVote::Force));
        assert_eq!(rules.len(), 2);
        assert_eq!(rules.deciders, vec![1]);
        assert!(rules.validators.is_empty());
        assert!(rules.transformers.is_empty());
        assert!(rules.annotators.is_empty());
    }

    #[test]
    fn test_forbid_beats_force_in_any_order() {
        let mut a = RuleSet::new();
        a.push(Voter("forbid", BreakVote::Forbid));
        a.push(Voter("force", BreakVote::Force));
        assert_eq!(vote(&a), BreakVote::Forbid);

        let mut b = RuleSet::new();
        b.push(Voter("force", BreakVote::Force));
        b.push(Voter("forbid", BreakVote::Forbid));
        assert_eq!(vote(&b), BreakVote::Forbid);
    }

    #[test]
    fn test_force_beats_abstain() {
        let mut rules = RuleSet::new();
        rules.push(Voter("abstain", BreakVote::Abstain));
        rules.push(Voter("force", BreakVote::Force));
        assert_eq!(vote(&rules), BreakVote::Force);
    }

    #[test]
    fn test_no_deciders_abstains() {
        assert_eq!(vote(&RuleSet::new()), BreakVote::Abstain);
    }

    #[test]
    fn test_context_tags() {
        let flow = TextFlow::new("# Head\nbody", 10.0);
        let ctx = BreakContext {
            page_index: 0,
            page_start: 0,
            candidate: 1,
            fit_limit: 1,
            flow: &flow,
        };
        assert!(ctx.fits());
        assert_eq!(ctx.previous_tag(), Some("h1"));
        assert_eq!(ctx.next_tag(), Some("p"));
        assert_eq!(flow.block_extent(1), Some(ContentRange::new(1, 2)));
    }

    #[test]
    fn test_debug_lists_names() {
        let mut rules = RuleSet::new();
        rules.push(Silent);
        assert_eq!(format!("{:?}", rules), "[\"silent\"]");
    }
}
