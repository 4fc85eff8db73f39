//! Pagination state machine
//!
//! The paginator is synchronous and step-based: building one page (flow,
//! break votes, transform and annotate hooks) is the atomic unit. Hosts
//! decide how steps are scheduled; `book-async-runtime` drives them
//! cooperatively, yielding between steps.
//!
//! ```text
//! Idle -> Running -> Done | Error | Cancelled
//!         Running <-> Paused   (pause / resume)
//!         Paused  -> Paused    (step)
//!         Paused  -> Error | Cancelled
//! Idle -> Paused               (debug run context)
//! ```

use crate::book::{Book, Page};
use crate::flow::{ContentFlow, ContentRange};
use crate::rules::{BreakContext, BreakVote, RuleSet};
use crate::setup::PageSetup;
use crate::types::*;
use log::{debug, info};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Paused,
    Done,
    Error,
    Cancelled,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunState::Done | RunState::Error | RunState::Cancelled)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Paused => "paused",
            RunState::Done => "done",
            RunState::Error => "failed",
            RunState::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// Per-run settings owned by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// Start paused so the run can be stepped page by page
    pub debug: bool,
    /// Name used in log messages
    pub label: String,
}

impl Default for RunContext {
    fn default() -> Self {
        Self {
            debug: false,
            label: "book".to_string(),
        }
    }
}

impl RunContext {
    pub fn debug() -> Self {
        Self {
            debug: true,
            ..Self::default()
        }
    }
}

/// Result of one atomic step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A page was added and content remains
    Progress { page_count: usize },
    /// The content is exhausted
    Completed { page_count: usize },
}

impl StepOutcome {
    pub fn page_count(self) -> usize {
        match self {
            StepOutcome::Progress { page_count } | StepOutcome::Completed { page_count } => {
                page_count
            }
        }
    }
}

pub struct Paginator<F> {
    flow: F,
    rules: RuleSet,
    setup: PageSetup,
    context: RunContext,
    state: RunState,
    book: Book,
    remaining: Option<ContentRange>,
}

impl<F: ContentFlow> Paginator<F> {
    pub fn new(flow: F, rules: RuleSet, setup: PageSetup, context: RunContext) -> Self {
        Self {
            flow,
            rules,
            setup,
            context,
            state: RunState::Idle,
            book: Book::new(setup),
            remaining: None,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn context(&self) -> &RunContext {
        &self.context
    }

    pub fn flow(&self) -> &F {
        &self.flow
    }

    /// Pages built so far
    pub fn book(&self) -> &Book {
        &self.book
    }

    pub fn page_count(&self) -> usize {
        self.book.len()
    }

    /// Check preconditions and leave `Idle`.
    ///
    /// Ends in `Paused` when the run context asks for debugging, `Done`
    /// right away for empty content, `Running` otherwise.
    pub fn start(&mut self) -> Result<()> {
        self.expect_state(&[RunState::Idle], "start")?;

        let source = match self.prepare() {
            Ok(source) => source,
            Err(e) => return Err(self.abort(e)),
        };

        self.book = Book::new(self.setup);
        self.remaining = (!source.is_empty()).then_some(source);

        self.state = if self.remaining.is_none() {
            info!("[{}] nothing to paginate", self.context.label);
            RunState::Done
        } else if self.context.debug {
            RunState::Paused
        } else {
            RunState::Running
        };
        debug!("[{}] started, {} rules", self.context.label, self.rules.len());
        Ok(())
    }

    fn prepare(&self) -> Result<ContentRange> {
        self.setup.validate()?;
        self.rules.validate_setup(&self.setup)?;
        self.flow.source()
    }

    pub fn pause(&mut self) -> Result<()> {
        self.expect_state(&[RunState::Running], "pause")?;
        self.state = RunState::Paused;
        debug!("[{}] paused at {} pages", self.context.label, self.book.len());
        Ok(())
    }

    pub fn resume(&mut self) -> Result<()> {
        self.expect_state(&[RunState::Paused], "resume")?;
        self.state = RunState::Running;
        debug!("[{}] resumed", self.context.label);
        Ok(())
    }

    /// Build exactly one page while paused, then stay paused.
    pub fn step(&mut self) -> Result<StepOutcome> {
        self.expect_state(&[RunState::Paused], "step")?;
        self.build_next()
    }

    /// Build the next page of a running pagination.
    pub fn advance(&mut self) -> Result<StepOutcome> {
        self.expect_state(&[RunState::Running], "advance")?;
        self.build_next()
    }

    /// Stop and throw away everything built so far.
    pub fn cancel(&mut self) -> Result<()> {
        self.expect_state(
            &[RunState::Idle, RunState::Running, RunState::Paused],
            "cancel",
        )?;
        self.discard();
        self.state = RunState::Cancelled;
        info!("[{}] cancelled", self.context.label);
        Ok(())
    }

    /// Start if needed, resume if paused, and build every remaining page.
    pub fn run_to_completion(mut self) -> Result<Book> {
        if self.state == RunState::Idle {
            self.start()?;
        }
        if self.state == RunState::Paused {
            self.resume()?;
        }
        while self.state == RunState::Running {
            self.advance()?;
        }
        let state = self.state;
        self.into_book()
            .ok_or(PaginationError::InvalidTransition {
                state,
                command: "finish",
            })
    }

    /// The finished book; `None` unless the run is `Done`
    pub fn into_book(self) -> Option<Book> {
        (self.state == RunState::Done).then_some(self.book)
    }

    fn build_next(&mut self) -> Result<StepOutcome> {
        match self.build_page() {
            Ok(outcome) => Ok(outcome),
            Err(e) => Err(self.abort(e)),
        }
    }

    fn build_page(&mut self) -> Result<StepOutcome> {
        let Some(range) = self.remaining else {
            self.state = RunState::Done;
            return Ok(StepOutcome::Completed {
                page_count: self.book.len(),
            });
        };

        let index = self.book.len();
        let available = self.setup.content_box().height;
        let fit_limit = self.flow.measure(range, available).consumed.end;
        let end = self.choose_break(range, fit_limit, index)?;
        let (consumed, rest) = range.split_at(end);

        let mut page = Page::new(index, consumed);
        self.rules.transform(&mut page, &self.book)?;
        self.rules.annotate(&mut page, &self.book)?;
        self.book.push(page);
        self.remaining = (!rest.is_empty()).then_some(rest);

        debug!(
            "[{}] page {} holds {}..{}",
            self.context.label, index, consumed.start, consumed.end
        );

        let page_count = self.book.len();
        if self.remaining.is_none() {
            self.state = RunState::Done;
            info!("[{}] finished with {} pages", self.context.label, page_count);
            Ok(StepOutcome::Completed { page_count })
        } else {
            Ok(StepOutcome::Progress { page_count })
        }
    }

    /// Scan candidates forward and pick where the page ends.
    ///
    /// Vetoed candidates are skipped. The first forced candidate wins.
    /// Otherwise the page ends at the last candidate that fits, or, when
    /// nothing fits, at the first allowed candidate past the limit.
    fn choose_break(&self, range: ContentRange, fit_limit: usize, page_index: usize) -> Result<usize> {
        let mut last_fit = None;

        for candidate in self.flow.break_points(range) {
            if candidate <= range.start || candidate > range.end {
                continue;
            }
            if candidate > fit_limit && last_fit.is_some() {
                break;
            }

            let ctx = BreakContext {
                page_index,
                page_start: range.start,
                candidate,
                fit_limit,
                flow: &self.flow,
            };
            match self.rules.resolve_break(&ctx)? {
                BreakVote::Forbid => continue,
                BreakVote::Force => return Ok(candidate),
                BreakVote::Abstain if candidate <= fit_limit => last_fit = Some(candidate),
                BreakVote::Abstain => return Ok(candidate),
            }
        }

        Ok(last_fit.unwrap_or(range.end))
    }

    fn expect_state(&self, allowed: &[RunState], command: &'static str) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(PaginationError::InvalidTransition {
                state: self.state,
                command,
            })
        }
    }

    fn discard(&mut self) {
        self.book = Book::new(self.setup);
        self.remaining = None;
    }

    fn abort(&mut self, error: PaginationError) -> PaginationError {
        self.discard();
        self.state = RunState::Error;
        log::warn!("[{}] {}", self.context.label, error);
        error
    }
}

/// Paginate in one pass with default run settings.
pub fn paginate<F: ContentFlow>(flow: F, rules: RuleSet, setup: PageSetup) -> Result<Book> {
    Paginator::new(flow, rules, setup, RunContext::default()).run_to_completion()
}
