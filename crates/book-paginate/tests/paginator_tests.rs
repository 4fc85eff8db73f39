use book_paginate::rules::{AvoidOrphans, BreakBefore, KeepWithNext, PageNumbering, RunningFooter};
use book_paginate::*;

/// One line per page: the default content box is 344pt tall.
const FULL_PAGE_LINE: f32 = 344.0;

fn lines(n: usize) -> String {
    (0..n).map(|i| format!("line {}\n", i)).collect()
}

fn numbered_rules() -> RuleSet {
    let mut rules = RuleSet::new();
    rules.push(PageNumbering { start: 1 });
    rules.push(RunningFooter::new("- {number} -"));
    rules
}

/// Always votes the same way
struct Always(&'static str, BreakVote);

impl Rule for Always {
    fn name(&self) -> &str {
        self.0
    }

    fn break_decider(&self) -> Option<&dyn BreakDecider> {
        Some(self)
    }
}

impl BreakDecider for Always {
    fn decide_break(&self, _ctx: &BreakContext<'_>) -> std::result::Result<BreakVote, RuleFailure> {
        Ok(self.1)
    }
}

/// Fails on the page with the given index
struct FailOn(usize);

impl Rule for FailOn {
    fn name(&self) -> &str {
        "fail-on"
    }

    fn page_annotator(&self) -> Option<&dyn PageAnnotator> {
        Some(self)
    }
}

impl PageAnnotator for FailOn {
    fn annotate_page(&self, page: &mut Page, _book: &Book) -> std::result::Result<(), RuleFailure> {
        if page.index() == self.0 {
            Err(RuleFailure::new("footer does not fit"))
        } else {
            Ok(())
        }
    }
}

#[test]
fn test_paginate_fills_pages() {
    // 172pt lines: two per page
    let book = paginate(TextFlow::new(&lines(5), 172.0), RuleSet::new(), PageSetup::default())
        .unwrap();

    assert_eq!(book.len(), 3);
    let ranges: Vec<_> = book.pages().iter().map(|p| p.content_range()).collect();
    assert_eq!(
        ranges,
        vec![
            ContentRange::new(0, 2),
            ContentRange::new(2, 4),
            ContentRange::new(4, 5)
        ]
    );
    assert_eq!(book.pages()[2].number, 3);
    assert_eq!(book.pages()[0].footer, None);
}

#[test]
fn test_stepped_run_matches_one_pass() {
    let text = "# One\na\nb\nc\n\n# Two\nd\ne\nf\ng\nh\n";

    let one_pass = paginate(TextFlow::new(text, 100.0), numbered_rules(), PageSetup::default())
        .unwrap();

    let mut stepped = Paginator::new(
        TextFlow::new(text, 100.0),
        numbered_rules(),
        PageSetup::default(),
        RunContext::debug(),
    );
    stepped.start().unwrap();
    while stepped.state() == RunState::Paused {
        stepped.step().unwrap();
    }
    assert_eq!(stepped.state(), RunState::Done);

    assert_eq!(stepped.into_book().unwrap(), one_pass);
}

#[test]
fn test_pause_after_two_pages_then_resume() {
    let uninterrupted = paginate(
        TextFlow::new(&lines(5), FULL_PAGE_LINE),
        numbered_rules(),
        PageSetup::default(),
    )
    .unwrap();
    assert_eq!(uninterrupted.len(), 5);

    let mut p = Paginator::new(
        TextFlow::new(&lines(5), FULL_PAGE_LINE),
        numbered_rules(),
        PageSetup::default(),
        RunContext::default(),
    );
    p.start().unwrap();
    p.advance().unwrap();
    p.advance().unwrap();
    p.pause().unwrap();
    assert_eq!(p.state(), RunState::Paused);
    assert_eq!(p.page_count(), 2);

    p.resume().unwrap();
    let resumed = p.run_to_completion().unwrap();
    assert_eq!(resumed, uninterrupted);
}

#[test]
fn test_forbid_beats_force_regardless_of_order() {
    for forbid_first in [true, false] {
        let mut rules = RuleSet::new();
        if forbid_first {
            rules.push(Always("forbid", BreakVote::Forbid));
            rules.push(Always("force", BreakVote::Force));
        } else {
            rules.push(Always("force", BreakVote::Force));
            rules.push(Always("forbid", BreakVote::Forbid));
        }

        let book = paginate(TextFlow::new(&lines(4), 10.0), rules, PageSetup::default()).unwrap();

        // No candidate is allowed, so the only page runs to the end
        assert_eq!(book.len(), 1);
        assert_eq!(book.pages()[0].content_range(), ContentRange::new(0, 4));
    }
}

#[test]
fn test_force_breaks_at_earliest_candidate() {
    let mut rules = RuleSet::new();
    rules.push(Always("force", BreakVote::Force));

    let book = paginate(TextFlow::new(&lines(3), 10.0), rules, PageSetup::default()).unwrap();
    assert_eq!(book.len(), 3);
}

#[test]
fn test_break_before_headings() {
    let text = "# A\nx\n# B\ny\nz\n# C\n";
    let mut rules = RuleSet::new();
    rules.push(BreakBefore::new("h1"));

    let book = paginate(TextFlow::new(text, 10.0), rules, PageSetup::default()).unwrap();
    let starts: Vec<_> = book.pages().iter().map(|p| p.content_range().start).collect();
    assert_eq!(starts, vec![0, 2, 5]);
}

#[test]
fn test_keep_heading_with_next_line() {
    // Three lines fit; the heading would be the last line of page one
    let text = "a\nb\n## Heading\nbody\n";
    let mut rules = RuleSet::new();
    rules.push(KeepWithNext::new("h2"));

    let book = paginate(TextFlow::new(text, 110.0), rules, PageSetup::default()).unwrap();
    assert_eq!(book.pages()[0].content_range(), ContentRange::new(0, 2));
    assert_eq!(book.pages()[1].content_range(), ContentRange::new(2, 4));
}

#[test]
fn test_avoid_orphans_moves_break_back() {
    // Paragraph of 4 lines starting at line 1; 4 lines fit per page
    let text = "# H\na\nb\nc\nd\n";
    let mut rules = RuleSet::new();
    rules.push(AvoidOrphans { lines: 2 });

    let book = paginate(TextFlow::new(text, 86.0), rules, PageSetup::default()).unwrap();
    // Breaking at 4 would strand "d"; breaking at 3 keeps two lines each side
    assert_eq!(book.pages()[0].content_range(), ContentRange::new(0, 3));
    assert_eq!(book.pages()[1].content_range(), ContentRange::new(3, 5));
}

#[test]
fn test_invalid_setup_refuses_to_start() {
    let mut setup = PageSetup::default();
    setup.margin.inner = 150.0;
    setup.margin.outer = 138.0;
    assert!(!is_valid(&setup));

    let mut p = Paginator::new(
        TextFlow::new(&lines(3), 10.0),
        RuleSet::new(),
        setup,
        RunContext::default(),
    );
    assert!(matches!(p.start(), Err(PaginationError::InvalidPageSetup(_))));
    assert_eq!(p.state(), RunState::Error);
    assert_eq!(p.page_count(), 0);
}

#[test]
fn test_rule_failure_aborts_and_discards() {
    let mut rules = RuleSet::new();
    rules.push(FailOn(2));

    let mut p = Paginator::new(
        TextFlow::new(&lines(5), FULL_PAGE_LINE),
        rules,
        PageSetup::default(),
        RunContext::default(),
    );
    p.start().unwrap();
    p.advance().unwrap();
    p.advance().unwrap();

    match p.advance() {
        Err(PaginationError::RuleValidationFailure { rule, reason }) => {
            assert_eq!(rule, "fail-on");
            assert!(reason.contains("footer"));
        }
        other => panic!("Expected RuleValidationFailure, got {:?}", other),
    }
    assert_eq!(p.state(), RunState::Error);
    assert!(p.book().is_empty());
    assert!(p.into_book().is_none());
}

#[test]
fn test_setup_validator_runs_before_first_page() {
    let mut rules = RuleSet::new();
    rules.push(rules::MinContentHeight { points: 500.0 });

    let result = paginate(TextFlow::new(&lines(3), 10.0), rules, PageSetup::default());
    assert!(matches!(
        result,
        Err(PaginationError::RuleValidationFailure { .. })
    ));
}

#[test]
fn test_content_unavailable() {
    let result = paginate(
        TextFlow::unavailable("Could not find chapter.md"),
        RuleSet::new(),
        PageSetup::default(),
    );
    assert!(matches!(result, Err(PaginationError::ContentUnavailable(_))));
}

#[test]
fn test_cancel_then_fresh_run() {
    let mut first = Paginator::new(
        TextFlow::new(&lines(5), FULL_PAGE_LINE),
        numbered_rules(),
        PageSetup::default(),
        RunContext::default(),
    );
    first.start().unwrap();
    first.advance().unwrap();
    first.advance().unwrap();
    first.cancel().unwrap();
    assert!(first.book().is_empty());
    assert!(first.cancel().is_err());

    let fresh = paginate(
        TextFlow::new(&lines(5), FULL_PAGE_LINE),
        numbered_rules(),
        PageSetup::default(),
    )
    .unwrap();
    assert_eq!(fresh.len(), 5);
    assert_eq!(fresh.pages()[0].index(), 0);
    assert_eq!(fresh.pages()[4].footer.as_deref(), Some("- 5 -"));
}
