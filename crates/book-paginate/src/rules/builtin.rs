//! Stock rules for common book conventions

use super::{
    BreakContext, BreakDecider, BreakVote, PageAnnotator, PageTransformer, Rule, RuleFailure,
    SetupValidator,
};
use crate::book::{Book, Page};
use crate::setup::PageSetup;

type HookResult<T> = std::result::Result<T, RuleFailure>;

// =============================================================================
// Break deciders
// =============================================================================

/// Start a new page at every block with the given tag
#[derive(Debug, Clone)]
pub struct BreakBefore {
    pub tag: String,
}

impl BreakBefore {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

impl Rule for BreakBefore {
    fn name(&self) -> &str {
        "break-before"
    }

    fn break_decider(&self) -> Option<&dyn BreakDecider> {
        Some(self)
    }
}

impl BreakDecider for BreakBefore {
    fn decide_break(&self, ctx: &BreakContext<'_>) -> HookResult<BreakVote> {
        let starts_block = ctx
            .flow
            .block_extent(ctx.candidate)
            .is_some_and(|block| block.start == ctx.candidate);

        if starts_block && ctx.next_tag() == Some(self.tag.as_str()) {
            Ok(BreakVote::Force)
        } else {
            Ok(BreakVote::Abstain)
        }
    }
}

/// Never leave a block with the given tag (usually a heading) at the
/// bottom of a page
#[derive(Debug, Clone)]
pub struct KeepWithNext {
    pub tag: String,
}

impl KeepWithNext {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

impl Rule for KeepWithNext {
    fn name(&self) -> &str {
        "keep-with-next"
    }

    fn break_decider(&self) -> Option<&dyn BreakDecider> {
        Some(self)
    }
}

impl BreakDecider for KeepWithNext {
    fn decide_break(&self, ctx: &BreakContext<'_>) -> HookResult<BreakVote> {
        if ctx.previous_tag() == Some(self.tag.as_str()) {
            Ok(BreakVote::Forbid)
        } else {
            Ok(BreakVote::Abstain)
        }
    }
}

/// Forbid breaks that leave fewer than `lines` units of a block on
/// either side of the break
#[derive(Debug, Clone, Copy)]
pub struct AvoidOrphans {
    pub lines: usize,
}

impl Rule for AvoidOrphans {
    fn name(&self) -> &str {
        "avoid-orphans"
    }

    fn break_decider(&self) -> Option<&dyn BreakDecider> {
        Some(self)
    }
}

impl BreakDecider for AvoidOrphans {
    fn decide_break(&self, ctx: &BreakContext<'_>) -> HookResult<BreakVote> {
        let Some(block) = ctx
            .candidate
            .checked_sub(1)
            .and_then(|offset| ctx.flow.block_extent(offset))
        else {
            return Ok(BreakVote::Abstain);
        };

        // Only breaks inside the block can strand lines
        if !block.contains(ctx.candidate) {
            return Ok(BreakVote::Abstain);
        }

        let before = ctx.candidate - block.start;
        let after = block.end - ctx.candidate;
        if before < self.lines || after < self.lines {
            Ok(BreakVote::Forbid)
        } else {
            Ok(BreakVote::Abstain)
        }
    }
}

// =============================================================================
// Page transformers
// =============================================================================

/// Abort the run once the book would grow past `limit` pages
#[derive(Debug, Clone, Copy)]
pub struct MaxPages {
    pub limit: usize,
}

impl Rule for MaxPages {
    fn name(&self) -> &str {
        "max-pages"
    }

    fn page_transformer(&self) -> Option<&dyn PageTransformer> {
        Some(self)
    }
}

impl PageTransformer for MaxPages {
    fn transform_page(&self, page: &mut Page, _book: &Book) -> HookResult<()> {
        if page.index() >= self.limit {
            return Err(RuleFailure::new(format!(
                "Book exceeds the limit of {} pages",
                self.limit
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Page annotators
// =============================================================================

/// Number pages from `start` instead of 1
#[derive(Debug, Clone, Copy)]
pub struct PageNumbering {
    pub start: usize,
}

impl Default for PageNumbering {
    fn default() -> Self {
        Self { start: 1 }
    }
}

impl Rule for PageNumbering {
    fn name(&self) -> &str {
        "page-numbering"
    }

    fn page_annotator(&self) -> Option<&dyn PageAnnotator> {
        Some(self)
    }
}

impl PageAnnotator for PageNumbering {
    fn annotate_page(&self, page: &mut Page, _book: &Book) -> HookResult<()> {
        page.number = page.index() + self.start;
        Ok(())
    }
}

/// Fill each footer from a template.
///
/// `{number}` expands to the display number and `{index}` to the 0-based
/// position. Register after any numbering rule so `{number}` sees the
/// final value.
#[derive(Debug, Clone)]
pub struct RunningFooter {
    pub template: String,
}

impl RunningFooter {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl Rule for RunningFooter {
    fn name(&self) -> &str {
        "running-footer"
    }

    fn page_annotator(&self) -> Option<&dyn PageAnnotator> {
        Some(self)
    }
}

impl PageAnnotator for RunningFooter {
    fn annotate_page(&self, page: &mut Page, _book: &Book) -> HookResult<()> {
        let footer = self
            .template
            .replace("{number}", &page.number.to_string())
            .replace("{index}", &page.index().to_string());
        page.footer = Some(footer);
        Ok(())
    }
}

// =============================================================================
// Setup validators
// =============================================================================

/// Reject setups whose content box is shorter than `points`
#[derive(Debug, Clone, Copy)]
pub struct MinContentHeight {
    pub points: f32,
}

impl Rule for MinContentHeight {
    fn name(&self) -> &str {
        "min-content-height"
    }

    fn setup_validator(&self) -> Option<&dyn SetupValidator> {
        Some(self)
    }
}

impl SetupValidator for MinContentHeight {
    fn validate_setup(&self, setup: &PageSetup) -> HookResult<()> {
        let height = setup.content_box().height;
        if height < self.points {
            return Err(RuleFailure::new(format!(
                "Content box is {}pt tall, need at least {}pt",
                height, self.points
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::{ContentFlow, ContentRange, TextFlow};

    fn ctx_at<'a>(flow: &'a dyn ContentFlow, candidate: usize) -> BreakContext<'a> {
        BreakContext {
            page_index: 0,
            page_start: 0,
            candidate,
            fit_limit: 100,
            flow,
        }
    }

    #[test]
    fn test_break_before_heading() {
        let flow = TextFlow::new("intro\nmore\n# Chapter\ntext", 10.0);
        let rule = BreakBefore::new("h1");
        assert_eq!(rule.decide_break(&ctx_at(&flow, 1)).unwrap(), BreakVote::Abstain);
        assert_eq!(rule.decide_break(&ctx_at(&flow, 2)).unwrap(), BreakVote::Force);
        assert_eq!(rule.decide_break(&ctx_at(&flow, 3)).unwrap(), BreakVote::Abstain);
    }

    #[test]
    fn test_keep_with_next() {
        let flow = TextFlow::new("## Heading\nbody\nbody", 10.0);
        let rule = KeepWithNext::new("h2");
        assert_eq!(rule.decide_break(&ctx_at(&flow, 1)).unwrap(), BreakVote::Forbid);
        assert_eq!(rule.decide_break(&ctx_at(&flow, 2)).unwrap(), BreakVote::Abstain);
    }

    #[test]
    fn test_avoid_orphans() {
        let flow = TextFlow::new("a\nb\nc\nd\ne\n\nf", 10.0);
        let rule = AvoidOrphans { lines: 2 };
        // paragraph is [0, 5)
        assert_eq!(rule.decide_break(&ctx_at(&flow, 1)).unwrap(), BreakVote::Forbid);
        assert_eq!(rule.decide_break(&ctx_at(&flow, 2)).unwrap(), BreakVote::Abstain);
        assert_eq!(rule.decide_break(&ctx_at(&flow, 3)).unwrap(), BreakVote::Abstain);
        assert_eq!(rule.decide_break(&ctx_at(&flow, 4)).unwrap(), BreakVote::Forbid);
        // after the paragraph ends
        assert_eq!(rule.decide_break(&ctx_at(&flow, 5)).unwrap(), BreakVote::Abstain);
    }

    #[test]
    fn test_numbering_and_footer() {
        let book = Book::new(PageSetup::default());
        let mut page = Page::new(2, ContentRange::new(4, 6));

        PageNumbering { start: 10 }
            .annotate_page(&mut page, &book)
            .unwrap();
        RunningFooter::new("Page {number} ({index})")
            .annotate_page(&mut page, &book)
            .unwrap();

        assert_eq!(page.number, 12);
        assert_eq!(page.footer.as_deref(), Some("Page 12 (2)"));
    }

    #[test]
    fn test_max_pages() {
        let book = Book::new(PageSetup::default());
        let rule = MaxPages { limit: 2 };
        assert!(rule.transform_page(&mut Page::new(1, ContentRange::new(0, 1)), &book).is_ok());
        assert!(rule.transform_page(&mut Page::new(2, ContentRange::new(1, 2)), &book).is_err());
    }

    #[test]
    fn test_min_content_height() {
        let setup = PageSetup::default();
        assert!(MinContentHeight { points: 300.0 }.validate_setup(&setup).is_ok());
        assert!(MinContentHeight { points: 400.0 }.validate_setup(&setup).is_err());
    }
}
