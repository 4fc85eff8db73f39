use crate::flow::ContentRange;
use crate::setup::PageSetup;

#[cfg(feature = "serde")]
use serde::Serialize;

/// One laid-out page
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Page {
    index: usize,
    content_range: ContentRange,
    /// Display number, set by numbering rules
    pub number: usize,
    /// Footer text, set by footer rules
    pub footer: Option<String>,
}

impl Page {
    pub(crate) fn new(index: usize, content_range: ContentRange) -> Self {
        Self {
            index,
            content_range,
            number: index + 1,
            footer: None,
        }
    }

    /// 0-based position in the book
    pub fn index(&self) -> usize {
        self.index
    }

    /// The slice of the content flow this page shows
    pub fn content_range(&self) -> ContentRange {
        self.content_range
    }

    /// Right-hand page in reading order (odd display position)
    pub fn is_recto(&self) -> bool {
        self.index % 2 == 0
    }
}

/// Pages in reading order, plus the geometry they were laid out for
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Book {
    setup: PageSetup,
    pages: Vec<Page>,
}

impl Book {
    pub(crate) fn new(setup: PageSetup) -> Self {
        Self {
            setup,
            pages: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, page: Page) {
        debug_assert_eq!(page.index, self.pages.len(), "pages must be appended in order");
        self.pages.push(page);
    }

    pub fn setup(&self) -> &PageSetup {
        &self.setup
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn last(&self) -> Option<&Page> {
        self.pages.last()
    }
}
