//! Sheet plan data model
//!
//! Sheets refer to pages by index into the [`Book`]; the plan never owns
//! or copies page data.

use crate::layout::SheetGeometry;
use crate::options::ArrangementConfig;
use book_paginate::{Book, Page};

/// Index of a page in the book this plan was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageRef(pub usize);

impl PageRef {
    /// From a 1-based logical page number
    pub fn from_number(number: usize) -> Self {
        PageRef(number - 1)
    }

    pub fn index(self) -> usize {
        self.0
    }

    /// 1-based logical page number
    pub fn number(self) -> usize {
        self.0 + 1
    }

    pub fn resolve(self, book: &Book) -> Option<&Page> {
        book.page(self.0)
    }
}

/// One page position on a sheet face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Page(PageRef),
    Blank,
}

impl Slot {
    /// Slot for a 1-based page number, blank past the last real page
    pub(crate) fn numbered(number: usize, page_count: usize) -> Self {
        if number <= page_count {
            Slot::Page(PageRef::from_number(number))
        } else {
            Slot::Blank
        }
    }

    pub fn page(self) -> Option<PageRef> {
        match self {
            Slot::Page(page) => Some(page),
            Slot::Blank => None,
        }
    }

    pub fn is_blank(self) -> bool {
        self == Slot::Blank
    }
}

/// One printed side of a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Single(Slot),
    Spread { left: Slot, right: Slot },
}

impl Face {
    /// Slots left to right
    pub fn slots(&self) -> Vec<Slot> {
        match *self {
            Face::Single(slot) => vec![slot],
            Face::Spread { left, right } => vec![left, right],
        }
    }
}

/// One physical sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub index: usize,
    pub front: Face,
    /// Only duplex arrangements print a back
    pub back: Option<Face>,
}

impl Sheet {
    /// Front, then back when present
    pub fn faces(&self) -> impl Iterator<Item = &Face> {
        std::iter::once(&self.front).chain(self.back.as_ref())
    }
}

/// Result of imposing a book
#[derive(Debug, Clone, PartialEq)]
pub struct SheetPlan {
    pub config: ArrangementConfig,
    /// Pages in the source book
    pub source_pages: usize,
    /// Slots after padding
    pub padded_pages: usize,
    pub geometry: SheetGeometry,
    pub sheets: Vec<Sheet>,
}

impl SheetPlan {
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Printed faces across all sheets
    pub fn face_count(&self) -> usize {
        self.sheets.iter().map(|sheet| sheet.faces().count()).sum()
    }

    pub fn blank_count(&self) -> usize {
        self.slots().filter(|slot| slot.is_blank()).count()
    }

    /// Every slot in sheet order, front before back, left before right
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.sheets
            .iter()
            .flat_map(|sheet| sheet.faces())
            .flat_map(|face| face.slots())
    }

    /// Every referenced page in sheet order
    pub fn page_refs(&self) -> impl Iterator<Item = PageRef> + '_ {
        self.slots().filter_map(Slot::page)
    }
}
