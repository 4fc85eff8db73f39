//! Saddle-stitch booklet ordering
//!
//! The page count is padded to a multiple of four; sheet `s` then holds
//! pages `(1 + 2s, P' - 2s)` on the front and `(2 + 2s, P' - 1 - 2s)` on
//! the back. Padding takes the highest numbers, so blanks land on the
//! innermost sheets.

use super::plan::{Face, Sheet, Slot};

pub const PAGES_PER_SHEET: usize = 4;

/// Page count rounded up to whole booklet sheets
pub fn padded_page_count(page_count: usize) -> usize {
    page_count.div_ceil(PAGES_PER_SHEET) * PAGES_PER_SHEET
}

pub(crate) fn booklet(page_count: usize) -> Vec<Sheet> {
    let padded = padded_page_count(page_count);
    let slot = |number| Slot::numbered(number, page_count);

    (0..padded / PAGES_PER_SHEET)
        .map(|s| Sheet {
            index: s,
            front: Face::Spread {
                left: slot(1 + 2 * s),
                right: slot(padded - 2 * s),
            },
            back: Some(Face::Spread {
                left: slot(2 + 2 * s),
                right: slot(padded - 1 - 2 * s),
            }),
        })
        .collect()
}
