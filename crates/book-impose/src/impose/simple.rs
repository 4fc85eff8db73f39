//! Single-sided arrangements: one page or one spread per sheet

use super::plan::{Face, Sheet, Slot};

/// One page per sheet, reading order unchanged
pub(crate) fn one_up(page_count: usize) -> Vec<Sheet> {
    (0..page_count)
        .map(|index| Sheet {
            index,
            front: Face::Single(Slot::numbered(index + 1, page_count)),
            back: None,
        })
        .collect()
}

/// Consecutive pages side by side; an odd count leaves the last right slot blank
pub(crate) fn two_up(page_count: usize) -> Vec<Sheet> {
    (0..page_count.div_ceil(2))
        .map(|index| Sheet {
            index,
            front: Face::Spread {
                left: Slot::numbered(2 * index + 1, page_count),
                right: Slot::numbered(2 * index + 2, page_count),
            },
            back: None,
        })
        .collect()
}
