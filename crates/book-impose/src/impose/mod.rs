//! Imposition - arranging book pages onto physical sheets
//!
//! This module orchestrates the imposition process:
//! 1. Validate the arrangement request
//! 2. Order pages onto sheet faces for the chosen arrangement
//! 3. Compute sheet, trim, bleed and mark geometry
//!
//! Rendering the resulting plan lives in [`crate::render`].

mod booklet;
mod plan;
mod simple;

pub use booklet::padded_page_count;
pub use plan::*;

use crate::layout::sheet_geometry;
use crate::options::{Arrangement, ArrangementConfig};
use crate::types::*;
use book_paginate::Book;
use log::debug;

/// Main imposition function
///
/// Pure function of its inputs: a new plan is computed on every call.
pub fn impose(book: &Book, config: &ArrangementConfig) -> Result<SheetPlan> {
    config.validate()?;

    let source_pages = book.len();
    if source_pages == 0 {
        return Err(ImposeError::NoPages);
    }

    // Dispatch based on arrangement
    let sheets = match config.arrangement {
        Arrangement::One => simple::one_up(source_pages),
        Arrangement::Two => simple::two_up(source_pages),
        Arrangement::Booklet => booklet::booklet(source_pages),
    };

    let padded_pages = match config.arrangement {
        Arrangement::One => source_pages,
        Arrangement::Two => source_pages.next_multiple_of(2),
        Arrangement::Booklet => padded_page_count(source_pages),
    };

    debug!(
        "Imposed {} pages onto {} sheets ({:?})",
        source_pages,
        sheets.len(),
        config.arrangement
    );

    Ok(SheetPlan {
        config: *config,
        source_pages,
        padded_pages,
        geometry: sheet_geometry(book.setup(), config),
        sheets,
    })
}
