//! Sheet layout calculations
//!
//! Turns a page setup and an arrangement into concrete rectangles:
//! the physical sheet, the trim box of every slot, the bleed around
//! them and the printer's marks.

mod types;

pub use types::*;

use crate::constants::MARK_GUTTER;
use crate::marks::mark_lines;
use crate::options::{ArrangementConfig, SheetSize};
use book_paginate::PageSetup;
use log::warn;

/// Bleed drawn around the artwork; only shown when the marks ask for it
pub fn shown_bleed(setup: &PageSetup, config: &ArrangementConfig) -> f32 {
    if config.marks.bleed() { setup.bleed } else { 0.0 }
}

/// Room needed around the trim box on an auto-sized sheet
pub fn auto_outset(setup: &PageSetup, config: &ArrangementConfig) -> f32 {
    let gutter = if config.marks.any() { MARK_GUTTER } else { 0.0 };
    shown_bleed(setup, config) + gutter
}

/// Compute the geometry shared by every face of an imposition
pub fn sheet_geometry(setup: &PageSetup, config: &ArrangementConfig) -> SheetGeometry {
    let cols = config.arrangement.pages_per_face();
    let page_w = setup.size.width;
    let page_h = setup.size.height;
    let art_w = page_w * cols as f32;
    let bleed = shown_bleed(setup, config);

    let (sheet_width, sheet_height, origin_x, origin_y) = match config.sheet_size {
        SheetSize::Auto => {
            let outset = auto_outset(setup, config);
            (art_w + 2.0 * outset, page_h + 2.0 * outset, outset, outset)
        }
        SheetSize::Fixed { paper, orientation } => {
            let (w, h) = paper.dimensions_pt(orientation);
            (w, h, (w - art_w) / 2.0, (h - page_h) / 2.0)
        }
    };

    let trim = Rect::new(origin_x, origin_y, art_w, page_h);
    let slots = (0..cols)
        .map(|col| {
            let slot_trim = Rect::new(origin_x + col as f32 * page_w, origin_y, page_w, page_h);
            // Bleed only on edges that get cut, never across the spine
            let left = if col == 0 { bleed } else { 0.0 };
            let right = if col + 1 == cols { bleed } else { 0.0 };
            SlotGeometry {
                trim: slot_trim,
                bleed: slot_trim.outset(left, bleed, right, bleed),
            }
        })
        .collect();

    let spine = (cols == 2).then(|| origin_x + page_w);
    let geometry = SheetGeometry {
        sheet_width,
        sheet_height,
        trim,
        bleed: trim.outset(bleed, bleed, bleed, bleed),
        slots,
        marks: mark_lines(&trim, bleed, config.marks, spine),
    };

    if !geometry.fits_sheet() {
        warn!(
            "Artwork {:.1} x {:.1}pt does not fit on a {:.1} x {:.1}pt sheet",
            geometry.bleed.width, geometry.bleed.height, sheet_width, sheet_height
        );
    }

    geometry
}

/// Content box of a page placed in `trim`, mirrored for verso pages
pub fn content_rect(trim: &Rect, setup: &PageSetup, recto: bool) -> Rect {
    let margin = &setup.margin;
    let content = setup.content_box();
    let left = if recto { margin.inner } else { margin.outer };
    Rect::new(
        trim.x + left,
        trim.y + margin.bottom,
        content.width,
        content.height,
    )
}
