use crate::impose::padded_page_count;
use crate::options::{Arrangement, ArrangementConfig};
use crate::types::*;
use book_paginate::Book;

/// Calculate statistics for the imposition without building the plan
pub fn calculate_statistics(
    book: &Book,
    config: &ArrangementConfig,
) -> Result<ImpositionStatistics> {
    let source_pages = book.len();

    if source_pages == 0 {
        return Err(ImposeError::NoPages);
    }

    // Calculate based on arrangement
    Ok(match config.arrangement {
        Arrangement::One => ImpositionStatistics {
            source_pages,
            output_sheets: source_pages,
            output_faces: source_pages,
            padded_pages: source_pages,
            blank_pages_added: 0,
        },
        Arrangement::Two => calculate_spread_stats(source_pages),
        Arrangement::Booklet => calculate_booklet_stats(source_pages),
    })
}

fn calculate_spread_stats(source_pages: usize) -> ImpositionStatistics {
    // Pad to even number
    let padded_pages = source_pages.next_multiple_of(2);
    let total_sheets = padded_pages / 2;

    ImpositionStatistics {
        source_pages,
        output_sheets: total_sheets,
        output_faces: total_sheets,
        padded_pages,
        blank_pages_added: padded_pages - source_pages,
    }
}

fn calculate_booklet_stats(source_pages: usize) -> ImpositionStatistics {
    let padded_pages = padded_page_count(source_pages);
    let total_sheets = padded_pages / 4;

    // Front and back of each sheet
    ImpositionStatistics {
        source_pages,
        output_sheets: total_sheets,
        output_faces: total_sheets * 2,
        padded_pages,
        blank_pages_added: padded_pages - source_pages,
    }
}
