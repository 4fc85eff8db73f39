//! Shared constants for imposition geometry and proof rendering

// =============================================================================
// Printer's Marks
// =============================================================================

/// Line width for crop marks (points)
pub const CROP_MARK_WIDTH: f32 = 0.25;

/// Line width for bleed marks (points)
pub const BLEED_MARK_WIDTH: f32 = 0.25;

/// Length of crop and bleed marks (points)
pub const CROP_MARK_LENGTH: f32 = 12.0;

/// Gap between a mark and the edge it points at (points)
pub const CROP_MARK_GAP: f32 = 3.0;

/// Room a mark needs outside the edge it marks
pub const MARK_GUTTER: f32 = CROP_MARK_GAP + CROP_MARK_LENGTH;

// =============================================================================
// Proof Outlines
// =============================================================================

/// Line width for trim box outlines (points)
pub const TRIM_LINE_WIDTH: f32 = 0.5;

/// Line width for content box and bleed outlines (points)
pub const GUIDE_LINE_WIDTH: f32 = 0.25;

/// Gray level for guide outlines
pub const GUIDE_GRAY: f32 = 0.6;

// =============================================================================
// Page Labels
// =============================================================================

/// Font size for page numbers and footers (points)
pub const PAGE_NUMBER_FONT_SIZE: f32 = 8.0;

/// Vertical offset for page labels from the trim edge (points)
pub const PAGE_NUMBER_OFFSET: f32 = 10.0;

/// Approximate character width ratio for Helvetica
pub const HELVETICA_CHAR_WIDTH_RATIO: f32 = 0.5;
