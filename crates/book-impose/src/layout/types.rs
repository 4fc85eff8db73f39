//! Geometry types shared by the plan, marks and proof renderer
//!
//! All coordinates are PDF points with the origin at the bottom-left
//! corner of the sheet.

use crate::marks::MarkLine;

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Grow each edge outward by its own amount
    pub fn outset(&self, left: f32, bottom: f32, right: f32, top: f32) -> Rect {
        Rect::new(
            self.x - left,
            self.y - bottom,
            self.width + left + right,
            self.height + bottom + top,
        )
    }

    /// True when `other` lies entirely inside this rectangle
    pub fn contains(&self, other: &Rect) -> bool {
        const EPSILON: f32 = 0.01;
        other.x >= self.x - EPSILON
            && other.y >= self.y - EPSILON
            && other.right() <= self.right() + EPSILON
            && other.top() <= self.top() + EPSILON
    }
}

/// Where one page slot sits on a face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotGeometry {
    /// Trim box of the page
    pub trim: Rect,
    /// Trim box grown by the bleed on the edges that will be cut
    pub bleed: Rect,
}

/// Geometry shared by every face of a plan
///
/// Faces of one plan all have the same shape, so it is computed once.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGeometry {
    /// Physical sheet width in points
    pub sheet_width: f32,
    /// Physical sheet height in points
    pub sheet_height: f32,
    /// Trim box of the whole artwork (one page or a spread)
    pub trim: Rect,
    /// Artwork trim box plus bleed
    pub bleed: Rect,
    /// Slots left to right
    pub slots: Vec<SlotGeometry>,
    /// Crop and bleed mark segments, empty when no marks were requested
    pub marks: Vec<MarkLine>,
}

impl SheetGeometry {
    /// The physical sheet as a rectangle
    pub fn sheet_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.sheet_width, self.sheet_height)
    }

    /// Whether the artwork and its bleed fit on the sheet
    pub fn fits_sheet(&self) -> bool {
        self.sheet_rect().contains(&self.bleed)
    }
}
