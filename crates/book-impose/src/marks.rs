//! Printer's marks for imposed faces
//!
//! Marks are computed as plain line segments first so the plan can be
//! inspected without rendering, then turned into PDF content stream
//! operations by [`generate_marks`].

use crate::constants::{BLEED_MARK_WIDTH, CROP_MARK_GAP, CROP_MARK_LENGTH, CROP_MARK_WIDTH};
use crate::layout::Rect;
use crate::options::MarksPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkKind {
    /// Points at the trim line
    Crop,
    /// Points at the bleed line
    Bleed,
}

/// One straight mark segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkLine {
    pub kind: MarkKind,
    pub from: (f32, f32),
    pub to: (f32, f32),
}

impl MarkLine {
    fn new(kind: MarkKind, from: (f32, f32), to: (f32, f32)) -> Self {
        Self { kind, from, to }
    }
}

/// Compute mark segments around the trim box of a face.
///
/// Crop marks sit outside the bleed when the bleed is shown so they
/// never print into it. `spine` adds short ticks above and below the
/// fold of a spread.
pub fn mark_lines(trim: &Rect, bleed: f32, policy: MarksPolicy, spine: Option<f32>) -> Vec<MarkLine> {
    let mut lines = Vec::new();

    if policy.crop() {
        let offset = bleed + CROP_MARK_GAP;
        corner_marks(&mut lines, MarkKind::Crop, trim, offset);

        if let Some(x) = spine {
            lines.push(MarkLine::new(
                MarkKind::Crop,
                (x, trim.top() + offset),
                (x, trim.top() + offset + CROP_MARK_LENGTH),
            ));
            lines.push(MarkLine::new(
                MarkKind::Crop,
                (x, trim.y - offset),
                (x, trim.y - offset - CROP_MARK_LENGTH),
            ));
        }
    }

    if policy.bleed() {
        let bleed_box = trim.outset(bleed, bleed, bleed, bleed);
        corner_marks(&mut lines, MarkKind::Bleed, &bleed_box, CROP_MARK_GAP);
    }

    lines
}

/// Two segments per corner, each extending away from the box
fn corner_marks(lines: &mut Vec<MarkLine>, kind: MarkKind, rect: &Rect, offset: f32) {
    let len = CROP_MARK_LENGTH;
    for (x, y, dx, dy) in [
        (rect.x, rect.top(), -1.0, 1.0),
        (rect.right(), rect.top(), 1.0, 1.0),
        (rect.x, rect.y, -1.0, -1.0),
        (rect.right(), rect.y, 1.0, -1.0),
    ] {
        // Vertical segment above or below the corner
        lines.push(MarkLine::new(
            kind,
            (x, y + dy * offset),
            (x, y + dy * (offset + len)),
        ));
        // Horizontal segment left or right of the corner
        lines.push(MarkLine::new(
            kind,
            (x + dx * offset, y),
            (x + dx * (offset + len), y),
        ));
    }
}

/// Generate PDF content stream operations for mark segments
pub fn generate_marks(lines: &[MarkLine]) -> String {
    if lines.is_empty() {
        return String::new();
    }

    let mut ops = String::new();
    ops.push_str("q\n");
    ops.push_str("0 0 0 RG\n");
    ops.push_str("[] 0 d\n");

    for (kind, width) in [
        (MarkKind::Crop, CROP_MARK_WIDTH),
        (MarkKind::Bleed, BLEED_MARK_WIDTH),
    ] {
        let mut segments = lines.iter().filter(|line| line.kind == kind).peekable();
        if segments.peek().is_none() {
            continue;
        }
        ops.push_str(&format!("{} w\n", width));
        for line in segments {
            ops.push_str(&format!(
                "{} {} m {} {} l S\n",
                line.from.0, line.from.1, line.to.0, line.to.1
            ));
        }
    }

    ops.push_str("Q\n");
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trim() -> Rect {
        Rect::new(27.0, 27.0, 288.0, 432.0)
    }

    #[test]
    fn test_no_marks() {
        assert!(mark_lines(&trim(), 0.0, MarksPolicy::None, None).is_empty());
        assert_eq!(generate_marks(&[]), "");
    }

    #[test]
    fn test_crop_marks_stay_outside_trim() {
        let trim = trim();
        let lines = mark_lines(&trim, 0.0, MarksPolicy::Crop, None);
        assert_eq!(lines.len(), 8);
        for line in &lines {
            for (x, y) in [line.from, line.to] {
                let inside = x > trim.x && x < trim.right() && y > trim.y && y < trim.top();
                assert!(!inside, "mark point ({}, {}) is inside the trim box", x, y);
            }
        }
    }

    #[test]
    fn test_crop_marks_clear_the_bleed() {
        let trim = trim();
        let lines = mark_lines(&trim, 12.0, MarksPolicy::Both, None);
        let crop: Vec<_> = lines.iter().filter(|l| l.kind == MarkKind::Crop).collect();
        let bleed: Vec<_> = lines.iter().filter(|l| l.kind == MarkKind::Bleed).collect();
        assert_eq!(crop.len(), 8);
        assert_eq!(bleed.len(), 8);

        // Top-left vertical crop mark starts past bleed + gap
        assert_eq!(crop[0].from, (trim.x, trim.top() + 15.0));
        assert_eq!(crop[0].to, (trim.x, trim.top() + 27.0));
        // Top-left vertical bleed mark sits on the bleed line
        assert_eq!(bleed[0].from, (trim.x - 12.0, trim.top() + 12.0 + 3.0));
    }

    #[test]
    fn test_spine_ticks() {
        let trim = Rect::new(15.0, 15.0, 576.0, 432.0);
        let lines = mark_lines(&trim, 0.0, MarksPolicy::Crop, Some(303.0));
        assert_eq!(lines.len(), 10);
        assert!(lines.iter().any(|l| l.from == (303.0, trim.top() + 3.0)));
    }

    #[test]
    fn test_generate_marks_uses_stroke_ops() {
        let lines = mark_lines(&trim(), 12.0, MarksPolicy::Bleed, None);
        let ops = generate_marks(&lines);
        assert!(ops.starts_with("q\n"));
        assert!(ops.ends_with("Q\n"));
        assert_eq!(ops.matches(" l S\n").count(), 8);
    }
}
