//! Plain-text content flow
//!
//! Each source line is one content unit of fixed height. Lines starting
//! with `#` through `######` are headings (`h1`..`h6`), blank lines are
//! `blank`, everything else is `p`. Consecutive `p` lines form one
//! paragraph block; headings and blank lines are blocks of their own.

use super::{ContentFlow, ContentRange, Measurement};
use crate::types::*;

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];
const PARAGRAPH_TAG: &str = "p";
const BLANK_TAG: &str = "blank";

#[derive(Debug, Clone)]
struct Line {
    text: String,
    tag: &'static str,
    block: usize,
}

#[derive(Debug, Clone)]
pub struct TextFlow {
    lines: Vec<Line>,
    blocks: Vec<ContentRange>,
    line_height: f32,
    unavailable: Option<String>,
}

impl TextFlow {
    pub fn new(text: &str, line_height: f32) -> Self {
        let mut lines: Vec<Line> = Vec::new();
        let mut blocks: Vec<ContentRange> = Vec::new();

        for (offset, raw) in text.lines().enumerate() {
            let tag = classify(raw);
            let continues_paragraph = tag == PARAGRAPH_TAG
                && lines.last().is_some_and(|prev| prev.tag == PARAGRAPH_TAG);

            if continues_paragraph {
                if let Some(block) = blocks.last_mut() {
                    block.end = offset + 1;
                }
            } else {
                blocks.push(ContentRange::new(offset, offset + 1));
            }

            lines.push(Line {
                text: raw.to_string(),
                tag,
                block: blocks.len() - 1,
            });
        }

        Self {
            lines,
            blocks,
            line_height,
            unavailable: None,
        }
    }

    /// A flow whose source could not be obtained
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            lines: Vec::new(),
            blocks: Vec::new(),
            line_height: 0.0,
            unavailable: Some(reason.into()),
        }
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Source lines covered by `range`
    pub fn text(&self, range: ContentRange) -> impl Iterator<Item = &str> {
        let end = range.end.min(self.lines.len());
        let start = range.start.min(end);
        self.lines[start..end].iter().map(|line| line.text.as_str())
    }
}

fn classify(line: &str) -> &'static str {
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return BLANK_TAG;
    }

    let hashes = trimmed.chars().take_while(|&c| c == '#').count();
    let rest = &trimmed[hashes..];
    if (1..=HEADING_TAGS.len()).contains(&hashes) && (rest.is_empty() || rest.starts_with(' ')) {
        HEADING_TAGS[hashes - 1]
    } else {
        PARAGRAPH_TAG
    }
}

impl ContentFlow for TextFlow {
    fn source(&self) -> Result<ContentRange> {
        match &self.unavailable {
            Some(reason) => Err(PaginationError::ContentUnavailable(reason.clone())),
            None => Ok(ContentRange::new(0, self.lines.len())),
        }
    }

    fn measure(&self, range: ContentRange, available_height: f32) -> Measurement {
        let fitting_lines = if self.line_height > 0.0 && available_height > 0.0 {
            (available_height / self.line_height).floor() as usize
        } else {
            0
        };
        Measurement::fitting(range, range.start.saturating_add(fitting_lines))
    }

    fn break_points(&self, range: ContentRange) -> Vec<usize> {
        (range.start + 1..=range.end).collect()
    }

    fn block_tag(&self, offset: usize) -> Option<&str> {
        self.lines.get(offset).map(|line| line.tag)
    }

    fn block_extent(&self, offset: usize) -> Option<ContentRange> {
        self.lines
            .get(offset)
            .and_then(|line| self.blocks.get(line.block))
            .copied()
    }
}
