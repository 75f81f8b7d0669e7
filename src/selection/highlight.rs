use crate::options::Color;
use std::ops::Range;

/// Background span painted under the selected text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub start: usize,
    pub end: usize,
    pub color: Color,
}

impl Highlight {
    pub fn new(start: usize, end: usize, color: Color) -> Self {
        Self { start, end, color }
    }

    /// Part of `line` (char offsets) covered by this highlight
    pub fn intersect(&self, line: Range<usize>) -> Option<Range<usize>> {
        let start = self.start.max(line.start);
        let end = self.end.min(line.end);
        (start < end).then_some(start..end)
    }

    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}
