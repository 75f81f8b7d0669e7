use super::adapter::TextLayout;

/// One visual line: `start..end` in chars, `visible` chars drawn
/// (everything except a trailing `\n`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
    pub visible: usize,
}

/// Fixed-cell text layout with greedy word wrapping.
///
/// Used by the terminal binding (one cell per char) and the egui binding
/// (monospace font metrics).
#[derive(Debug, Clone)]
pub struct MonospaceLayout {
    lines: Vec<LineSpan>,
    text_len: usize,
    cell_width: f32,
    line_height: f32,
    wrap_columns: Option<usize>,
}

impl MonospaceLayout {
    /// Lay out `text`, wrapping at `wrap_columns` cells when given
    pub fn new(text: &str, wrap_columns: Option<usize>, cell_width: f32, line_height: f32) -> Self {
        let mut layout = Self {
            lines: Vec::new(),
            text_len: 0,
            cell_width,
            line_height,
            wrap_columns: wrap_columns.map(|c| c.max(1)),
        };
        layout.relayout(text);
        layout
    }

    /// Rebuild line geometry after a text change
    pub fn relayout(&mut self, text: &str) {
        let chars: Vec<char> = text.chars().collect();
        self.text_len = chars.len();
        self.lines.clear();

        let mut seg_start = 0;
        loop {
            let seg_end = chars[seg_start..]
                .iter()
                .position(|&c| c == '\n')
                .map(|p| seg_start + p);

            match seg_end {
                Some(newline) => {
                    let start = self.wrap_segment(&chars, seg_start, newline);
                    self.lines.push(LineSpan {
                        start,
                        end: newline + 1,
                        visible: newline - start,
                    });
                    seg_start = newline + 1;
                }
                None => {
                    let start = self.wrap_segment(&chars, seg_start, chars.len());
                    self.lines.push(LineSpan {
                        start,
                        end: chars.len(),
                        visible: chars.len() - start,
                    });
                    break;
                }
            }
        }
    }

    /// Rebuild line geometry for a new wrap width
    pub fn set_wrap_columns(&mut self, text: &str, wrap_columns: Option<usize>) {
        let wrap_columns = wrap_columns.map(|c| c.max(1));
        if self.wrap_columns != wrap_columns {
            self.wrap_columns = wrap_columns;
            self.relayout(text);
        }
    }

    /// Push soft-wrapped lines for `chars[start..end]` and return the start
    /// of the remaining (last) piece
    fn wrap_segment(&mut self, chars: &[char], mut start: usize, end: usize) -> usize {
        let Some(columns) = self.wrap_columns else {
            return start;
        };

        while end - start > columns {
            // Break after the last whitespace that fits, else mid-word
            let window = &chars[start..start + columns];
            let split = match window.iter().rposition(|c| c.is_whitespace()) {
                Some(ws) => start + ws + 1,
                None => start + columns,
            };
            self.lines.push(LineSpan {
                start,
                end: split,
                visible: split - start,
            });
            start = split;
        }
        start
    }

    pub fn lines(&self) -> &[LineSpan] {
        &self.lines
    }

    pub fn cell_width(&self) -> f32 {
        self.cell_width
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Total height of all lines
    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }

    fn span(&self, line: usize) -> LineSpan {
        self.lines[line.min(self.lines.len() - 1)]
    }
}

impl TextLayout for MonospaceLayout {
    fn text_len(&self) -> usize {
        self.text_len
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_for_vertical(&self, y: f32) -> usize {
        if y <= 0.0 || self.line_height <= 0.0 {
            return 0;
        }
        ((y / self.line_height) as usize).min(self.lines.len() - 1)
    }

    fn line_for_offset(&self, offset: usize) -> usize {
        if offset >= self.text_len {
            return self.lines.len() - 1;
        }
        self.lines.partition_point(|line| line.end <= offset)
    }

    fn line_start(&self, line: usize) -> usize {
        self.span(line).start
    }

    fn line_end(&self, line: usize) -> usize {
        self.span(line).end
    }

    fn line_top(&self, line: usize) -> f32 {
        line.min(self.lines.len() - 1) as f32 * self.line_height
    }

    fn line_bottom(&self, line: usize) -> f32 {
        self.line_top(line) + self.line_height
    }

    fn line_right(&self, line: usize) -> f32 {
        self.span(line).visible as f32 * self.cell_width
    }

    fn primary_horizontal(&self, offset: usize) -> f32 {
        let offset = offset.min(self.text_len);
        let span = self.span(self.line_for_offset(offset));
        (offset - span.start) as f32 * self.cell_width
    }

    fn offset_for_horizontal(&self, line: usize, x: f32) -> usize {
        let line = line.min(self.lines.len() - 1);
        let span = self.lines[line];
        let max = if line + 1 == self.lines.len() {
            span.end
        } else {
            span.end.saturating_sub(1).max(span.start)
        };
        if x <= 0.0 || self.cell_width <= 0.0 {
            return span.start;
        }
        let column = (x / self.cell_width).round() as usize;
        (span.start + column).min(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_has_one_line() {
        let layout = MonospaceLayout::new("", Some(10), 1.0, 1.0);
        assert_eq!(layout.line_count(), 1);
        assert_eq!(layout.line_for_offset(0), 0);
        assert_eq!(layout.offset_for_horizontal(0, 5.0), 0);
    }

    #[test]
    fn test_word_wrap_breaks_after_space() {
        // "hello world foo" at 8 columns -> "hello " | "world " | "foo"
        let layout = MonospaceLayout::new("hello world foo", Some(8), 1.0, 1.0);
        let spans: Vec<(usize, usize)> = layout.lines().iter().map(|l| (l.start, l.end)).collect();
        assert_eq!(spans, vec![(0, 6), (6, 12), (12, 15)]);
    }

    #[test]
    fn test_long_word_breaks_mid_word() {
        let layout = MonospaceLayout::new("abcdefghij", Some(4), 1.0, 1.0);
        let spans: Vec<(usize, usize)> = layout.lines().iter().map(|l| (l.start, l.end)).collect();
        assert_eq!(spans, vec![(0, 4), (4, 8), (8, 10)]);
    }

    #[test]
    fn test_newline_belongs_to_its_line() {
        let layout = MonospaceLayout::new("ab\ncd", None, 1.0, 1.0);
        assert_eq!(layout.line_count(), 2);
        assert_eq!(layout.line_for_offset(2), 0);
        assert_eq!(layout.line_for_offset(3), 1);
        assert_eq!(layout.line_right(0), 2.0);
    }

    #[test]
    fn test_soft_wrap_offset_belongs_to_next_line() {
        let layout = MonospaceLayout::new("abcdefgh", Some(4), 2.0, 10.0);
        assert_eq!(layout.line_for_offset(4), 1);
        assert_eq!(layout.primary_horizontal(4), 0.0);
        assert_eq!(layout.primary_horizontal(6), 4.0);
        // Far right of a wrapped line never resolves to its end
        assert_eq!(layout.offset_for_horizontal(0, 100.0), 3);
        assert_eq!(layout.offset_for_horizontal(1, 100.0), 8);
    }

    #[test]
    fn test_vertical_clamps() {
        let layout = MonospaceLayout::new("a\nb\nc", None, 1.0, 10.0);
        assert_eq!(layout.line_for_vertical(-5.0), 0);
        assert_eq!(layout.line_for_vertical(15.0), 1);
        assert_eq!(layout.line_for_vertical(500.0), 2);
    }
}
