use crate::layout::TextLayout;

/// Maps layout coordinates to text offsets.
///
/// `precise_offset` is for seeding a selection, `hysteresis_offset` for
/// following a drag without jitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetResolver {
    /// Fraction of a char width the pointer must travel past the previous
    /// boundary before the boundary moves. Values at or below 0.5 only keep
    /// plain nearest-offset snapping.
    dead_zone: f32,
}

impl OffsetResolver {
    pub fn new(dead_zone: f32) -> Self {
        Self {
            dead_zone: dead_zone.max(0.0),
        }
    }

    pub fn dead_zone(&self) -> f32 {
        self.dead_zone
    }

    /// The char under (x, y): nearest insertion point, stepped left when it
    /// lies to the right of the pointer
    pub fn precise_offset(&self, layout: &dyn TextLayout, x: f32, y: f32) -> usize {
        let line = layout.line_for_vertical(y);
        let offset = layout.offset_for_horizontal(line, x);
        if offset > layout.line_start(line) && layout.primary_horizontal(offset) > x {
            offset - 1
        } else {
            offset
        }
    }

    /// Offset for a drag position, biased towards `previous`
    pub fn hysteresis_offset(
        &self,
        layout: &dyn TextLayout,
        x: f32,
        y: f32,
        previous: usize,
    ) -> usize {
        let len = layout.text_len();
        let previous = previous.min(len);
        let mut line = layout.line_for_vertical(y);

        // An offset at a line end also starts the next line; when the pointer
        // sits over the last char of the earlier line, reason about that line.
        let mut reference = previous;
        if is_end_of_line_offset(layout, previous) {
            let last_line = layout.line_for_offset(previous - 1);
            let left = layout.primary_horizontal(previous - 1);
            let right = layout.line_right(last_line);
            let threshold = (right - left) / 2.0;
            if x > right - threshold {
                reference = previous - 1;
            }
        }

        let reference_line = layout.line_for_offset(reference);
        let top = layout.line_top(reference_line);
        let bottom = layout.line_bottom(reference_line);
        let threshold = (bottom - top) / 2.0;
        if (line == reference_line + 1 && y - bottom < threshold)
            || (line + 1 == reference_line && top - y < threshold)
        {
            line = reference_line;
        }

        let mut offset = layout.offset_for_horizontal(line, x);

        // Layouts never hand out the end of a wrapped line; let the pointer
        // reach it from the right half of the line's last char.
        if offset + 1 < len && is_end_of_line_offset(layout, offset + 1) {
            let left = layout.primary_horizontal(offset);
            let right = layout.line_right(line);
            let threshold = (right - left) / 2.0;
            if x > right - threshold {
                offset += 1;
            }
        }

        if offset != previous
            && layout.line_for_offset(offset) == line
            && layout.line_for_offset(previous) == line
        {
            let previous_x = layout.primary_horizontal(previous);
            let distance = offset.abs_diff(previous) as f32;
            let char_width = (layout.primary_horizontal(offset) - previous_x).abs() / distance;
            if (x - previous_x).abs() < self.dead_zone * char_width {
                return previous;
            }
        }

        offset
    }
}

impl Default for OffsetResolver {
    fn default() -> Self {
        Self::new(crate::SelectionOptions::default().dead_zone)
    }
}

fn is_end_of_line_offset(layout: &dyn TextLayout, offset: usize) -> bool {
    offset > 0
        && offset <= layout.text_len()
        && layout.line_for_offset(offset) == layout.line_for_offset(offset - 1) + 1
}
