use super::highlight::Highlight;
use crate::options::{Color, DEFAULT_HIGHLIGHT_COLOR};
use std::ops::Range;

/// Called with the selected text whenever it changes, `None` once cleared
pub type SelectListener = Box<dyn FnMut(Option<&str>)>;

/// Ordered selection over a surface's text, in char offsets
pub struct SelectionRange {
    start: usize,
    end: usize,
    content: Option<String>,
    highlight: Option<Highlight>,
    color: Color,
    listener: Option<SelectListener>,
}

impl SelectionRange {
    /// Create empty selection
    pub fn new(color: Color) -> Self {
        Self {
            start: 0,
            end: 0,
            content: None,
            highlight: None,
            color,
            listener: None,
        }
    }

    pub fn set_listener(&mut self, listener: Option<SelectListener>) {
        self.listener = listener;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Check if selection is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Selected text, `None` when nothing is selected
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    /// Move either or both ends (`None` keeps the current value).
    ///
    /// Reversed ends are swapped and the end is clamped to the text; the
    /// highlight is recreated and the listener sees the new content.
    pub fn set(&mut self, text: &str, start: Option<usize>, end: Option<usize>) {
        if let Some(start) = start {
            self.start = start;
        }
        if let Some(end) = end {
            self.end = end;
        }
        if self.start > self.end {
            std::mem::swap(&mut self.start, &mut self.end);
        }

        let len = text.chars().count();
        self.end = self.end.min(len);
        self.start = self.start.min(self.end);

        let content = char_slice(text, self.start, self.end).to_string();
        self.highlight = Some(Highlight::new(self.start, self.end, self.color));
        self.content = Some(content);
        self.notify();
    }

    pub fn select_all(&mut self, text: &str) {
        self.set(text, Some(0), Some(text.chars().count()));
    }

    /// Drop content and highlight; the ends stay until the next `set`
    pub fn reset(&mut self) {
        self.content = None;
        self.highlight = None;
    }

    /// Reset and tell the listener the selection is gone
    pub fn clear(&mut self) {
        let had_content = self.content.is_some();
        self.reset();
        if had_content {
            if let Some(listener) = self.listener.as_mut() {
                listener(None);
            }
        }
    }

    /// Report the current content to the listener again
    pub fn notify(&mut self) {
        if let Some(listener) = self.listener.as_mut() {
            listener(self.content.as_deref());
        }
    }
}

/// `text[start..end]` in char offsets
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let from = byte_index(text, start);
    let to = byte_index(text, end).max(from);
    &text[from..to]
}

fn byte_index(text: &str, offset: usize) -> usize {
    text.char_indices()
        .nth(offset)
        .map(|(index, _)| index)
        .unwrap_or(text.len())
}

impl Default for SelectionRange {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHLIGHT_COLOR)
    }
}

impl std::fmt::Debug for SelectionRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionRange")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("content", &self.content)
            .field("highlight", &self.highlight)
            .finish_non_exhaustive()
    }
}
