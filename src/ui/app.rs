use crate::clipboard::MemoryClipboard;
use crate::document::{Document, LongPress};
use crate::layout::{Point, TextLayout, TextSurface};
use crate::options::SelectionOptions;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use std::io;
use std::time::{Duration, Instant};

/// Longest wait for input before the next frame
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Rows moved per wheel notch
const SCROLL_STEP: u16 = 3;

/// Selection options sized for terminal cells
pub fn terminal_options() -> SelectionOptions {
    SelectionOptions::default()
        .with_handle_size(2.0)
        .with_handle_padding(0.0)
        .with_toolbar([12.0, 1.0], 1.0)
}

/// Application state
pub struct App {
    pub document: Document,
    pub clipboard: MemoryClipboard,
    /// Document rows scrolled off the top
    pub scroll: u16,
    /// Inner document area from the last layout
    pub viewport: Rect,
    /// Deferred entry waiting for confirmation
    pub dialog: Option<usize>,
    pub should_quit: bool,
    pub status_message: String,
    content_height: u16,
}

impl App {
    pub fn new(options: SelectionOptions) -> Self {
        let clipboard = MemoryClipboard::new();
        let document = Document::sample(options, Box::new(clipboard.clone()), 1.0);
        Self {
            document,
            clipboard,
            scroll: 0,
            viewport: Rect::default(),
            dialog: None,
            should_quit: false,
            status_message: "Hold the left button or right-click to select | q: quit".to_string(),
            content_height: 0,
        }
    }

    /// Wrap and place every block inside `viewport` (one cell per char)
    pub fn layout(&mut self, viewport: Rect) {
        self.viewport = viewport;
        let columns = viewport.width.max(1) as usize;
        let right = f32::from(viewport.x + viewport.width);

        let mut row: u16 = 0;
        for entry in self.document.entries_mut() {
            // Title row
            row += 1;

            let block = &mut entry.block;
            block.measure(columns, 1.0, 1.0);
            block.set_origin(Point::new(
                f32::from(viewport.x),
                f32::from(viewport.y) + f32::from(row) - f32::from(self.scroll),
            ));
            block.set_viewport_width(right);

            let lines = block.layout().map_or(0, |layout| layout.line_count()) as u16;
            // Text plus a blank separator
            row += lines + 1;
        }

        self.content_height = row;
        let max_scroll = self.content_height.saturating_sub(viewport.height);
        if self.scroll > max_scroll {
            self.scroll = max_scroll;
        }
    }

    /// Layout is on screen: run re-shows and due long-presses
    pub fn after_draw(&mut self, now: Instant) {
        if let Some(long_press) = self.document.frame(now) {
            self.on_long_press(long_press);
        }
    }

    fn on_long_press(&mut self, long_press: LongPress) {
        match long_press {
            LongPress::Shown(_) => self.status_message.clear(),
            LongPress::Armed(index) => {
                self.dialog = Some(index);
                self.status_message = "Show selection? y: here | a: select all | n: cancel".to_string();
            }
            LongPress::Missed => self.status_message = "Nothing to select there".to_string(),
        }
    }

    /// Wait for one input event and handle it
    pub fn handle_input(&mut self) -> io::Result<()> {
        let now = Instant::now();
        let timeout = self
            .document
            .next_wakeup()
            .map_or(POLL_INTERVAL, |at| at.saturating_duration_since(now))
            .min(POLL_INTERVAL);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse, Instant::now()),
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let Some(index) = self.dialog {
            match key.code {
                KeyCode::Char('y') => self.finish_dialog(index, false),
                KeyCode::Char('a') => self.finish_dialog(index, true),
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.dialog = None;
                    self.status_message.clear();
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Esc => self.document.hide_selection(),
            KeyCode::Up => self.scroll_by(-1),
            KeyCode::Down => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-(self.viewport.height as i32)),
            KeyCode::PageDown => self.scroll_by(self.viewport.height as i32),
            _ => {}
        }
    }

    fn finish_dialog(&mut self, index: usize, select_all: bool) {
        self.dialog = None;
        if self.document.show_armed(index, select_all) {
            self.status_message.clear();
        } else {
            self.status_message = "Nothing to select there".to_string();
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if self.dialog.is_some() {
            return;
        }
        // Cell centers, so a click lands inside the char it covers
        let raw = Point::new(f32::from(mouse.column) + 0.5, f32::from(mouse.row) + 0.5);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.document.pointer_down(raw, now);
            }
            MouseEventKind::Down(MouseButton::Right) => {
                if let Some(long_press) = self.document.secondary_click(raw) {
                    self.on_long_press(long_press);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.document.pointer_move(raw);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.document.pointer_up(raw);
            }
            MouseEventKind::ScrollUp => self.scroll_by(-(SCROLL_STEP as i32)),
            MouseEventKind::ScrollDown => self.scroll_by(SCROLL_STEP as i32),
            _ => {}
        }
    }

    fn scroll_by(&mut self, rows: i32) {
        let max_scroll = self.content_height.saturating_sub(self.viewport.height);
        let scroll = (i32::from(self.scroll) + rows).clamp(0, i32::from(max_scroll)) as u16;
        if scroll != self.scroll {
            self.scroll = scroll;
            self.document.scroll_started();
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(terminal_options())
    }
}
