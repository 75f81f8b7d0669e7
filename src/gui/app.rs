use super::theme;
use crate::clipboard::MemoryClipboard;
use crate::document::{Document, LongPress};
use crate::layout::{self, Point, TextBlock, TextSurface};
use crate::options::SelectionOptions;
use crate::selection::{char_slice, Highlight};
use egui::{Align2, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use std::time::Instant;

const FONT_SIZE: f32 = 16.0;

/// Pointer travel, in points, that cancels a pending long-press
const TOUCH_SLOP: f32 = 8.0;

fn to_point(pos: Pos2) -> Point {
    Point::new(pos.x, pos.y)
}

fn to_pos(point: Point) -> Pos2 {
    Pos2::new(point.x, point.y)
}

fn to_rect(rect: layout::Rect) -> Rect {
    Rect::from_min_size(to_pos(rect.origin), Vec2::new(rect.width, rect.height))
}

pub struct GuiApp {
    document: Document,
    clipboard: MemoryClipboard,
    /// Deferred entry waiting for confirmation
    dialog: Option<usize>,
    status_message: String,
    scroll_offset: Vec2,
    /// Visible part of the document from the last frame
    viewport: Rect,
}

impl GuiApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, options: SelectionOptions) -> Self {
        let clipboard = MemoryClipboard::new();
        Self {
            document: Document::sample(options, Box::new(clipboard.clone()), TOUCH_SLOP),
            clipboard,
            dialog: None,
            status_message: "Press and hold, or right-click, to select".to_string(),
            scroll_offset: Vec2::ZERO,
            viewport: Rect::NOTHING,
        }
    }

    fn on_long_press(&mut self, long_press: LongPress) {
        match long_press {
            LongPress::Shown(_) => self.status_message.clear(),
            LongPress::Armed(index) => self.dialog = Some(index),
            LongPress::Missed => self.status_message = "Nothing to select there".to_string(),
        }
    }

    fn handle_pointer(&mut self, ctx: &egui::Context, now: Instant) {
        if self.dialog.is_some() {
            return;
        }
        let (pressed, dragging, released, secondary, pos) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down() && i.pointer.is_moving(),
                i.pointer.primary_released(),
                i.pointer.secondary_clicked(),
                i.pointer.interact_pos(),
            )
        });
        let Some(pos) = pos else {
            return;
        };
        let raw = to_point(pos);

        if pressed {
            self.document.pointer_down(raw, now);
        }
        if dragging {
            self.document.pointer_move(raw);
        }
        if released {
            self.document.pointer_up(raw);
        }
        if secondary {
            if let Some(long_press) = self.document.secondary_click(raw) {
                self.on_long_press(long_press);
            }
        }
    }

    /// Measure, place and paint every block
    fn paint_document(&mut self, ui: &mut egui::Ui) {
        let font = FontId::monospace(FONT_SIZE);
        let (cell_width, line_height) =
            ui.fonts(|f| (f.glyph_width(&font, 'M'), f.row_height(&font)));
        let width = ui.available_width();
        let columns = ((width / cell_width).floor() as usize).max(1);
        let screen_right = ui.ctx().screen_rect().right();

        let highlights: Vec<Option<Highlight>> = self
            .document
            .entries()
            .iter()
            .map(|entry| {
                self.document
                    .host()
                    .session(entry.block.id())
                    .and_then(|session| session.highlight().copied())
            })
            .collect();

        for (entry, highlight) in self.document.entries_mut().iter_mut().zip(highlights) {
            let mut title = egui::RichText::new(&entry.title)
                .italics()
                .color(theme::TITLE_COLOR);
            if entry.deferred {
                title = title.underline();
            }
            ui.label(title);

            let block = &mut entry.block;
            block.measure(columns, cell_width, line_height);
            let (rect, _) = ui.allocate_exact_size(Vec2::new(width, block.height()), Sense::hover());
            block.set_origin(to_point(rect.min));
            block.set_viewport_width(screen_right);

            paint_block(ui.painter(), block, rect.min, highlight, &font);
            ui.add_space(line_height);
        }
    }

    /// Handles and toolbar, above everything else
    fn paint_selection(&self, ctx: &egui::Context) {
        let Some(session) = self.document.host().active_session() else {
            return;
        };
        let layer = egui::LayerId::new(egui::Order::Foreground, egui::Id::new("selection"));
        let painter = ctx.layer_painter(layer);

        let handles = painter.with_clip_rect(self.viewport.expand(FONT_SIZE * 2.0));
        for view in session.handle_views() {
            let color = theme::color32(view.color);
            handles.circle_filled(to_pos(view.center), view.radius, color);
            handles.rect_filled(to_rect(view.notch), 0.0, color);
        }

        if let Some(toolbar) = session.toolbar_view() {
            painter.rect_filled(to_rect(toolbar.bounds), 6.0, theme::TOOLBAR_BG);
            for (index, (action, bounds)) in toolbar.buttons.iter().enumerate() {
                let rect = to_rect(*bounds);
                if index > 0 {
                    painter.vline(
                        rect.left(),
                        rect.y_range().shrink(8.0),
                        Stroke::new(1.0, theme::TOOLBAR_DIVIDER),
                    );
                }
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    action.label(),
                    FontId::proportional(14.0),
                    theme::TOOLBAR_FG,
                );
            }
        }
    }

    fn show_dialog(&mut self, ctx: &egui::Context) {
        let Some(index) = self.dialog else {
            return;
        };
        // Some(select_all), or None to cancel
        let mut choice: Option<Option<bool>> = None;
        egui::Window::new("Show selection?")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("Select here").clicked() {
                        choice = Some(Some(false));
                    }
                    if ui.button("Select all").clicked() {
                        choice = Some(Some(true));
                    }
                    if ui.button("Cancel").clicked() {
                        choice = Some(None);
                    }
                });
            });

        if let Some(choice) = choice {
            self.dialog = None;
            if let Some(select_all) = choice {
                if !self.document.show_armed(index, select_all) {
                    self.status_message = "Nothing to select there".to_string();
                }
            }
        }
    }
}

fn paint_block(
    painter: &egui::Painter,
    block: &TextBlock,
    origin: Pos2,
    highlight: Option<Highlight>,
    font: &FontId,
) {
    let Some(layout) = block.monospace() else {
        return;
    };
    let text = block.text();
    let cell_width = layout.cell_width();
    let line_height = layout.line_height();

    for (row, span) in layout.lines().iter().enumerate() {
        let top = origin.y + row as f32 * line_height;
        let end = span.start + span.visible;

        if let Some(highlight) = highlight {
            if let Some(range) = highlight.intersect(span.start..end) {
                let min = Pos2::new(origin.x + (range.start - span.start) as f32 * cell_width, top);
                let size = Vec2::new((range.end - range.start) as f32 * cell_width, line_height);
                painter.rect_filled(
                    Rect::from_min_size(min, size),
                    0.0,
                    theme::color32(highlight.color),
                );
            }
        }

        painter.text(
            Pos2::new(origin.x, top),
            Align2::LEFT_TOP,
            char_slice(text, span.start, end),
            font.clone(),
            theme::TEXT_COLOR,
        );
    }
}

impl eframe::App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Blocks are still where the last frame put them
        self.handle_pointer(ctx, now);
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.document.hide_selection();
        }

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            let status = if !self.status_message.is_empty() {
                self.status_message.clone()
            } else {
                match self.document.selected_text() {
                    Some(text) => format!("Selected {} chars", text.chars().count()),
                    None => "Nothing selected".to_string(),
                }
            };
            ui.label(status);
        });

        // Document
        egui::CentralPanel::default().show(ctx, |ui| {
            let output = egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .drag_to_scroll(false)
                .show(ui, |ui| self.paint_document(ui));

            self.viewport = output.inner_rect;
            if output.state.offset != self.scroll_offset {
                self.scroll_offset = output.state.offset;
                self.document.scroll_started();
            }
        });

        if let Some(long_press) = self.document.frame(now) {
            self.on_long_press(long_press);
        }
        self.paint_selection(ctx);
        self.show_dialog(ctx);

        if let Some(text) = self.clipboard.take() {
            self.status_message = format!("Copied {} chars", text.chars().count());
            ctx.output_mut(|o| o.copied_text = text);
        }

        if let Some(at) = self.document.next_wakeup() {
            ctx.request_repaint_after(at.saturating_duration_since(Instant::now()));
        }
    }
}
