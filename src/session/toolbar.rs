use crate::layout::{LayoutAdapter, Point, Rect};
use crate::options::SelectionOptions;
use crate::selection::SelectionRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarAction {
    Copy,
    SelectAll,
}

impl ToolbarAction {
    /// Button order, left to right
    pub const ALL: [ToolbarAction; 2] = [ToolbarAction::Copy, ToolbarAction::SelectAll];

    pub fn label(self) -> &'static str {
        match self {
            ToolbarAction::Copy => "Copy",
            ToolbarAction::SelectAll => "Select all",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolbarView {
    pub bounds: Rect,
    pub buttons: [(ToolbarAction, Rect); 2],
}

/// Floating copy / select-all bar above the selection start
#[derive(Debug, Clone)]
pub struct Toolbar {
    button_size: [f32; 2],
    margin: f32,
    bounds: Option<Rect>,
}

impl Toolbar {
    pub fn new(options: &SelectionOptions) -> Self {
        Self {
            button_size: options.toolbar_button_size,
            margin: options.toolbar_margin,
            bounds: None,
        }
    }

    pub fn width(&self) -> f32 {
        self.button_size[0] * ToolbarAction::ALL.len() as f32
    }

    pub fn height(&self) -> f32 {
        self.button_size[1]
    }

    pub fn is_showing(&self) -> bool {
        self.bounds.is_some()
    }

    /// Place above the line of the selection start, kept on screen
    pub fn show(&mut self, adapter: &LayoutAdapter<'_>, range: &SelectionRange) {
        let start = range.start();
        let line = adapter.line_for_offset(start);
        let origin = adapter.screen_origin();

        let mut x = origin.x + adapter.horizontal_position_of(start);
        let mut y = origin.y + adapter.line_top(line) - self.height() - self.margin;
        if x <= 0.0 {
            x = self.margin;
        }
        if y < 0.0 {
            y = self.margin;
        }
        let screen_width = adapter.viewport_width();
        if x + self.width() > screen_width {
            x = screen_width - self.width() - self.margin;
        }

        self.bounds = Some(Rect::new(Point::new(x, y), self.width(), self.height()));
    }

    pub fn dismiss(&mut self) {
        self.bounds = None;
    }

    pub fn view(&self) -> Option<ToolbarView> {
        let bounds = self.bounds?;
        let [width, height] = self.button_size;
        let button = |index: usize| {
            let origin = Point::new(bounds.origin.x + width * index as f32, bounds.origin.y);
            (ToolbarAction::ALL[index], Rect::new(origin, width, height))
        };
        Some(ToolbarView {
            bounds,
            buttons: [button(0), button(1)],
        })
    }

    pub fn hit_test(&self, raw: Point) -> Option<ToolbarAction> {
        let view = self.view()?;
        view.buttons
            .iter()
            .find(|(_, rect)| rect.contains(raw))
            .map(|(action, _)| *action)
    }
}
