use super::point::Point;
use crate::error::SelectionError;

/// Identifies one text surface (one paragraph view) across events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Line geometry of a laid-out paragraph, owned by the platform.
///
/// Offsets are `char` indices into the surface text. Coordinates are relative
/// to the top-left corner of the laid-out text. Only a single left-to-right
/// horizontal model is supported: right-to-left and bidirectional text are
/// not handled and will produce wrong handle positions.
pub trait TextLayout {
    /// Number of chars in the laid-out text
    fn text_len(&self) -> usize;

    /// Number of visual lines, at least 1
    fn line_count(&self) -> usize;

    /// Line containing `y`, clamped to the first/last line
    fn line_for_vertical(&self, y: f32) -> usize;

    /// Line containing `offset`. An offset at a soft wrap belongs to the
    /// following line; `text_len` belongs to the last line.
    fn line_for_offset(&self, offset: usize) -> usize;

    /// First offset of `line`
    fn line_start(&self, line: usize) -> usize;

    /// Offset just past `line`, equal to the next line's start
    fn line_end(&self, line: usize) -> usize;

    fn line_top(&self, line: usize) -> f32;

    fn line_bottom(&self, line: usize) -> f32;

    /// Right edge of the visible content of `line`
    fn line_right(&self, line: usize) -> f32;

    /// X position of the insertion point before `offset`
    fn primary_horizontal(&self, offset: usize) -> f32;

    /// Nearest insertion point to `x` on `line`. Never returns `line_end`
    /// except on the last line.
    fn offset_for_horizontal(&self, line: usize, x: f32) -> usize;
}

/// The hosting text surface: text, layout and screen placement
pub trait TextSurface {
    fn id(&self) -> SurfaceId;

    fn text(&self) -> &str;

    /// None until the surface has measured its text
    fn layout(&self) -> Option<&dyn TextLayout>;

    /// Top-left corner of the surface in screen coordinates
    fn screen_origin(&self) -> Point;

    /// Offset of the laid-out text inside the surface (padding)
    fn content_offset(&self) -> Point {
        Point::zero()
    }

    /// Pixels per device unit
    fn scale_factor(&self) -> f32 {
        1.0
    }

    /// Width of the screen, used to keep the toolbar on screen
    fn viewport_width(&self) -> f32;
}

/// Read-only geometry helper over one surface's current layout.
///
/// Borrowed for the duration of a single event; nothing is cached, so a
/// relayout between events is always observed.
pub struct LayoutAdapter<'a> {
    surface: &'a dyn TextSurface,
    layout: &'a dyn TextLayout,
}

impl<'a> LayoutAdapter<'a> {
    pub fn new(surface: &'a dyn TextSurface) -> Result<Self, SelectionError> {
        let layout = surface.layout().ok_or(SelectionError::LayoutUnavailable)?;
        Ok(Self { surface, layout })
    }

    pub fn surface(&self) -> &'a dyn TextSurface {
        self.surface
    }

    pub fn layout(&self) -> &'a dyn TextLayout {
        self.layout
    }

    pub fn text(&self) -> &'a str {
        self.surface.text()
    }

    pub fn text_len(&self) -> usize {
        self.layout.text_len()
    }

    pub fn line_for_offset(&self, offset: usize) -> usize {
        self.layout.line_for_offset(offset)
    }

    pub fn line_start(&self, line: usize) -> usize {
        self.layout.line_start(line)
    }

    pub fn line_top(&self, line: usize) -> f32 {
        self.layout.line_top(line)
    }

    pub fn line_bottom(&self, line: usize) -> f32 {
        self.layout.line_bottom(line)
    }

    /// Pixel advance of `offset` from the start of its own line
    pub fn horizontal_position_of(&self, offset: usize) -> f32 {
        let line = self.layout.line_for_offset(offset);
        let line_start = self.layout.line_start(line);
        self.layout.primary_horizontal(offset) - self.layout.primary_horizontal(line_start)
    }

    /// Where the laid-out text starts on screen
    pub fn screen_origin(&self) -> Point {
        self.surface.screen_origin() + self.surface.content_offset()
    }

    /// Screen coordinates to layout coordinates
    pub fn to_layout_point(&self, raw: Point) -> Point {
        raw - self.screen_origin()
    }

    /// Surface-local coordinates to layout coordinates
    pub fn local_to_layout(&self, local: Point) -> Point {
        local - self.surface.content_offset()
    }

    pub fn scale_factor(&self) -> f32 {
        self.surface.scale_factor()
    }

    pub fn viewport_width(&self) -> f32 {
        self.surface.viewport_width()
    }
}
