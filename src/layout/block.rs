use super::adapter::{SurfaceId, TextLayout, TextSurface};
use super::monospace::MonospaceLayout;
use super::point::Point;

/// A read-only paragraph placed on screen, laid out in fixed cells.
///
/// The surface type both bundled bindings use.
#[derive(Debug, Clone)]
pub struct TextBlock {
    id: SurfaceId,
    text: String,
    layout: Option<MonospaceLayout>,
    origin: Point,
    padding: Point,
    scale: f32,
    viewport_width: f32,
}

impl TextBlock {
    /// Create an unmeasured block; call [`measure`](Self::measure) before use
    pub fn new(id: SurfaceId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            layout: None,
            origin: Point::zero(),
            padding: Point::zero(),
            scale: 1.0,
            viewport_width: f32::MAX,
        }
    }

    /// Lay out for `wrap_columns` with the given cell metrics
    pub fn measure(&mut self, wrap_columns: usize, cell_width: f32, line_height: f32) {
        match self.layout.as_mut() {
            Some(layout)
                if layout.cell_width() == cell_width && layout.line_height() == line_height =>
            {
                layout.set_wrap_columns(&self.text, Some(wrap_columns));
            }
            _ => {
                self.layout = Some(MonospaceLayout::new(
                    &self.text,
                    Some(wrap_columns),
                    cell_width,
                    line_height,
                ));
            }
        }
    }

    pub fn monospace(&self) -> Option<&MonospaceLayout> {
        self.layout.as_ref()
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    pub fn set_padding(&mut self, padding: Point) {
        self.padding = padding;
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
    }

    /// Height including padding, zero until measured
    pub fn height(&self) -> f32 {
        self.layout
            .as_ref()
            .map_or(0.0, |layout| layout.height() + self.padding.y * 2.0)
    }
}

impl TextSurface for TextBlock {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn layout(&self) -> Option<&dyn TextLayout> {
        self.layout.as_ref().map(|layout| layout as &dyn TextLayout)
    }

    fn screen_origin(&self) -> Point {
        self.origin
    }

    fn content_offset(&self) -> Point {
        self.padding
    }

    fn scale_factor(&self) -> f32 {
        self.scale
    }

    fn viewport_width(&self) -> f32 {
        self.viewport_width
    }
}
