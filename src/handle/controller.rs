use crate::layout::{LayoutAdapter, Point, Rect};
use crate::options::{Color, SelectionOptions};
use crate::resolver::OffsetResolver;
use crate::selection::SelectionRange;

/// Which selection boundary a handle marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Captured when a drag starts.
///
/// The selection snapshot is the pivot for crossing: comparing against the
/// drag-start boundary rather than the live one keeps a fast swipe through
/// the other handle deterministic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragAnchor {
    /// Raw pointer position at drag start
    pub pointer_start: Point,
    /// Pointer minus the boundary's text point at drag start
    pub grab_delta: Point,
    pub before_start: usize,
    pub before_end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging(DragAnchor),
}

/// Outcome of one pointer move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragUpdate {
    /// Not dragging, or the pointer still resolves to the same offset
    Unchanged,
    Moved,
    /// The handles exchanged sides
    Swapped,
}

/// What a binding needs to draw one handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleView {
    pub side: Side,
    /// Full touch box in screen coordinates
    pub bounds: Rect,
    pub center: Point,
    pub radius: f32,
    /// Square joining the circle to the text, its top corner on the boundary
    pub notch: Rect,
    pub color: Color,
}

/// One draggable selection boundary
#[derive(Debug, Clone)]
pub struct HandleController {
    side: Side,
    anchor_offset: usize,
    drag: DragState,
    bounds: Option<Rect>,
    radius: f32,
    color: Color,
    size: f32,
    padding: f32,
}

impl HandleController {
    pub fn new(side: Side, options: &SelectionOptions) -> Self {
        Self {
            side,
            anchor_offset: 0,
            drag: DragState::Idle,
            bounds: None,
            radius: options.handle_size / 2.0,
            color: options.handle_color,
            size: options.handle_size,
            padding: options.handle_padding,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn anchor_offset(&self) -> usize {
        self.anchor_offset
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging(_))
    }

    pub fn is_showing(&self) -> bool {
        self.bounds.is_some()
    }

    /// Drawing info, `None` while dismissed
    pub fn view(&self) -> Option<HandleView> {
        let bounds = self.bounds?;
        let r = self.radius;
        let center = Point::new(bounds.origin.x + r + self.padding, bounds.origin.y + r);
        let notch_x = match self.side {
            Side::Left => bounds.origin.x + r + self.padding,
            Side::Right => bounds.origin.x + self.padding,
        };
        Some(HandleView {
            side: self.side,
            bounds,
            center,
            radius: r,
            notch: Rect::new(Point::new(notch_x, bounds.origin.y), r, r),
            color: self.color,
        })
    }

    fn boundary(&self, range: &SelectionRange) -> usize {
        match self.side {
            Side::Left => range.start(),
            Side::Right => range.end(),
        }
    }

    /// Place the handle under its boundary and make it visible
    pub fn show(&mut self, adapter: &LayoutAdapter<'_>, range: &SelectionRange) {
        let offset = self.boundary(range);
        self.anchor_offset = offset;

        self.radius = self.size * adapter.scale_factor() / 2.0;
        let width = self.radius * 2.0 + self.padding * 2.0;
        let height = self.radius * 2.0 + self.padding / 2.0;

        let origin = adapter.screen_origin();
        let x = origin.x + adapter.horizontal_position_of(offset);
        let y = origin.y + adapter.line_bottom(adapter.line_for_offset(offset));
        let left = match self.side {
            Side::Left => x - self.radius * 2.0 - self.padding,
            Side::Right => x - self.padding,
        };
        self.bounds = Some(Rect::new(Point::new(left, y), width, height));
    }

    pub fn dismiss(&mut self) {
        self.bounds = None;
        self.drag = DragState::Idle;
    }

    pub fn hit_test(&self, raw: Point) -> bool {
        self.bounds.is_some_and(|bounds| bounds.contains(raw))
    }

    /// Screen point of this handle's boundary, vertically centered on its line
    fn text_point(&self, adapter: &LayoutAdapter<'_>) -> Point {
        let line = adapter.line_for_offset(self.anchor_offset);
        let y = (adapter.line_top(line) + adapter.line_bottom(line)) / 2.0;
        adapter.screen_origin() + Point::new(adapter.horizontal_position_of(self.anchor_offset), y)
    }

    pub fn begin_drag(&mut self, adapter: &LayoutAdapter<'_>, raw: Point, range: &SelectionRange) {
        self.anchor_offset = self.boundary(range);
        self.drag = DragState::Dragging(DragAnchor {
            pointer_start: raw,
            grab_delta: raw - self.text_point(adapter),
            before_start: range.start(),
            before_end: range.end(),
        });
        tracing::trace!(side = ?self.side, offset = self.anchor_offset, "handle drag started");
    }

    /// Back to idle; true if a drag was in progress
    pub fn end_drag(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.drag = DragState::Idle;
        was_dragging
    }

    fn flip(&mut self) {
        self.side = self.side.opposite();
    }

    /// Follow the pointer to `raw`, updating `range` and swapping sides with
    /// `opposite` when this handle crosses the other boundary
    pub fn drag_to(
        &mut self,
        opposite: &mut HandleController,
        adapter: &LayoutAdapter<'_>,
        resolver: &OffsetResolver,
        range: &mut SelectionRange,
        raw: Point,
    ) -> DragUpdate {
        let DragState::Dragging(mut anchor) = self.drag else {
            return DragUpdate::Unchanged;
        };

        let target = adapter.to_layout_point(raw - anchor.grab_delta);
        let previous = self.boundary(range);
        let offset = resolver.hysteresis_offset(adapter.layout(), target.x, target.y, previous);
        if offset == previous {
            return DragUpdate::Unchanged;
        }

        range.reset();
        let text = adapter.text();
        let swapped = match self.side {
            Side::Left if offset > anchor.before_end => {
                self.flip();
                opposite.flip();
                anchor.before_start = anchor.before_end;
                range.set(text, Some(anchor.before_end), Some(offset));
                true
            }
            Side::Left => {
                range.set(text, Some(offset), None);
                false
            }
            Side::Right if offset < anchor.before_start => {
                opposite.flip();
                self.flip();
                anchor.before_end = anchor.before_start;
                range.set(text, Some(offset), Some(anchor.before_start));
                true
            }
            Side::Right => {
                range.set(text, None, Some(offset));
                false
            }
        };
        self.drag = DragState::Dragging(anchor);

        self.show(adapter, range);
        if swapped {
            opposite.show(adapter, range);
            tracing::debug!(side = ?self.side, offset, "handles crossed, sides swapped");
            DragUpdate::Swapped
        } else {
            tracing::trace!(side = ?self.side, offset, "handle moved");
            DragUpdate::Moved
        }
    }
}
