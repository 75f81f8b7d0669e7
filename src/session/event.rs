use crate::layout::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A pointer event in both reference frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Relative to the surface's top-left corner
    pub local: Point,
    /// Screen coordinates
    pub raw: Point,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, local: Point, raw: Point) -> Self {
        Self { kind, local, raw }
    }

    /// Build from screen coordinates and the surface's screen origin
    pub fn at(kind: PointerKind, raw: Point, surface_origin: Point) -> Self {
        Self::new(kind, raw - surface_origin, raw)
    }
}
