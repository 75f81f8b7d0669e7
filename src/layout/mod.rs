pub mod adapter;
pub mod block;
pub mod monospace;
pub mod point;

pub use adapter::{LayoutAdapter, SurfaceId, TextLayout, TextSurface};
pub use block::TextBlock;
pub use monospace::{LineSpan, MonospaceLayout};
pub use point::{Point, Rect};
