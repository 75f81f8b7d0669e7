pub mod clipboard;
pub mod document;
pub mod error;
pub mod gui;
pub mod handle;
pub mod layout;
pub mod options;
pub mod resolver;
pub mod selection;
pub mod session;
pub mod ui;

// Re-export commonly used types
pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard};
pub use document::{Document, Entry, LongPress};
pub use error::{ConfigError, SelectionError};
pub use handle::{DragUpdate, HandleController, HandlePair, HandleView, Side};
pub use layout::{
    LayoutAdapter, MonospaceLayout, Point, Rect, SurfaceId, TextBlock, TextLayout, TextSurface,
};
pub use options::{Color, SelectionOptions};
pub use resolver::OffsetResolver;
pub use selection::{Highlight, SelectListener, SelectionRange};
pub use session::{
    PointerEvent, PointerKind, SelectionHost, SelectionSession, ToolbarAction, ToolbarView,
    Visibility,
};
