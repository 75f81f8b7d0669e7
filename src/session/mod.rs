pub mod event;
pub mod host;
pub mod registry;
#[allow(clippy::module_inception)]
pub mod session;
pub mod timer;
pub mod toolbar;

pub use event::{PointerEvent, PointerKind};
pub use host::SelectionHost;
pub use registry::ActiveSlot;
pub use session::{SelectionSession, Visibility};
pub use timer::ReshowTimer;
pub use toolbar::{Toolbar, ToolbarAction, ToolbarView};
