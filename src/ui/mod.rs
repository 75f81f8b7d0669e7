pub mod app;
pub mod renderer;
pub mod terminal;

pub use app::{terminal_options, App};
pub use renderer::{document_area, render};
pub use terminal::{init, install_panic_hook, restore, run, Tui};
