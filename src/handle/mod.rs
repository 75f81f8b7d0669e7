pub mod controller;
pub mod pair;

pub use controller::{DragAnchor, DragState, DragUpdate, HandleController, HandleView, Side};
pub use pair::HandlePair;
