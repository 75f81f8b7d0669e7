pub mod highlight;
pub mod range;

pub use highlight::Highlight;
pub use range::{char_slice, SelectListener, SelectionRange};
