pub mod offset;

pub use offset::OffsetResolver;
