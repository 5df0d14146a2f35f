pub mod core;
pub mod source;

// Re-export the main types for convenience
pub use core::Language;
pub use source::{shuffle, FixedSource, ShuffledSource, WordSource};
