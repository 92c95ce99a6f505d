//! Input handling module

pub mod source;
pub mod text_detect;

pub use source::InputSource;
pub use text_detect::{ensure_text, looks_like_text};
