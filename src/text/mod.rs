//! Display-column text primitives.
//!
//! Everything in the editor is addressed by *display column* (terminal
//! cells), not by byte or char offset. [`width`] converts between the two and
//! performs column-indexed slicing; [`wrap`] splits a logical line into
//! screen-width chunks.

pub mod width;
pub mod wrap;

pub use width::{FILLER, column_splice, column_substring, display_width};
pub use wrap::{LineTokenizer, wrap_line};
