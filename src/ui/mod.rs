//! Screen-facing state.
//!
//! - [`viewport`]: Which wrapped rows of the document are visible

pub mod viewport;

pub use viewport::{ScrollTuning, ViewLine, Viewport};
