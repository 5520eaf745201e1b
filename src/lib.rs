// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorHost)
    clippy::module_name_repetitions
)]

//! # Panedit
//!
//! A line-oriented text editing engine for terminal UIs.
//!
//! Panedit keeps a document as a list of logical lines and edits it in
//! display columns, so double-width glyphs and expanded tabs behave as
//! single units:
//! - Column-aware width primitives and soft wrapping
//! - A viewport that keeps the cursor's whole wrapped line on screen
//! - Cursor navigation, editing, selection, clipboard and search
//! - A bounded undo log with pure inverses
//! - Safe load/save (temporary file, rename, optional backup)
//!
//! ## Architecture
//!
//! The engine never draws. A host implements [`editor::EditorHost`] to be
//! told when lines change and to show prompts; input arrives as
//! [`editor::Command`] values applied with [`editor::Editor::apply`].
//!
//! ## Modules
//!
//! - [`text`]: Display-width primitives and the line-wrap tokenizer
//! - [`document`]: Rope-backed line buffer, encodings, file I/O
//! - [`ui`]: Viewport and scroll justification
//! - [`editor`]: Cursor, edit operations, undo, selection, host hooks
//! - [`config`]: Flag-file configuration

pub mod config;
pub mod document;
pub mod editor;
pub mod text;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::document::{Document, DocumentError};
    pub use crate::editor::{Command, Editor, EditorHost, EditorSettings, Position};
    pub use crate::ui::viewport::Viewport;
}
