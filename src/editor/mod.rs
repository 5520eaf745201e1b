//! Line-oriented text editing engine.
//!
//! [`Editor`] owns the document, cursor, viewport, undo log and selection
//! state, and reports back to an [`EditorHost`]. Every public operation
//! follows the same shape: check gating (read-only, pending prompt), mutate,
//! record undo, re-justify the viewport, notify the host.

mod clipboard;
mod command;
mod cursor;
mod edit;
pub mod host;
mod search;
mod selection;
mod undo;

use std::path::{Path, PathBuf};

use tracing::Span;

use crate::document::{Document, DocumentError, Encoding, SaveOptions};
use crate::text::width::snap_column;
use crate::ui::viewport::{ScrollTuning, ViewLine, Viewport};

pub use clipboard::Clipboard;
pub use command::{Command, ParseCommandError};
pub use cursor::{Cursor, Motion};
pub use host::{EditorHost, NullHost, PromptKind};
pub use search::SearchState;
pub use selection::{EditMode, Position, SelectionRange};
pub use undo::{Inverse, UndoLog, UndoOp, UndoRecord};

/// Resolved editor options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorSettings {
    /// Fillers per tab on load, and per indent level in batch indent.
    pub tab_size: usize,
    /// Fillers inserted by the Tab key.
    pub tab_stop: usize,
    /// Keep `<file>.back` on save.
    pub backup: bool,
    /// Show the line-number gutter.
    pub line_numbers: bool,
    /// Open documents read-only.
    pub read_only: bool,
    /// Copy the previous line's indentation on Enter.
    pub indent_mode: bool,
    /// Contract leading fillers back into tabs on save.
    pub restore_tabs: bool,
    /// Encoding for loads and new files.
    pub encoding: Encoding,
    pub scroll: ScrollTuning,
    /// Maximum undo records kept.
    pub undo_limit: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            tab_size: 8,
            tab_stop: 4,
            backup: false,
            line_numbers: false,
            read_only: false,
            indent_mode: false,
            restore_tabs: false,
            encoding: Encoding::Utf8,
            scroll: ScrollTuning::default(),
            undo_limit: 1000,
        }
    }
}

/// An editing session over one document.
pub struct Editor<H = NullHost> {
    doc: Document,
    cursor: Cursor,
    viewport: Viewport,
    mode: EditMode,
    undo: UndoLog,
    clipboard: Clipboard,
    search: SearchState,
    settings: EditorSettings,
    insert: bool,
    indent: bool,
    line_numbers: bool,
    pending: Option<PromptKind>,
    title: String,
    host: H,
    span: Span,
}

impl Editor<NullHost> {
    /// A host-less editor over the given lines, mostly for tests and tools.
    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut editor = Self::new(NullHost, EditorSettings::default());
        editor.load_lines(lines);
        editor
    }
}

impl<H: EditorHost> Editor<H> {
    /// Create an editor over an empty document with an 80x24 viewport.
    pub fn new(host: H, settings: EditorSettings) -> Self {
        let mut doc = Document::new();
        doc.set_encoding(settings.encoding);
        Self {
            doc,
            cursor: Cursor::new(),
            viewport: Viewport::new(80, 24).with_tuning(settings.scroll),
            mode: EditMode::Edit,
            undo: UndoLog::new(settings.undo_limit),
            clipboard: Clipboard::default(),
            search: SearchState::default(),
            insert: true,
            indent: settings.indent_mode,
            line_numbers: settings.line_numbers,
            pending: None,
            title: String::new(),
            host,
            span: tracing::info_span!("editor"),
            settings,
        }
    }

    /// Attach diagnostics to `span` instead of the default `editor` span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Set the viewport size in cells.
    #[must_use]
    pub fn with_size(mut self, width: u16, height: u16) -> Self {
        self.resize(width, height);
        self
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport.resize(width, height);
        self.justify();
        self.host.post_update_lines(None, None);
    }

    // --- Accessors ---

    pub const fn document(&self) -> &Document {
        &self.doc
    }

    pub fn lines(&self) -> Vec<String> {
        self.doc.lines()
    }

    pub fn line_count(&self) -> usize {
        self.doc.line_count()
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Cursor as a [`Position`].
    pub const fn position(&self) -> Position {
        Position::new(self.cursor.line, self.cursor.col)
    }

    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Screen rows of the current viewport.
    pub fn rows(&self) -> &[ViewLine] {
        self.viewport.rows()
    }

    pub const fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub const fn host(&self) -> &H {
        &self.host
    }

    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub const fn span(&self) -> &Span {
        &self.span
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.host.post_update_lines(None, None);
    }

    /// Insert (true) or overwrite (false) typing.
    pub const fn is_insert(&self) -> bool {
        self.insert
    }

    pub const fn is_indent_mode(&self) -> bool {
        self.indent
    }

    pub const fn shows_line_numbers(&self) -> bool {
        self.line_numbers
    }

    pub const fn is_dirty(&self) -> bool {
        self.doc.is_dirty()
    }

    pub const fn is_read_only(&self) -> bool {
        self.doc.is_read_only()
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.doc.set_read_only(read_only);
        self.host.post_update_lines(None, None);
    }

    /// True while an input prompt is outstanding; every command except
    /// [`Self::resolve_prompt`] is ignored until it is answered.
    pub const fn is_suspended(&self) -> bool {
        self.pending.is_some()
    }

    pub const fn pending_prompt(&self) -> Option<PromptKind> {
        self.pending
    }

    // --- Toggles ---

    pub fn toggle_insert(&mut self) {
        if self.is_suspended() {
            return;
        }
        self.insert = !self.insert;
        self.host.post_update_lines(None, None);
    }

    pub fn toggle_indent(&mut self) {
        if self.is_suspended() {
            return;
        }
        self.indent = !self.indent;
        self.host.post_update_lines(None, None);
    }

    pub fn toggle_line_numbers(&mut self) {
        if self.is_suspended() {
            return;
        }
        self.line_numbers = !self.line_numbers;
        self.justify();
        self.host.post_update_lines(None, None);
    }

    // --- Files ---

    /// Replace the document with an empty one and reset all session state.
    pub fn new_file(&mut self, path: Option<PathBuf>) {
        let mut doc = Document::new();
        doc.set_encoding(self.settings.encoding);
        doc.set_path(path);
        self.reset_with(doc);
        self.host.post_update_lines(None, None);
    }

    /// Replace the document with `lines`, keeping the current path.
    pub fn load_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut doc = Document::from_lines(lines);
        doc.set_encoding(self.doc.encoding());
        doc.set_path(self.doc.path().map(Path::to_path_buf));
        doc.set_read_only(self.settings.read_only);
        self.reset_with(doc);
        self.host.post_load();
    }

    /// Load `path`, expanding tabs and detecting line endings.
    ///
    /// On failure the editor is left holding an empty document for `path`.
    ///
    /// # Errors
    /// [`DocumentError::NoPath`] for an empty path, [`DocumentError::Read`]
    /// when the file cannot be read.
    pub fn load(&mut self, path: &Path, read_only: bool) -> Result<(), DocumentError> {
        if path.as_os_str().is_empty() {
            tracing::error!(parent: &self.span, "load requested without a file name");
            return Err(DocumentError::NoPath);
        }
        self.new_file(Some(path.to_path_buf()));

        let mut doc = Document::load(path, self.settings.tab_size, self.settings.encoding)
            .inspect_err(|err| {
                tracing::error!(parent: &self.span, error = %err, "load failed");
            })?;
        doc.set_read_only(read_only || self.settings.read_only);
        tracing::info!(
            parent: &self.span,
            path = %path.display(),
            lines = doc.line_count(),
            read_only = doc.is_read_only(),
            "loaded"
        );
        self.reset_with(doc);
        self.host.post_load();
        Ok(())
    }

    /// Save to `path`, or to the document's own path when `None`.
    ///
    /// Saving under a new name adopts that name for later saves.
    ///
    /// # Errors
    /// [`DocumentError::NoPath`] when there is nowhere to save, otherwise
    /// the write or rename failure.
    pub fn save(&mut self, path: Option<&Path>) -> Result<(), DocumentError> {
        let Some(target) = path
            .map(Path::to_path_buf)
            .or_else(|| self.doc.path().map(Path::to_path_buf))
        else {
            tracing::error!(parent: &self.span, "save requested without a file name");
            return Err(DocumentError::NoPath);
        };

        let options = SaveOptions {
            backup: self.settings.backup,
            restore_tabs: self.settings.restore_tabs.then_some(self.settings.tab_size),
        };
        self.doc.save_to(&target, options).inspect_err(|err| {
            tracing::error!(parent: &self.span, error = %err, "save failed");
        })?;
        tracing::info!(parent: &self.span, path = %target.display(), "saved");
        self.doc.set_path(Some(target));
        self.host.post_update_lines(None, None);
        Ok(())
    }

    // --- Prompts ---

    /// Answer the outstanding prompt. `None` means the user cancelled.
    pub fn resolve_prompt(&mut self, answer: Option<&str>) {
        let Some(kind) = self.pending.take() else {
            tracing::debug!(parent: &self.span, "no prompt pending");
            return;
        };
        tracing::debug!(parent: &self.span, ?kind, cancelled = answer.is_none(), "prompt resolved");
        match kind {
            PromptKind::GotoLine => self.finish_goto_line(answer),
            PromptKind::Find => self.finish_find(answer),
        }
    }

    fn request_prompt(&mut self, kind: PromptKind) {
        if self.is_suspended() {
            return;
        }
        self.pending = Some(kind);
        self.host.input_box(kind, kind.title(), kind.text());
    }

    // --- Internals ---

    fn reset_with(&mut self, doc: Document) {
        self.doc = doc;
        self.cursor = Cursor::new();
        self.mode = EditMode::Edit;
        self.undo.clear();
        self.search = SearchState::default();
        self.pending = None;
        self.insert = true;
        self.viewport.go_to_top();
        self.justify();
    }

    /// Whether buffer mutations are currently allowed.
    fn can_edit(&self) -> bool {
        if self.is_suspended() {
            return false;
        }
        if self.doc.is_read_only() {
            tracing::debug!(parent: &self.span, "edit refused, document is read-only");
            return false;
        }
        true
    }

    /// Re-justify the viewport around the cursor and keep the cursor column
    /// on a glyph boundary of its line.
    fn justify(&mut self) {
        let gutter = if self.line_numbers {
            u16::try_from(gutter_width(self.doc.line_count())).unwrap_or(u16::MAX)
        } else {
            0
        };
        self.viewport.set_gutter(gutter);
        self.cursor.line = self.viewport.justify(&self.doc, self.cursor.line);
        let line = self.doc.line(self.cursor.line);
        self.cursor.col = snap_column(&line, self.cursor.col);
    }

    fn finish_edit(&mut self, line: usize, count: Option<usize>) {
        self.justify();
        self.host.post_update_lines(Some(line), count);
    }
}

/// Digits needed for the largest line number plus one separator cell.
fn gutter_width(line_count: usize) -> usize {
    line_count.max(1).to_string().len() + 1
}
