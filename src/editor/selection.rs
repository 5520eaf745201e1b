use super::Editor;
use super::host::EditorHost;
use super::undo::{UndoOp, UndoRecord};
use crate::text::width::{byte_at_column, column_splice, column_tail, display_width};

/// A `(line, display column)` point in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Anchor and active point of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub anchor: Position,
    pub active: Position,
}

impl SelectionRange {
    /// An empty selection at `pos`.
    pub const fn at(pos: Position) -> Self {
        Self {
            anchor: pos,
            active: pos,
        }
    }

    /// The same range with anchor and active point in document order.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.active < self.anchor {
            Self {
                anchor: self.active,
                active: self.anchor,
            }
        } else {
            self
        }
    }

    /// First and last logical line covered.
    pub fn line_span(self) -> (usize, usize) {
        let sorted = self.normalized();
        (sorted.anchor.line, sorted.active.line)
    }

    /// Left and right column bounds of a block selection.
    pub fn column_span(self) -> (usize, usize) {
        let (a, b) = (self.anchor.col, self.active.col);
        (a.min(b), a.max(b))
    }
}

/// The editing state machine.
///
/// Selection ranges only exist in the selecting variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Plain editing, no selection.
    #[default]
    Edit,
    /// Stream selection toggled on explicitly.
    StreamSelect(SelectionRange),
    /// Rectangular selection toggled on explicitly.
    BlockSelect(SelectionRange),
    /// Stream selection held by shift-modified navigation.
    ShiftSelect(SelectionRange),
}

impl EditMode {
    pub const fn is_edit(&self) -> bool {
        matches!(self, Self::Edit)
    }

    pub const fn is_block(&self) -> bool {
        matches!(self, Self::BlockSelect(_))
    }

    /// The selection, if any.
    pub const fn range(&self) -> Option<SelectionRange> {
        match self {
            Self::Edit => None,
            Self::StreamSelect(range) | Self::BlockSelect(range) | Self::ShiftSelect(range) => {
                Some(*range)
            }
        }
    }

    /// Move the active endpoint.
    pub(crate) const fn set_active(&mut self, pos: Position) {
        match self {
            Self::Edit => {}
            Self::StreamSelect(range) | Self::BlockSelect(range) | Self::ShiftSelect(range) => {
                range.active = pos;
            }
        }
    }
}

impl<H: EditorHost> Editor<H> {
    /// Current edit mode and selection.
    pub const fn mode(&self) -> EditMode {
        self.mode
    }

    /// Toggle stream selection anchored at the cursor.
    pub fn toggle_select(&mut self) {
        if self.is_suspended() {
            return;
        }
        self.mode = match self.mode {
            EditMode::StreamSelect(_) => EditMode::Edit,
            _ => EditMode::StreamSelect(SelectionRange::at(self.position())),
        };
        self.host.post_update_lines(None, None);
    }

    /// Toggle block selection anchored at the cursor.
    pub fn toggle_block_select(&mut self) {
        if self.is_suspended() {
            return;
        }
        self.mode = match self.mode {
            EditMode::BlockSelect(_) => EditMode::Edit,
            _ => EditMode::BlockSelect(SelectionRange::at(self.position())),
        };
        self.host.post_update_lines(None, None);
    }

    /// Select the whole document and put the cursor at its end.
    pub fn select_all(&mut self) {
        if self.is_suspended() {
            return;
        }
        let last = self.doc.line_count() - 1;
        let end = Position::new(last, self.doc.line_width(last));
        self.mode = EditMode::StreamSelect(SelectionRange {
            anchor: Position::default(),
            active: end,
        });
        self.cursor.line = end.line;
        self.cursor.set_col(end.col);
        self.justify();
        self.host.post_update_lines(None, None);
    }

    /// Drop any selection.
    pub fn escape(&mut self) {
        if !self.mode.is_edit() {
            self.mode = EditMode::Edit;
            self.host.post_update_lines(None, None);
        }
    }

    /// Text covered by the selection, one entry per line.
    pub fn selected_lines(&self) -> Vec<String> {
        let Some(range) = self.mode.range() else {
            return Vec::new();
        };
        let (first, last) = range.line_span();
        if self.mode.is_block() {
            let (left, right) = range.column_span();
            return self
                .doc
                .lines_in(first..last + 1)
                .iter()
                .map(|line| crate::text::column_substring(line, left, right - left).to_string())
                .collect();
        }

        let sorted = range.normalized();
        let lines = self.doc.lines_in(first..last + 1);
        let count = lines.len();
        lines
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                let from = if idx == 0 { byte_at_column(line, sorted.anchor.col) } else { 0 };
                let to = if idx + 1 == count {
                    byte_at_column(line, sorted.active.col)
                } else {
                    line.len()
                };
                line[from..to.max(from)].to_string()
            })
            .collect()
    }

    /// Remove the selected text and return to [`EditMode::Edit`].
    ///
    /// Returns false when there was no selection.
    pub(crate) fn delete_selection(&mut self) -> bool {
        let Some(range) = self.mode.range() else {
            return false;
        };
        let (first, last) = range.line_span();
        let empty = if self.mode.is_block() {
            let (left, right) = range.column_span();
            left == right
        } else {
            range.anchor == range.active
        };
        if empty {
            self.mode = EditMode::Edit;
            self.host.post_update_lines(None, None);
            return true;
        }
        let saved = self.doc.lines_in(first..last + 1);
        let before = self.position();

        if self.mode.is_block() {
            let (left, right) = range.column_span();
            let cut: Vec<String> = saved
                .iter()
                .map(|line| column_splice(line, left, right - left))
                .collect();
            self.undo
                .push(UndoRecord::new(before, first, saved, cut.len(), UndoOp::Edit));
            self.doc.replace_lines(first, cut.len(), &cut);
            self.cursor.line = first;
            self.cursor.set_col(left);
        } else {
            let sorted = range.normalized();
            let head_line = &saved[0];
            let head = &head_line[..byte_at_column(head_line, sorted.anchor.col)];
            let tail = column_tail(&saved[saved.len() - 1], sorted.active.col);
            let joined = format!("{head}{tail}");
            let head_width = display_width(head);
            let op = if saved.len() > 1 { UndoOp::Join } else { UndoOp::Edit };
            let removed = saved.len();
            self.undo.push(UndoRecord::new(before, first, saved, 1, op));
            self.doc.replace_lines(first, removed, &[joined]);
            self.cursor.line = first;
            self.cursor.set_col(head_width);
        }

        tracing::debug!(parent: &self.span, first, last, "selection deleted");
        self.mode = EditMode::Edit;
        self.host.post_update_lines(Some(first), None);
        true
    }
}
