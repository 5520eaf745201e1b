//! Append-only undo log.
//!
//! Each record captures the lines a mutation touched, as they were before
//! the mutation, plus how many lines the mutation left in their place.
//! Reverting a record never needs the current buffer contents: remove
//! `replaced` lines at `first`, reinsert `saved`, put the cursor back.

use std::collections::VecDeque;

use super::Editor;
use super::host::EditorHost;
use super::selection::{EditMode, Position};

/// Kind of mutation a record reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOp {
    /// A single line was rewritten.
    Edit,
    /// Two or more lines were joined into one.
    Join,
    /// One line was split in two.
    Split,
    /// A batch indent or outdent across a range of lines.
    Indent,
}

impl UndoOp {
    /// Numeric opcode as stored in the log.
    pub const fn code(self) -> i8 {
        match self {
            Self::Edit => 0,
            Self::Join => 1,
            Self::Split => 2,
            Self::Indent => -1,
        }
    }
}

/// One reversible mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoRecord {
    cursor: Position,
    first: usize,
    saved: Vec<String>,
    replaced: usize,
    op: UndoOp,
}

/// The buffer change that reverts a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inverse {
    /// First line of the affected region.
    pub at: usize,
    /// Lines to remove starting at `at`.
    pub remove: usize,
    /// Lines to insert in their place.
    pub restore: Vec<String>,
    /// Cursor position before the mutation.
    pub cursor: Position,
}

impl UndoRecord {
    pub const fn new(
        cursor: Position,
        first: usize,
        saved: Vec<String>,
        replaced: usize,
        op: UndoOp,
    ) -> Self {
        Self {
            cursor,
            first,
            saved,
            replaced,
            op,
        }
    }

    pub const fn cursor(&self) -> Position {
        self.cursor
    }

    pub const fn first_line(&self) -> usize {
        self.first
    }

    pub fn saved(&self) -> &[String] {
        &self.saved
    }

    /// Lines the mutation left in place of `saved`.
    pub const fn replaced(&self) -> usize {
        self.replaced
    }

    pub const fn op(&self) -> UndoOp {
        self.op
    }

    /// Compute the reverting change. Pure: depends only on the record.
    pub fn inverse(&self) -> Inverse {
        Inverse {
            at: self.first,
            remove: self.replaced,
            restore: self.saved.clone(),
            cursor: self.cursor,
        }
    }
}

/// Bounded stack of [`UndoRecord`]s. The oldest record is dropped when full.
#[derive(Debug, Clone)]
pub struct UndoLog {
    records: VecDeque<UndoRecord>,
    limit: usize,
}

impl UndoLog {
    pub fn new(limit: usize) -> Self {
        Self {
            records: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    pub fn push(&mut self, record: UndoRecord) {
        if self.records.len() == self.limit {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn pop(&mut self) -> Option<UndoRecord> {
        self.records.pop_back()
    }

    pub fn last(&self) -> Option<&UndoRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl Default for UndoLog {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl<H: EditorHost> Editor<H> {
    /// Revert the most recent mutation. Returns false when there is nothing
    /// to undo.
    pub fn undo(&mut self) -> bool {
        if self.is_suspended() || self.doc.is_read_only() {
            return false;
        }
        let Some(record) = self.undo.pop() else {
            tracing::debug!(parent: &self.span, "undo log empty");
            return false;
        };
        let inverse = record.inverse();
        self.doc
            .replace_lines(inverse.at, inverse.remove, &inverse.restore);
        self.cursor.line = inverse.cursor.line.min(self.doc.line_count() - 1);
        self.cursor.set_col(inverse.cursor.col);
        self.mode = EditMode::Edit;
        tracing::debug!(
            parent: &self.span,
            op = record.op().code(),
            line = inverse.at,
            restored = inverse.restore.len(),
            "undo"
        );
        self.justify();
        self.host.post_update_lines(Some(inverse.at), None);
        true
    }

    /// Number of mutations that can currently be undone.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// The record [`Self::undo`] would revert next.
    pub fn last_undo(&self) -> Option<&UndoRecord> {
        self.undo.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(first: usize, text: &str) -> UndoRecord {
        UndoRecord::new(
            Position::new(first, 0),
            first,
            vec![text.to_string()],
            1,
            UndoOp::Edit,
        )
    }

    #[test]
    fn test_opcodes() {
        assert_eq!(UndoOp::Edit.code(), 0);
        assert_eq!(UndoOp::Join.code(), 1);
        assert_eq!(UndoOp::Split.code(), 2);
        assert_eq!(UndoOp::Indent.code(), -1);
    }

    #[test]
    fn test_inverse_of_split_removes_two_lines() {
        let rec = UndoRecord::new(
            Position::new(4, 3),
            4,
            vec!["abcdef".into()],
            2,
            UndoOp::Split,
        );
        let inv = rec.inverse();
        assert_eq!(inv.at, 4);
        assert_eq!(inv.remove, 2);
        assert_eq!(inv.restore, vec!["abcdef"]);
        assert_eq!(inv.cursor, Position::new(4, 3));
        assert_eq!(rec.inverse(), inv);
    }

    #[test]
    fn test_log_is_lifo() {
        let mut log = UndoLog::new(10);
        log.push(record(0, "a"));
        log.push(record(1, "b"));
        assert_eq!(log.pop().map(|r| r.first_line()), Some(1));
        assert_eq!(log.pop().map(|r| r.first_line()), Some(0));
        assert!(log.pop().is_none());
    }

    #[test]
    fn test_log_drops_oldest_when_full() {
        let mut log = UndoLog::new(2);
        log.push(record(0, "a"));
        log.push(record(1, "b"));
        log.push(record(2, "c"));
        assert_eq!(log.len(), 2);
        assert_eq!(log.pop().map(|r| r.first_line()), Some(2));
        assert_eq!(log.pop().map(|r| r.first_line()), Some(1));
        assert!(log.is_empty());
    }

    #[test]
    fn test_undo_on_empty_log_is_noop() {
        let mut ed = Editor::with_lines(["x"]);
        assert!(!ed.undo());
        assert_eq!(ed.lines(), vec!["x"]);
    }

    #[test]
    fn test_undo_restores_edit_and_cursor() {
        let mut ed = Editor::with_lines(["hello"]);
        ed.move_to(0, 5);
        ed.input_data("!");
        assert_eq!(ed.lines(), vec!["hello!"]);
        assert!(ed.undo());
        assert_eq!(ed.lines(), vec!["hello"]);
        assert_eq!(ed.position(), Position::new(0, 5));
    }

    #[test]
    fn test_undo_sequence_restores_original() {
        let mut ed = Editor::with_lines(["one", "two"]);
        ed.move_to(0, 3);
        ed.enter();
        ed.input_data("mid");
        ed.move_to(2, 0);
        ed.backspace();
        ed.delete_forward();
        while ed.undo() {}
        assert_eq!(ed.lines(), vec!["one", "two"]);
    }
}
