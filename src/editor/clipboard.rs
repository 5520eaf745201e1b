use super::Editor;
use super::host::EditorHost;
use super::selection::EditMode;
use super::undo::{UndoOp, UndoRecord};
use crate::text::width::{FILLER, byte_at_column, column_insert, display_width};

/// Internal cut buffer. Block copies paste as a rectangle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clipboard {
    lines: Vec<String>,
    block: bool,
}

impl Clipboard {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub const fn is_block(&self) -> bool {
        self.block
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<H: EditorHost> Editor<H> {
    pub const fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Copy the selection into the clipboard. The selection stays active.
    pub fn copy(&mut self) {
        if self.is_suspended() || self.mode.is_edit() {
            return;
        }
        self.clipboard = Clipboard {
            lines: self.selected_lines(),
            block: self.mode.is_block(),
        };
        tracing::debug!(parent: &self.span, lines = self.clipboard.lines.len(), "copied");
    }

    /// Copy, then delete the selection.
    pub fn cut(&mut self) {
        if !self.can_edit() || self.mode.is_edit() {
            return;
        }
        self.copy();
        self.delete_selection();
        self.justify();
    }

    /// Insert the clipboard at the cursor, replacing any selection.
    pub fn paste(&mut self) {
        if !self.can_edit() || self.clipboard.is_empty() {
            return;
        }
        if !self.mode.is_edit() {
            self.delete_selection();
        }
        let lines = self.clipboard.lines.clone();
        if self.clipboard.block {
            self.paste_block(&lines);
        } else {
            self.paste_stream(&lines);
        }
        self.mode = EditMode::Edit;
    }

    fn paste_stream(&mut self, lines: &[String]) {
        let (line, col) = (self.cursor.line, self.cursor.col);
        let current = self.doc.line(line);
        let at = byte_at_column(&current, col);
        let (head, tail) = current.split_at(at);

        let count = lines.len();
        let mut pasted: Vec<String> = lines.to_vec();
        let end_col = if count == 1 {
            display_width(head) + display_width(&lines[0])
        } else {
            display_width(&lines[count - 1])
        };
        pasted[0] = format!("{head}{}", lines[0]);
        pasted[count - 1].push_str(tail);

        let op = if count > 1 { UndoOp::Split } else { UndoOp::Edit };
        self.undo.push(UndoRecord::new(
            self.position(),
            line,
            vec![current.clone()],
            count,
            op,
        ));
        self.doc.replace_lines(line, 1, &pasted);
        self.cursor.line = line + count - 1;
        self.cursor.set_col(end_col);
        self.finish_edit(line, Some(count));
    }

    fn paste_block(&mut self, lines: &[String]) {
        let (line, col) = (self.cursor.line, self.cursor.col);
        let count = lines.len();
        let existing = self.doc.line_count().min(line + count) - line;
        let saved = self.doc.lines_in(line..line + existing);

        let pasted: Vec<String> = lines
            .iter()
            .enumerate()
            .map(|(idx, piece)| {
                let mut target = saved.get(idx).cloned().unwrap_or_default();
                let width = display_width(&target);
                if width < col {
                    target.extend(std::iter::repeat_n(FILLER, col - width));
                }
                column_insert(&target, col, piece)
            })
            .collect();

        self.undo
            .push(UndoRecord::new(self.position(), line, saved, count, UndoOp::Edit));
        self.doc.replace_lines(line, existing, &pasted);
        self.cursor
            .set_col(col + lines.first().map_or(0, |piece| display_width(piece)));
        self.finish_edit(line, Some(count));
    }
}

#[cfg(test)]
mod tests {
    use crate::editor::{Editor, Motion, Position};

    #[test]
    fn test_copy_requires_selection() {
        let mut ed = Editor::with_lines(["abc"]);
        ed.copy();
        assert!(ed.clipboard().is_empty());
    }

    #[test]
    fn test_cut_and_paste_stream_single_line() {
        let mut ed = Editor::with_lines(["hello world"]);
        ed.select_to(Motion::Right);
        ed.select_to(Motion::Right);
        ed.cut();
        assert_eq!(ed.lines(), vec!["llo world"]);
        ed.move_end();
        ed.paste();
        assert_eq!(ed.lines(), vec!["llo worldhe"]);
        assert_eq!(ed.position(), Position::new(0, 11));
    }

    #[test]
    fn test_paste_stream_multi_line() {
        let mut ed = Editor::with_lines(["ab", "cd", "XY"]);
        ed.move_to(0, 1);
        ed.toggle_select();
        ed.move_to(1, 1);
        ed.copy();
        ed.escape();
        ed.move_to(2, 1);
        ed.paste();
        assert_eq!(ed.lines(), vec!["ab", "cd", "Xb", "cY"]);
        assert_eq!(ed.position(), Position::new(3, 1));
        assert!(ed.undo());
        assert_eq!(ed.lines(), vec!["ab", "cd", "XY"]);
    }

    #[test]
    fn test_paste_block_pads_and_extends() {
        let mut ed = Editor::with_lines(["abc", "def"]);
        ed.toggle_block_select();
        ed.move_to(1, 2);
        ed.copy();
        assert!(ed.clipboard().is_block());
        ed.escape();
        ed.move_to(1, 3);
        ed.paste();
        assert_eq!(ed.lines(), vec!["abc", "defab", "   de"]);
        assert!(ed.undo());
        assert_eq!(ed.lines(), vec!["abc", "def"]);
    }

    #[test]
    fn test_paste_replaces_selection() {
        let mut ed = Editor::with_lines(["one two"]);
        ed.select_to(Motion::Right);
        ed.select_to(Motion::Right);
        ed.select_to(Motion::Right);
        ed.copy();
        ed.move_to(0, 4);
        ed.select_to(Motion::End);
        ed.paste();
        assert_eq!(ed.lines(), vec!["one one"]);
    }
}
