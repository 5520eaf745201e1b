use super::Editor;
use super::cursor::{glyph_after, glyph_before};
use super::host::EditorHost;
use super::selection::{EditMode, SelectionRange};
use super::undo::{UndoOp, UndoRecord};
use crate::text::width::{
    FILLER, byte_at_column, column_insert, column_overwrite, column_splice, display_width,
    expand_tabs, filler_run_after, filler_run_before, leading_indent, snap_column,
};

impl<H: EditorHost> Editor<H> {
    /// Delete key: remove the selection, the filler-run or glyph under the
    /// cursor, or join the next line at end of line.
    pub fn delete_forward(&mut self) {
        if !self.can_edit() {
            return;
        }
        if self.delete_selection() {
            self.justify();
            return;
        }
        let (line, col) = (self.cursor.line, self.cursor.col);
        let text = self.doc.line(line);

        if col < display_width(&text) {
            let remove = filler_run_after(&text, col, self.settings.tab_size)
                .unwrap_or_else(|| glyph_after(&text, col));
            let updated = column_splice(&text, col, remove);
            self.record(line, vec![text], 1, UndoOp::Edit);
            self.doc.set_line(line, &updated);
            self.finish_edit(line, Some(1));
        } else if line + 1 < self.doc.line_count() {
            let next = self.doc.line(line + 1);
            let joined = format!("{text}{next}");
            self.record(line, vec![text, next], 1, UndoOp::Join);
            self.doc.replace_lines(line, 2, &[joined]);
            self.finish_edit(line, None);
        }
    }

    /// Backspace: mirror of [`Self::delete_forward`] to the left of the
    /// cursor; at column 0 the line is merged into the previous one.
    pub fn backspace(&mut self) {
        if !self.can_edit() {
            return;
        }
        if self.delete_selection() {
            self.justify();
            return;
        }
        let (line, col) = (self.cursor.line, self.cursor.col);
        let text = self.doc.line(line);

        if col > 0 {
            let remove = filler_run_before(&text, col, self.settings.tab_size)
                .unwrap_or_else(|| glyph_before(&text, col))
                .min(col);
            let updated = column_splice(&text, col - remove, remove);
            self.record(line, vec![text], 1, UndoOp::Edit);
            self.doc.set_line(line, &updated);
            self.cursor.set_col(col - remove);
            self.finish_edit(line, Some(1));
        } else if line > 0 {
            let prev = self.doc.line(line - 1);
            let prev_width = display_width(&prev);
            let joined = format!("{prev}{text}");
            self.record(line - 1, vec![prev, text], 1, UndoOp::Join);
            self.doc.replace_lines(line - 1, 2, &[joined]);
            self.cursor.line = line - 1;
            self.cursor.set_col(prev_width);
            self.finish_edit(line - 1, None);
        }
    }

    /// Type `data` at the cursor, replacing any selection.
    ///
    /// Tabs are expanded like on load; each `\n` splits the line as Enter.
    pub fn input_data(&mut self, data: &str) {
        if !self.can_edit() || data.is_empty() {
            return;
        }
        if !self.mode.is_edit() {
            self.delete_selection();
        }
        for (idx, segment) in data.split('\n').enumerate() {
            if idx > 0 {
                self.split_line();
            }
            let segment = expand_tabs(segment.trim_end_matches('\r'), self.settings.tab_size);
            self.insert_text(&segment, self.insert);
        }
    }

    /// Split the line at the cursor. With indent mode on, the new line
    /// starts with the indentation of the line being split.
    pub fn enter(&mut self) {
        if !self.can_edit() {
            return;
        }
        if !self.mode.is_edit() {
            self.delete_selection();
        }
        self.split_line();
    }

    /// Tab key: indent the selected lines, or insert fillers up to the next
    /// tab stop.
    pub fn tab(&mut self) {
        if !self.can_edit() {
            return;
        }
        if let Some(range) = self.mode.range() {
            self.indent_lines(range, true);
            return;
        }
        let stop = self.settings.tab_stop.max(1);
        let fill = stop - self.cursor.col % stop;
        let run: String = std::iter::repeat_n(FILLER, fill).collect();
        self.insert_text(&run, self.insert);
    }

    /// Shift+Tab: outdent the selected lines, or the current line.
    pub fn untab(&mut self) {
        if !self.can_edit() {
            return;
        }
        let range = self
            .mode
            .range()
            .unwrap_or_else(|| SelectionRange::at(self.position()));
        self.indent_lines(range, false);
    }

    fn insert_text(&mut self, text: &str, insert: bool) {
        if text.is_empty() {
            return;
        }
        let (line, col) = (self.cursor.line, self.cursor.col);
        let current = self.doc.line(line);
        let updated = if insert {
            column_insert(&current, col, text)
        } else {
            column_overwrite(&current, col, text)
        };
        self.record(line, vec![current], 1, UndoOp::Edit);
        self.doc.set_line(line, &updated);
        self.cursor.set_col(col + display_width(text));
        self.finish_edit(line, Some(1));
    }

    fn split_line(&mut self) {
        let (line, col) = (self.cursor.line, self.cursor.col);
        let text = self.doc.line(line);
        let at = byte_at_column(&text, col);
        let (head, tail) = text.split_at(at);
        let indent = if self.indent { leading_indent(&text) } else { "" };
        let second = format!("{indent}{tail}");
        let new_col = display_width(indent);
        let parts = [head.to_string(), second];

        self.record(line, vec![text.clone()], 2, UndoOp::Split);
        self.doc.replace_lines(line, 1, &parts);
        self.cursor.line = line + 1;
        self.cursor.set_col(new_col);
        self.finish_edit(line, None);
    }

    /// Prepend or strip one `tab_size` filler-run on every line in `range`.
    fn indent_lines(&mut self, range: SelectionRange, indent: bool) {
        let before = self.position();
        let (first, last) = range.line_span();
        let last = last.min(self.doc.line_count() - 1);
        let run: String = std::iter::repeat_n(FILLER, self.settings.tab_size).collect();
        let saved = self.doc.lines_in(first..last + 1);
        let changed: Vec<String> = saved
            .iter()
            .map(|line| {
                if indent {
                    format!("{run}{line}")
                } else {
                    line.strip_prefix(run.as_str()).unwrap_or(line).to_string()
                }
            })
            .collect();

        self.mode = EditMode::Edit;
        if changed == saved {
            self.host.post_update_lines(None, None);
            return;
        }

        let count = changed.len();
        let cursor_line = self.cursor.line;
        if (first..=last).contains(&cursor_line) {
            let old = &saved[cursor_line - first];
            let after = &changed[cursor_line - first];
            let col = if indent {
                self.cursor.col + self.settings.tab_size
            } else if old == after {
                self.cursor.col
            } else {
                self.cursor.col.saturating_sub(self.settings.tab_size)
            };
            self.cursor.set_col(snap_column(after, col));
        }

        self.undo.push(UndoRecord::new(
            before,
            first,
            saved,
            count,
            UndoOp::Indent,
        ));
        self.doc.replace_lines(first, count, &changed);
        tracing::debug!(parent: &self.span, first, last, indent, "batch indent");
        self.finish_edit(first, Some(count));
    }

    /// Push an undo record for a mutation at `first` made from the current
    /// cursor position.
    fn record(&mut self, first: usize, saved: Vec<String>, replaced: usize, op: UndoOp) {
        let record = UndoRecord::new(self.position(), first, saved, replaced, op);
        tracing::trace!(parent: &self.span, first, op = op.code(), "undo record");
        self.undo.push(record);
    }
}
