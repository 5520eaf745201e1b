use super::Editor;
use super::host::{EditorHost, PromptKind};
use super::selection::{EditMode, SelectionRange};
use crate::text::width::{
    byte_at_column, display_width, filler_run_after, filler_run_before, first_non_blank_column,
    glyph_width, snap_column,
};

/// Cursor position in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based display column.
    pub col: usize,
    /// Preferred column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self {
            line: 0,
            col: 0,
            col_memory: 0,
        }
    }

    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    /// The column vertical moves try to return to.
    pub const fn preferred_col(&self) -> usize {
        self.col_memory
    }

    /// Update column and reset column memory to match.
    pub(crate) const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// A cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    /// First non-blank column, or column 0 when already there.
    Home,
    End,
    PageUp,
    PageDown,
    FileStart,
    FileEnd,
}

impl<H: EditorHost> Editor<H> {
    /// Move the cursor. Ends a shift-held selection; extends a toggled one.
    pub fn move_cursor(&mut self, motion: Motion) {
        if self.is_suspended() {
            return;
        }
        self.apply_motion(motion);
        self.mode.set_active(self.position());
        if matches!(self.mode, EditMode::ShiftSelect(_)) {
            self.mode = EditMode::Edit;
        }
        self.justify();
        self.host.post_update_lines(None, None);
    }

    /// Shift-modified move: starts or extends a selection.
    pub fn select_to(&mut self, motion: Motion) {
        if self.is_suspended() {
            return;
        }
        if self.mode.is_edit() {
            self.mode = EditMode::ShiftSelect(SelectionRange::at(self.position()));
        }
        self.apply_motion(motion);
        self.mode.set_active(self.position());
        self.justify();
        self.host.post_update_lines(None, None);
    }

    pub fn move_left(&mut self) {
        self.move_cursor(Motion::Left);
    }

    pub fn move_right(&mut self) {
        self.move_cursor(Motion::Right);
    }

    pub fn move_up(&mut self) {
        self.move_cursor(Motion::Up);
    }

    pub fn move_down(&mut self) {
        self.move_cursor(Motion::Down);
    }

    pub fn move_home(&mut self) {
        self.move_cursor(Motion::Home);
    }

    pub fn move_end(&mut self) {
        self.move_cursor(Motion::End);
    }

    pub fn page_up(&mut self) {
        self.move_cursor(Motion::PageUp);
    }

    pub fn page_down(&mut self) {
        self.move_cursor(Motion::PageDown);
    }

    pub fn goto_first(&mut self) {
        self.move_cursor(Motion::FileStart);
    }

    pub fn goto_last(&mut self) {
        self.move_cursor(Motion::FileEnd);
    }

    /// Place the cursor at `(line, col)`, clamped and snapped to the line.
    pub fn move_to(&mut self, line: usize, col: usize) {
        if self.is_suspended() {
            return;
        }
        self.cursor.line = line.min(self.doc.line_count() - 1);
        let text = self.doc.line(self.cursor.line);
        self.cursor.set_col(snap_column(&text, col));
        self.mode.set_active(self.position());
        if matches!(self.mode, EditMode::ShiftSelect(_)) {
            self.mode = EditMode::Edit;
        }
        self.justify();
        self.host.post_update_lines(None, None);
    }

    /// Ask the host for a line number to jump to.
    pub fn goto_line_prompt(&mut self) {
        self.request_prompt(PromptKind::GotoLine);
    }

    /// Jump to a 1-based line number, clamped to the document.
    pub fn goto_line(&mut self, number: usize) {
        if self.is_suspended() {
            return;
        }
        let line = number.saturating_sub(1).min(self.doc.line_count() - 1);
        self.jump_to_line(line);
    }

    pub(super) fn finish_goto_line(&mut self, answer: Option<&str>) {
        let Some(answer) = answer else {
            return;
        };
        match answer.trim().parse::<i64>() {
            Ok(number) => {
                let number = usize::try_from(number.max(0)).unwrap_or(usize::MAX);
                self.goto_line(number);
            }
            Err(_) => {
                tracing::debug!(parent: &self.span, input = answer, "invalid line number");
                self.host
                    .message_box("ERROR", "Invalid input number", &["OK"]);
                self.jump_to_line(self.doc.line_count() - 1);
            }
        }
    }

    fn jump_to_line(&mut self, line: usize) {
        self.cursor.line = line;
        self.vertical_col();
        self.mode = EditMode::Edit;
        self.viewport.go_to_line(line);
        self.justify();
        self.host.post_update_lines(None, None);
    }

    fn apply_motion(&mut self, motion: Motion) {
        let page = usize::from(self.viewport.height()).saturating_sub(1).max(1);
        let last = self.doc.line_count() - 1;
        match motion {
            Motion::Left => self.step_left(),
            Motion::Right => self.step_right(),
            Motion::Up => {
                if self.cursor.line > 0 {
                    self.cursor.line -= 1;
                    self.vertical_col();
                }
            }
            Motion::Down => {
                if self.cursor.line < last {
                    self.cursor.line += 1;
                    self.vertical_col();
                }
            }
            Motion::Home => {
                let text = self.doc.line(self.cursor.line);
                let indent = first_non_blank_column(&text);
                let col = if self.cursor.col == indent { 0 } else { indent };
                self.cursor.set_col(col);
            }
            Motion::End => {
                let width = self.doc.line_width(self.cursor.line);
                self.cursor.set_col(width);
            }
            Motion::PageUp => {
                self.cursor.line = self.cursor.line.saturating_sub(page);
                self.vertical_col();
            }
            Motion::PageDown => {
                self.cursor.line = (self.cursor.line + page).min(last);
                self.vertical_col();
            }
            Motion::FileStart => {
                self.cursor.line = 0;
                self.vertical_col();
                self.viewport.go_to_top();
            }
            Motion::FileEnd => {
                self.cursor.line = last;
                self.vertical_col();
                self.viewport.go_to_line(last);
            }
        }
    }

    /// Column after a vertical move: the preferred column clamped to the
    /// new line and snapped to a glyph boundary.
    fn vertical_col(&mut self) {
        let memory = self.cursor.col_memory.max(self.cursor.col);
        self.cursor.col_memory = memory;
        let text = self.doc.line(self.cursor.line);
        self.cursor.col = snap_column(&text, memory.min(display_width(&text)));
    }

    fn step_left(&mut self) {
        let col = self.cursor.col;
        if col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                let width = self.doc.line_width(self.cursor.line);
                self.cursor.set_col(width);
            }
            return;
        }
        let text = self.doc.line(self.cursor.line);
        let step = filler_run_before(&text, col, self.settings.tab_size)
            .unwrap_or_else(|| glyph_before(&text, col));
        self.cursor.set_col(col - step.min(col));
    }

    fn step_right(&mut self) {
        let col = self.cursor.col;
        let text = self.doc.line(self.cursor.line);
        if col >= display_width(&text) {
            if self.cursor.line + 1 < self.doc.line_count() {
                self.cursor.line += 1;
                self.cursor.set_col(0);
            }
            return;
        }
        let step = filler_run_after(&text, col, self.settings.tab_size)
            .unwrap_or_else(|| glyph_after(&text, col));
        self.cursor.set_col(col + step);
    }
}

/// Width of the glyph ending at `col`, 1 when there is none.
pub(super) fn glyph_before(text: &str, col: usize) -> usize {
    text[..byte_at_column(text, col)]
        .chars()
        .next_back()
        .map_or(1, glyph_width)
}

/// Width of the glyph starting at `col`, 1 when there is none.
pub(super) fn glyph_after(text: &str, col: usize) -> usize {
    text[byte_at_column(text, col)..]
        .chars()
        .next()
        .map_or(1, glyph_width)
}
