use super::Editor;
use super::host::{EditorHost, PromptKind};
use super::selection::{EditMode, Position};
use crate::text::width::{byte_at_column, display_width};

/// Last search string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    needle: Option<String>,
}

impl SearchState {
    pub fn needle(&self) -> Option<&str> {
        self.needle.as_deref()
    }
}

impl<H: EditorHost> Editor<H> {
    /// Ask the host for a search string.
    pub fn find_prompt(&mut self) {
        self.request_prompt(PromptKind::Find);
    }

    /// Search for `needle` starting at the cursor.
    pub fn find(&mut self, needle: &str) -> bool {
        if self.is_suspended() {
            return false;
        }
        self.search.needle = (!needle.is_empty()).then(|| needle.to_string());
        self.jump_to_match(self.position())
    }

    /// Repeat the last search from just past the cursor, wrapping around.
    pub fn find_next(&mut self) -> bool {
        if self.is_suspended() || self.search.needle.is_none() {
            return false;
        }
        let from = Position::new(self.cursor.line, self.cursor.col + 1);
        self.jump_to_match(from)
    }

    pub(super) fn finish_find(&mut self, answer: Option<&str>) {
        if let Some(needle) = answer {
            self.find(needle);
        }
    }

    fn jump_to_match(&mut self, from: Position) -> bool {
        let Some(needle) = self.search.needle.clone() else {
            return false;
        };
        match find_from(&self.doc.lines(), &needle, from) {
            Some(found) => {
                self.cursor.line = found.line;
                self.cursor.set_col(found.col);
                self.mode = EditMode::Edit;
                self.justify();
                self.host.post_update_lines(None, None);
                true
            }
            None => {
                tracing::debug!(parent: &self.span, needle = %needle, "not found");
                self.host.message_box("Find", "Search string not found", &["OK"]);
                false
            }
        }
    }
}

/// First occurrence of `needle` at or after `from`, wrapping to the top.
fn find_from(lines: &[String], needle: &str, from: Position) -> Option<Position> {
    if needle.is_empty() || lines.is_empty() {
        return None;
    }
    let count = lines.len();
    let origin = from.line.min(count - 1);
    for step in 0..=count {
        let idx = (origin + step) % count;
        let line = &lines[idx];
        let start = if step == 0 {
            byte_at_column(line, from.col)
        } else {
            0
        };
        if let Some(offset) = line[start..].find(needle) {
            let byte = start + offset;
            return Some(Position::new(idx, display_width(&line[..byte])));
        }
    }
    None
}
