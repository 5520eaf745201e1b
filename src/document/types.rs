use std::ops::Range;
use std::path::{Path, PathBuf};

use ropey::Rope;

use super::Encoding;
use crate::text::display_width;

/// Line terminator used when the document is written back to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Unix,
    /// `\r\n`
    Dos,
}

impl LineEnding {
    /// The terminator string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unix => "\n",
            Self::Dos => "\r\n",
        }
    }
}

/// An ordered sequence of logical lines backed by a rope.
///
/// Lines are separated by `\n` inside the rope and never contain a line
/// terminator themselves. The rope always reports at least one line, so an
/// empty document is a single empty line.
///
/// # Example
///
/// ```
/// use panedit::document::Document;
///
/// let mut doc = Document::from_lines(["abc", "de"]);
/// doc.set_line(1, "xyz");
/// assert_eq!(doc.lines(), vec!["abc", "xyz"]);
/// ```
pub struct Document {
    rope: Rope,
    line_ending: LineEnding,
    encoding: Encoding,
    path: Option<PathBuf>,
    read_only: bool,
    dirty: bool,
}

impl Document {
    /// A document holding one empty line.
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            line_ending: LineEnding::Unix,
            encoding: Encoding::default(),
            path: None,
            read_only: false,
            dirty: false,
        }
    }

    /// Build a document from already-split lines.
    ///
    /// An empty iterator still yields a single empty line.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        for (idx, line) in lines.into_iter().enumerate() {
            if idx > 0 {
                text.push('\n');
            }
            text.push_str(line.as_ref());
        }
        Self {
            rope: Rope::from_str(&text),
            ..Self::new()
        }
    }

    /// Total number of lines, always at least one.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without terminator).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        Some(self.rope.slice(self.content_range(line_idx)).to_string())
    }

    /// Content of a line, empty when out of range.
    pub fn line(&self, line_idx: usize) -> String {
        self.line_at(line_idx).unwrap_or_default()
    }

    /// Display width of a line, 0 when out of range.
    pub fn line_width(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| display_width(&s))
    }

    /// All lines in order.
    pub fn lines(&self) -> Vec<String> {
        (0..self.line_count()).map(|idx| self.line(idx)).collect()
    }

    /// Lines `range` in order, clamped to the document.
    pub fn lines_in(&self, range: Range<usize>) -> Vec<String> {
        let end = range.end.min(self.line_count());
        (range.start.min(end)..end).map(|idx| self.line(idx)).collect()
    }

    /// Join all lines with the document's line ending.
    pub fn text(&self) -> String {
        self.lines().join(self.line_ending.as_str())
    }

    /// Replace the content of one line. Out-of-range indexes are ignored.
    pub fn set_line(&mut self, line_idx: usize, text: &str) {
        debug_assert!(!text.contains('\n'), "line text must not contain a newline");
        if line_idx >= self.line_count() {
            return;
        }
        let range = self.content_range(line_idx);
        let start = range.start;
        self.rope.remove(range);
        self.rope.insert(start, text);
        self.dirty = true;
    }

    /// Insert a new line before `line_idx`; indexes past the end append.
    pub fn insert_line(&mut self, line_idx: usize, text: &str) {
        debug_assert!(!text.contains('\n'), "line text must not contain a newline");
        if line_idx < self.line_count() {
            let at = self.rope.line_to_char(line_idx);
            self.rope.insert(at, &format!("{text}\n"));
        } else {
            let at = self.rope.len_chars();
            self.rope.insert(at, &format!("\n{text}"));
        }
        self.dirty = true;
    }

    /// Remove a line. Removing the only line leaves one empty line.
    pub fn remove_line(&mut self, line_idx: usize) {
        let count = self.line_count();
        if line_idx >= count {
            return;
        }
        if count == 1 {
            self.set_line(0, "");
            return;
        }
        let range = if line_idx + 1 < count {
            self.rope.line_to_char(line_idx)..self.rope.line_to_char(line_idx + 1)
        } else {
            self.rope.line_to_char(line_idx) - 1..self.rope.len_chars()
        };
        self.rope.remove(range);
        self.dirty = true;
    }

    /// Replace `remove` lines starting at `at` with `lines`.
    pub fn replace_lines<S: AsRef<str>>(&mut self, at: usize, remove: usize, lines: &[S]) {
        let at = at.min(self.line_count());
        let overlap = remove.min(lines.len());
        for (offset, line) in lines.iter().take(overlap).enumerate() {
            self.set_line(at + offset, line.as_ref());
        }
        for (offset, line) in lines.iter().enumerate().skip(overlap) {
            self.insert_line(at + offset, line.as_ref());
        }
        for _ in overlap..remove {
            if at + overlap >= self.line_count() {
                break;
            }
            self.remove_line(at + overlap);
        }
    }

    /// Reset to a single empty line, keeping path and flags.
    pub fn clear(&mut self) {
        self.rope = Rope::new();
        self.dirty = false;
    }

    pub const fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    pub const fn set_line_ending(&mut self, line_ending: LineEnding) {
        self.line_ending = line_ending;
    }

    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub const fn set_encoding(&mut self, encoding: Encoding) {
        self.encoding = encoding;
    }

    /// File identity, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: Option<PathBuf>) {
        self.path = path;
    }

    pub const fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub const fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Whether the document has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the document as clean (e.g., after saving).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Char range of a line's content, excluding the `\n` separator.
    fn content_range(&self, line_idx: usize) -> Range<usize> {
        let start = self.rope.line_to_char(line_idx);
        let end = if line_idx + 1 < self.rope.len_lines() {
            self.rope.line_to_char(line_idx + 1) - 1
        } else {
            self.rope.len_chars()
        };
        start..end
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("line_ending", &self.line_ending)
            .field("encoding", &self.encoding)
            .field("path", &self.path)
            .field("read_only", &self.read_only)
            .field("dirty", &self.dirty)
            .finish()
    }
}
