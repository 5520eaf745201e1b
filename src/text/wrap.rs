use super::width::glyph_width;

/// Splits one logical line into display-width-bounded chunks.
///
/// The tokenizer is reusable: [`LineTokenizer::set_string`] restarts it on a
/// new source line. Chunk boundaries are computed eagerly as byte offsets
/// (cheap), chunk text is borrowed lazily from the stored line.
///
/// Every chunk is at most `width` columns wide, except that a single glyph
/// wider than `width` forms a chunk on its own so wrapping always advances.
/// An empty line yields exactly one empty chunk.
///
/// ```
/// use panedit::text::LineTokenizer;
///
/// let mut tok = LineTokenizer::new();
/// tok.set_string("abcdefg", 3);
/// assert_eq!(tok.size(), 3);
/// assert_eq!(tok.get(), "abc");
/// assert!(tok.next(false));
/// assert_eq!(tok.get(), "def");
/// ```
#[derive(Debug, Clone, Default)]
pub struct LineTokenizer {
    line: String,
    /// Start byte of each chunk; `bounds.len()` is the chunk count.
    bounds: Vec<usize>,
    cur: usize,
}

impl LineTokenizer {
    /// Create an empty tokenizer with no chunks.
    pub const fn new() -> Self {
        Self {
            line: String::new(),
            bounds: Vec::new(),
            cur: 0,
        }
    }

    /// Reset to a new source line wrapped at `width` columns.
    ///
    /// The tokenizer is positioned on the first chunk afterwards.
    pub fn set_string(&mut self, line: &str, width: usize) {
        let width = width.max(1);
        self.line.clear();
        self.line.push_str(line);
        self.bounds.clear();
        self.bounds.push(0);
        self.cur = 0;

        let mut used = 0;
        for (idx, ch) in line.char_indices() {
            let w = glyph_width(ch);
            if used > 0 && used + w > width {
                self.bounds.push(idx);
                used = 0;
            }
            used += w;
        }
    }

    /// Whether a chunk follows the current one.
    ///
    /// With `peek` the position is left untouched; otherwise the tokenizer
    /// moves onto that chunk when it exists.
    pub fn next(&mut self, peek: bool) -> bool {
        let available = self.cur + 1 < self.bounds.len();
        if available && !peek {
            self.cur += 1;
        }
        available
    }

    /// Text of the current chunk, empty when no line has been set.
    pub fn get(&self) -> &str {
        let Some(&start) = self.bounds.get(self.cur) else {
            return "";
        };
        let end = self.bounds.get(self.cur + 1).copied().unwrap_or(self.line.len());
        &self.line[start..end]
    }

    /// Total number of chunks for the current line.
    pub const fn size(&self) -> usize {
        self.bounds.len()
    }

    /// Index of the current chunk.
    pub const fn cur_line(&self) -> usize {
        self.cur
    }

    /// True when the current chunk is the final chunk of its line.
    pub const fn is_last(&self) -> bool {
        self.cur + 1 >= self.bounds.len()
    }
}

/// Wrap `line` at `width` columns and collect all chunks.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut tok = LineTokenizer::new();
    tok.set_string(line, width);
    let mut chunks = vec![tok.get().to_string()];
    while tok.next(false) {
        chunks.push(tok.get().to_string());
    }
    chunks
}
