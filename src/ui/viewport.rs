//! Viewport management for scrolling.
//!
//! The [`Viewport`] struct tracks the visible window of wrapped rows and
//! keeps it glued to the cursor line.

use std::ops::Range;

use crate::document::Document;
use crate::text::{LineTokenizer, display_width};

/// Scroll hysteresis constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTuning {
    /// Minimum logical-line span of a full view before the anchor advances
    /// early while the cursor sits on the bottom line. Also the number of
    /// context lines kept above a go-to-line target.
    pub slack: usize,
    /// Rows at the bottom of the view that count as "nearly full".
    pub margin: usize,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            slack: 10,
            margin: 3,
        }
    }
}

/// One screen row: a whole logical line or one wrapped chunk of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewLine {
    /// Row on screen, starting at 0.
    pub screen_row: usize,
    /// Logical line the chunk comes from.
    pub line: usize,
    /// Chunk index within the logical line.
    pub chunk: usize,
    /// True when another chunk of the same logical line follows.
    pub continues: bool,
    /// Chunk text.
    pub text: String,
}

/// Manages the visible portion of a document.
///
/// The viewport tracks:
/// - Terminal dimensions (width, height) and a line-number gutter
/// - The scroll anchor (`first_line`) and the last logical line reached
/// - The rows produced by the last fill
///
/// # Example
///
/// ```
/// use panedit::document::Document;
/// use panedit::ui::viewport::Viewport;
///
/// let doc = Document::from_lines(["abcdefgh", "xy"]);
/// let mut vp = Viewport::new(4, 24);
/// vp.justify(&doc, 0);
/// assert_eq!(vp.rows().len(), 3);
/// assert_eq!(vp.visible_range(), 0..2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    gutter: u16,
    first_line: usize,
    last_line: usize,
    rows: Vec<ViewLine>,
    tuning: ScrollTuning,
}

impl Viewport {
    /// Create a new viewport.
    ///
    /// # Arguments
    ///
    /// * `width` - Columns available, including any gutter
    /// * `height` - Rows available for text
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            gutter: 0,
            first_line: 0,
            last_line: 0,
            rows: Vec::new(),
            tuning: ScrollTuning {
                slack: 10,
                margin: 3,
            },
        }
    }

    /// Use custom hysteresis constants.
    #[must_use]
    pub const fn with_tuning(mut self, tuning: ScrollTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Get the viewport width.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the viewport height.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Columns reserved for line numbers.
    pub const fn gutter(&self) -> u16 {
        self.gutter
    }

    /// Columns each row of text may occupy, never less than 1.
    pub fn text_width(&self) -> usize {
        usize::from(self.width.saturating_sub(self.gutter)).max(1)
    }

    /// The scroll anchor.
    pub const fn first_line(&self) -> usize {
        self.first_line
    }

    /// The last logical line reached by the last fill.
    pub const fn last_line(&self) -> usize {
        self.last_line
    }

    /// Rows produced by the last fill.
    pub fn rows(&self) -> &[ViewLine] {
        &self.rows
    }

    pub const fn tuning(&self) -> ScrollTuning {
        self.tuning
    }

    /// Range of logical lines with at least one visible row.
    pub const fn visible_range(&self) -> Range<usize> {
        self.first_line..self.last_line + 1
    }

    /// Scroll percentage (0-100) of the anchor through `total_lines`.
    pub fn scroll_percent(&self, total_lines: usize) -> u8 {
        let max = total_lines.saturating_sub(1);
        if max == 0 {
            return 100;
        }
        let pct = (self.first_line.min(max) * 100) / max;
        u8::try_from(pct).unwrap_or(100)
    }

    /// Resize the viewport. Rows are rebuilt on the next [`Self::justify`].
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Reserve `gutter` columns on the left for line numbers.
    pub const fn set_gutter(&mut self, gutter: u16) {
        self.gutter = gutter;
    }

    /// Go to the beginning of the document.
    pub const fn go_to_top(&mut self) {
        self.first_line = 0;
    }

    /// Anchor the view so `line` has `slack` lines of context above it.
    pub const fn go_to_line(&mut self, line: usize) {
        self.first_line = line.saturating_sub(self.tuning.slack);
    }

    /// Recompute the visible rows so the cursor's whole wrapped line shows.
    ///
    /// Returns the cursor line clamped into the document.
    pub fn justify(&mut self, doc: &Document, cursor_line: usize) -> usize {
        let count = doc.line_count();
        let cursor = cursor_line.min(count - 1);
        let height = self.row_capacity();
        self.first_line = self.first_line.min(count - 1);

        if cursor < self.first_line {
            self.first_line = cursor;
        } else if cursor > 0 {
            if cursor == self.first_line {
                self.first_line -= 1;
            } else if self.last_line.saturating_sub(self.first_line) >= self.tuning.slack
                && cursor >= self.last_line
                && self.rows.len() >= height
            {
                self.first_line += 1;
            }
        }

        loop {
            self.fill(doc);

            // A cut-off cursor line sits on the last row, so at least one
            // margin row always counts.
            let margin = self.tuning.margin.max(1);
            let nearly_full = self.rows.len() > height.saturating_sub(margin);
            let cursor_cut_off = self
                .rows
                .last()
                .is_some_and(|row| row.line == cursor && row.continues);
            if self.first_line < cursor
                && (self.last_line < cursor || (nearly_full && cursor_cut_off))
            {
                self.first_line += 1;
                continue;
            }
            break;
        }

        tracing::trace!(
            cursor,
            first = self.first_line,
            last = self.last_line,
            rows = self.rows.len(),
            "viewport justified"
        );
        cursor
    }

    /// Screen position `(row, column)` of a cursor, if it is visible.
    pub fn cursor_position(&self, line: usize, col: usize) -> Option<(usize, usize)> {
        let mut start = 0;
        for row in self.rows.iter().filter(|row| row.line == line) {
            let end = start + display_width(&row.text);
            if col < end || !row.continues {
                return Some((row.screen_row, col.saturating_sub(start)));
            }
            start = end;
        }
        None
    }

    /// A zero-height viewport still shows the cursor row.
    fn row_capacity(&self) -> usize {
        usize::from(self.height).max(1)
    }

    fn fill(&mut self, doc: &Document) {
        let count = doc.line_count();
        let height = self.row_capacity();
        let width = self.text_width();

        self.rows.clear();
        let mut tok = LineTokenizer::new();
        let mut next = self.first_line;
        while self.rows.len() < height {
            if !tok.next(false) {
                if next >= count {
                    break;
                }
                tok.set_string(&doc.line(next), width);
                next += 1;
            }
            self.rows.push(ViewLine {
                screen_row: self.rows.len(),
                line: next - 1,
                chunk: tok.cur_line(),
                continues: !tok.is_last(),
                text: tok.get().to_string(),
            });
        }
        self.last_line = next.saturating_sub(1).max(self.first_line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_lines(n: usize) -> Document {
        Document::from_lines((0..n).map(|i| format!("line {i}")))
    }

    /// Lines of 25 columns, three rows each at width 10.
    fn wrapped_lines(n: usize) -> Document {
        Document::from_lines((0..n).map(|i| format!("{i:02}").repeat(13)[..25].to_string()))
    }

    fn assert_cursor_line_fully_visible(vp: &Viewport, cursor: usize) {
        assert!(
            vp.visible_range().contains(&cursor),
            "cursor {cursor} outside {:?}",
            vp.visible_range()
        );
        let rows: Vec<_> = vp.rows().iter().filter(|r| r.line == cursor).collect();
        assert!(!rows.is_empty(), "cursor line {cursor} has no rows");
        let first_line_only = vp.first_line() == cursor;
        assert!(
            first_line_only || !rows.last().unwrap().continues,
            "cursor line {cursor} is cut off at the bottom"
        );
    }

    #[test]
    fn test_new_viewport_starts_at_top() {
        let vp = Viewport::new(80, 24);
        assert_eq!(vp.first_line(), 0);
        assert_eq!(vp.last_line(), 0);
        assert!(vp.rows().is_empty());
    }

    #[test]
    fn test_fill_short_document() {
        let doc = short_lines(5);
        let mut vp = Viewport::new(80, 24);
        vp.justify(&doc, 0);
        assert_eq!(vp.rows().len(), 5);
        assert_eq!(vp.visible_range(), 0..5);
        assert_eq!(vp.rows()[4].text, "line 4");
        assert!(vp.rows().iter().all(|r| !r.continues));
    }

    #[test]
    fn test_empty_document_has_one_row() {
        let doc = Document::new();
        let mut vp = Viewport::new(80, 24);
        assert_eq!(vp.justify(&doc, 7), 0);
        assert_eq!(vp.rows().len(), 1);
        assert_eq!(vp.first_line(), 0);
        assert_eq!(vp.last_line(), 0);
    }

    #[test]
    fn test_rows_never_exceed_height() {
        let doc = wrapped_lines(50);
        let mut vp = Viewport::new(10, 7);
        vp.justify(&doc, 0);
        assert_eq!(vp.rows().len(), 7);
        assert_eq!(vp.rows()[0].chunk, 0);
        assert!(vp.rows()[0].continues);
        assert!(!vp.rows()[2].continues);
        assert_eq!(vp.rows()[3].line, 1);
    }

    #[test]
    fn test_gutter_narrows_wrap_width() {
        let doc = Document::from_lines(["abcdefghij"]);
        let mut vp = Viewport::new(10, 5);
        vp.set_gutter(5);
        vp.justify(&doc, 0);
        assert_eq!(vp.rows().len(), 2);
        assert_eq!(vp.rows()[0].text, "abcde");
    }

    #[test]
    fn test_cursor_below_view_scrolls_one_line() {
        let doc = short_lines(100);
        let mut vp = Viewport::new(80, 24);
        vp.justify(&doc, 0);
        vp.justify(&doc, 24);
        assert!(vp.visible_range().contains(&24));
        assert_eq!(vp.last_line(), 24);
    }

    #[test]
    fn test_hysteresis_scrolls_early_at_bottom_edge() {
        let doc = short_lines(100);
        let mut vp = Viewport::new(80, 24);
        vp.justify(&doc, 0);
        assert_eq!(vp.last_line(), 23);
        vp.justify(&doc, 23);
        assert_eq!(vp.first_line(), 1);
        assert_eq!(vp.last_line(), 24);
        // Stable once the line below the cursor is visible.
        vp.justify(&doc, 23);
        assert_eq!(vp.first_line(), 1);
    }

    #[test]
    fn test_cursor_on_top_row_scrolls_up_one() {
        let doc = short_lines(100);
        let mut vp = Viewport::new(80, 24);
        vp.go_to_line(50);
        vp.justify(&doc, 50);
        let first = vp.first_line();
        vp.justify(&doc, first);
        assert_eq!(vp.first_line(), first - 1);
    }

    #[test]
    fn test_jump_above_view_snaps_anchor() {
        let doc = short_lines(100);
        let mut vp = Viewport::new(80, 24);
        vp.go_to_line(80);
        vp.justify(&doc, 80);
        vp.justify(&doc, 3);
        assert_eq!(vp.first_line(), 3);
        assert!(vp.visible_range().contains(&3));
    }

    #[test]
    fn test_forward_through_wrapped_lines_keeps_cursor_line_whole() {
        let doc = wrapped_lines(30);
        let mut vp = Viewport::new(10, 12);
        for cursor in 0..30 {
            vp.justify(&doc, cursor);
            assert_cursor_line_fully_visible(&vp, cursor);
            assert!(vp.rows().len() <= 12);
        }
        assert_eq!(vp.last_line(), 29);
    }

    #[test]
    fn test_backward_after_scrolling() {
        let doc = wrapped_lines(30);
        let mut vp = Viewport::new(10, 12);
        for cursor in 0..30 {
            vp.justify(&doc, cursor);
        }
        for cursor in (0..30).rev() {
            vp.justify(&doc, cursor);
            assert_cursor_line_fully_visible(&vp, cursor);
        }
        assert_eq!(vp.first_line(), 0);
    }

    #[test]
    fn test_line_taller_than_view_anchors_on_cursor() {
        let doc = Document::from_lines(["short", "x".repeat(100).as_str(), "after"]);
        let mut vp = Viewport::new(10, 4);
        vp.justify(&doc, 1);
        assert_eq!(vp.first_line(), 1);
        assert!(vp.rows().iter().all(|r| r.line == 1));
    }

    #[test]
    fn test_cursor_position_in_wrapped_line() {
        let doc = Document::from_lines(["abcdefghij"]);
        let mut vp = Viewport::new(4, 5);
        vp.justify(&doc, 0);
        assert_eq!(vp.cursor_position(0, 0), Some((0, 0)));
        assert_eq!(vp.cursor_position(0, 5), Some((1, 1)));
        assert_eq!(vp.cursor_position(0, 10), Some((2, 2)));
        assert_eq!(vp.cursor_position(3, 0), None);
    }

    #[test]
    fn test_scroll_percent() {
        let mut vp = Viewport::new(80, 24);
        assert_eq!(vp.scroll_percent(1), 100);
        assert_eq!(vp.scroll_percent(101), 0);
        vp.go_to_line(60);
        assert_eq!(vp.scroll_percent(101), 50);
    }

    #[test]
    fn test_resize_rewraps_on_next_justify() {
        let doc = Document::from_lines(["abcdefgh"]);
        let mut vp = Viewport::new(8, 5);
        vp.justify(&doc, 0);
        assert_eq!(vp.rows().len(), 1);
        vp.resize(4, 5);
        vp.justify(&doc, 0);
        assert_eq!(vp.rows().len(), 2);
    }

    #[test]
    fn test_zero_margin_still_follows_cursor() {
        let doc = Document::from_lines((0..100).map(|i| i.to_string()));
        let mut vp = Viewport::new(80, 5).with_tuning(ScrollTuning {
            slack: 10,
            margin: 0,
        });
        vp.justify(&doc, 50);
        assert!(vp.visible_range().contains(&50));
        for cursor in 0..12 {
            vp.justify(&doc, cursor);
            assert!(vp.visible_range().contains(&cursor), "cursor {cursor}");
        }
    }

    #[test]
    fn test_zero_margin_reveals_wrapped_cursor_line() {
        let mut lines: Vec<String> = (0..4).map(|i| i.to_string()).collect();
        lines.push("z".repeat(12));
        let doc = Document::from_lines(lines);
        let mut vp = Viewport::new(5, 5).with_tuning(ScrollTuning {
            slack: 10,
            margin: 0,
        });
        vp.justify(&doc, 0);
        vp.justify(&doc, 4);
        assert_cursor_line_fully_visible(&vp, 4);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn cursor_always_within_view(
                lens in proptest::collection::vec(0..40usize, 1..60),
                height in 1..30u16,
                width in 1..20u16,
                moves in proptest::collection::vec(0..60usize, 1..40),
                slack in 0..12usize,
                margin in 0..5usize,
            ) {
                let doc = Document::from_lines(lens.iter().map(|n| "y".repeat(*n)));
                let mut vp = Viewport::new(width, height)
                    .with_tuning(ScrollTuning { slack, margin });
                for target in moves {
                    let cursor = vp.justify(&doc, target);
                    prop_assert!(vp.first_line() <= cursor);
                    prop_assert!(cursor <= vp.last_line());
                    prop_assert!(vp.last_line() < doc.line_count());
                    prop_assert!(vp.rows().len() <= usize::from(height));
                }
            }

            #[test]
            fn stepping_one_line_at_a_time_stays_visible(
                lens in proptest::collection::vec(0..40usize, 1..60),
                height in 1..30u16,
                width in 1..20u16,
                margin in 0..5usize,
            ) {
                let doc = Document::from_lines(lens.iter().map(|n| "y".repeat(*n)));
                let mut vp = Viewport::new(width, height)
                    .with_tuning(ScrollTuning { slack: 10, margin });
                let count = doc.line_count();
                for cursor in (0..count).chain((0..count).rev()) {
                    vp.justify(&doc, cursor);
                    prop_assert!(vp.visible_range().contains(&cursor));
                }
            }
        }
    }
}
