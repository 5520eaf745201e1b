use unicode_width::UnicodeWidthChar;

/// The single-width glyph a tab is expanded into at load time.
pub const FILLER: char = ' ';

/// Cell width of one glyph: 2 for double-width glyphs, 1 for everything else.
pub fn glyph_width(ch: char) -> usize {
    match ch.width() {
        Some(2) => 2,
        _ => 1,
    }
}

/// Total display width of `s` in terminal cells.
pub fn display_width(s: &str) -> usize {
    s.chars().map(glyph_width).sum()
}

/// Byte offset of the first glyph starting at or after display column `col`.
///
/// A double-width glyph that straddles `col` is skipped, so the returned
/// offset is always a glyph boundary. Columns past the end map to `s.len()`.
pub fn byte_at_column(s: &str, col: usize) -> usize {
    let mut cur = 0;
    for (idx, ch) in s.char_indices() {
        if cur >= col {
            return idx;
        }
        cur += glyph_width(ch);
    }
    s.len()
}

/// Largest glyph-boundary column that is `<= col`, clamped to the line width.
pub fn snap_column(s: &str, col: usize) -> usize {
    let mut cur = 0;
    for ch in s.chars() {
        let next = cur + glyph_width(ch);
        if next > col {
            return cur;
        }
        cur = next;
    }
    cur
}

/// Slice of `s` spanning `len` display columns starting at `start`.
///
/// Glyphs that would be bisected by either boundary are left out of the
/// result. Out-of-range requests yield an empty slice.
pub fn column_substring(s: &str, start: usize, len: usize) -> &str {
    let end_col = start.saturating_add(len);
    let mut cur = 0;
    let mut from = None;
    let mut to = s.len();
    for (idx, ch) in s.char_indices() {
        let w = glyph_width(ch);
        if from.is_none() && cur >= start {
            from = Some(idx);
        }
        if from.is_some() && cur + w > end_col {
            to = idx;
            break;
        }
        cur += w;
    }
    match from {
        Some(from) if from <= to => &s[from..to],
        _ => "",
    }
}

/// Everything from display column `start` to the end of `s`.
pub fn column_tail(s: &str, start: usize) -> &str {
    &s[byte_at_column(s, start)..]
}

/// Remove `remove` display columns at `start`, returning the remainder.
///
/// Only glyphs lying entirely inside `[start, start + remove)` are removed;
/// a double-width glyph straddling either edge is kept.
pub fn column_splice(s: &str, start: usize, remove: usize) -> String {
    let end_col = start.saturating_add(remove);
    let mut cur = 0;
    let mut from = s.len();
    let mut to = s.len();
    let mut in_range = false;
    for (idx, ch) in s.char_indices() {
        let w = glyph_width(ch);
        if !in_range && cur >= start {
            in_range = true;
            from = idx;
        }
        if in_range && cur + w > end_col {
            to = idx;
            break;
        }
        cur += w;
    }
    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..from]);
    out.push_str(&s[to..]);
    out
}

/// Insert `text` at display column `col`, shifting the remainder right.
pub fn column_insert(s: &str, col: usize, text: &str) -> String {
    let at = byte_at_column(s, col);
    let mut out = String::with_capacity(s.len() + text.len());
    out.push_str(&s[..at]);
    out.push_str(text);
    out.push_str(&s[at..]);
    out
}

/// Replace the columns under `text` starting at `col` (overwrite mode).
pub fn column_overwrite(s: &str, col: usize, text: &str) -> String {
    let at = byte_at_column(s, col);
    let rest = column_tail(s, col.saturating_add(display_width(text)));
    let mut out = String::with_capacity(s.len() + text.len());
    out.push_str(&s[..at]);
    out.push_str(text);
    out.push_str(rest);
    out
}

/// True when `s` is non-empty and made only of filler glyphs.
pub fn is_filler_run(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c == FILLER)
}

/// Width of the filler-run the cursor would consume moving right from `col`.
///
/// Looks at the next `tab_size` columns (fewer at end of line); returns their
/// width when they are all fillers.
pub fn filler_run_after(s: &str, col: usize, tab_size: usize) -> Option<usize> {
    let window = column_substring(s, col, tab_size.max(1));
    is_filler_run(window).then(|| display_width(window))
}

/// Width of the filler-run immediately left of `col`, mirroring
/// [`filler_run_after`]; near line start the partial run back to column 0
/// counts as a whole run.
pub fn filler_run_before(s: &str, col: usize, tab_size: usize) -> Option<usize> {
    let start = col.saturating_sub(tab_size.max(1));
    let window = column_substring(s, start, col - start);
    is_filler_run(window).then(|| display_width(window))
}

/// Column of the first glyph that is neither a space nor a filler.
///
/// Returns 0 for a blank line.
pub fn first_non_blank_column(s: &str) -> usize {
    let mut cur = 0;
    for ch in s.chars() {
        if ch != ' ' && ch != FILLER {
            return cur;
        }
        cur += glyph_width(ch);
    }
    0
}

/// Leading run of spaces/fillers, empty when the line is entirely blank.
pub fn leading_indent(s: &str) -> &str {
    match s.find(|c: char| c != ' ' && c != FILLER) {
        Some(idx) => &s[..idx],
        None => "",
    }
}

/// Expand every tab in `text` into `tab_size` filler glyphs.
pub fn expand_tabs(text: &str, tab_size: usize) -> String {
    if !text.contains('\t') {
        return text.to_string();
    }
    let run = FILLER.to_string().repeat(tab_size);
    text.replace('\t', &run)
}

/// Turn leading filler-runs of exactly `tab_size` back into tabs.
///
/// Only indentation is contracted; fillers after the first other glyph are
/// left alone since they may be real spaces.
pub fn contract_tabs(text: &str, tab_size: usize) -> String {
    if tab_size == 0 {
        return text.to_string();
    }
    let indent = text.len() - text.trim_start_matches(FILLER).len();
    let tabs = indent / tab_size;
    if tabs == 0 {
        return text.to_string();
    }
    let mut out = "\t".repeat(tabs);
    out.push_str(&text[tabs * tab_size..]);
    out
}
