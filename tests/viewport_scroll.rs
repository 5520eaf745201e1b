use panedit::document::Document;
use panedit::editor::{Editor, Motion};
use panedit::ui::viewport::{ScrollTuning, Viewport};

fn assert_cursor_visible(editor: &Editor) {
    let line = editor.position().line;
    let range = editor.viewport().visible_range();
    assert!(
        range.contains(&line),
        "cursor line {line} outside {range:?}"
    );
    let rows = editor.rows();
    let last = rows.last().unwrap();
    assert!(
        !(last.line == line && last.continues),
        "cursor line {line} is cut off at the bottom"
    );
}

#[test]
fn test_walk_down_and_up_through_wrapped_lines() {
    let lines: Vec<String> = (0..80)
        .map(|i| if i % 3 == 0 { "w".repeat(45) } else { format!("short {i}") })
        .collect();
    let mut editor = Editor::with_lines(&lines).with_size(20, 12);

    for _ in 0..79 {
        editor.move_cursor(Motion::Down);
        assert_cursor_visible(&editor);
    }
    assert_eq!(editor.position().line, 79);

    for _ in 0..79 {
        editor.move_cursor(Motion::Up);
        assert_cursor_visible(&editor);
    }
    assert_eq!(editor.position().line, 0);
    assert_eq!(editor.viewport().first_line(), 0);
}

#[test]
fn test_scroll_advances_one_line_at_a_time() {
    let lines: Vec<String> = (0..100).map(|i| format!("line {i}")).collect();
    let mut editor = Editor::with_lines(&lines).with_size(40, 20);
    let mut previous = editor.viewport().first_line();
    for _ in 0..99 {
        editor.move_down();
        let first = editor.viewport().first_line();
        assert!(first == previous || first == previous + 1, "jumped {previous} -> {first}");
        previous = first;
    }
}

#[test]
fn test_typing_long_line_keeps_cursor_visible() {
    let lines: Vec<String> = (0..30).map(|i| format!("{i}")).collect();
    let mut editor = Editor::with_lines(&lines).with_size(10, 8);
    editor.goto_last();
    for _ in 0..20 {
        editor.input_data("xyz");
        assert_cursor_visible(&editor);
    }
}

#[test]
fn test_page_down_to_end_and_back() {
    let lines: Vec<String> = (0..300).map(|i| format!("row {i}")).collect();
    let mut editor = Editor::with_lines(&lines).with_size(30, 15);
    while editor.position().line < 299 {
        editor.page_down();
        assert_cursor_visible(&editor);
    }
    while editor.position().line > 0 {
        editor.page_up();
        assert_cursor_visible(&editor);
    }
}

#[test]
fn test_custom_tuning_changes_goto_context() {
    let doc = Document::from_lines((0..100).map(|i| i.to_string()));
    let mut vp = Viewport::new(20, 30).with_tuning(ScrollTuning { slack: 4, margin: 3 });
    vp.go_to_line(50);
    vp.justify(&doc, 50);
    assert_eq!(vp.first_line(), 46);
}
