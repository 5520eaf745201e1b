use panedit::editor::{
    Command, EditMode, Editor, EditorHost, EditorSettings, Motion, NullHost, Position, PromptKind,
    UndoOp,
};

fn editor_with_tab_size(lines: &[&str], tab_size: usize) -> Editor {
    let settings = EditorSettings {
        tab_size,
        ..EditorSettings::default()
    };
    let mut editor = Editor::new(NullHost, settings);
    editor.load_lines(
        lines
            .iter()
            .map(|line| panedit::text::width::expand_tabs(line, tab_size)),
    );
    editor
}

#[test]
fn test_delete_at_line_end_joins_lines() {
    let mut editor = Editor::with_lines(["abc", "de"]);
    editor.move_to(0, 3);
    editor.delete_forward();
    assert_eq!(editor.lines(), vec!["abcde"]);
    assert_eq!(editor.position(), Position::new(0, 3));
}

#[test]
fn test_move_right_skips_expanded_tab() {
    let mut editor = editor_with_tab_size(&["\tfoo"], 4);
    assert_eq!(editor.lines(), vec!["    foo"]);
    editor.move_right();
    assert_eq!(editor.position(), Position::new(0, 4));
}

#[test]
fn test_enter_splits_without_indent_carry() {
    let mut editor = Editor::with_lines(["hello"]);
    editor.move_to(0, 2);
    editor.enter();
    assert_eq!(editor.lines(), vec!["he", "llo"]);
    assert_eq!(editor.position(), Position::new(1, 0));
    let record = editor.last_undo().unwrap();
    assert_eq!(record.op(), UndoOp::Split);
    assert_eq!(record.saved(), ["hello"]);
}

#[test]
fn test_tab_on_selection_is_one_indent_record() {
    let mut editor = editor_with_tab_size(&["a", "b"], 2);
    editor.select_to(Motion::Down);
    assert!(matches!(editor.mode(), EditMode::ShiftSelect(_)));
    editor.tab();
    assert_eq!(editor.lines(), vec!["  a", "  b"]);
    assert_eq!(editor.undo_depth(), 1);
    assert!(editor.mode().is_edit());

    let record = editor.last_undo().unwrap();
    assert_eq!(record.op(), UndoOp::Indent);
    assert_eq!(record.op().code(), -1);
    assert_eq!(record.first_line(), 0);
    assert_eq!(record.saved(), ["a", "b"]);
    assert_eq!(record.replaced(), 2);

    editor.undo();
    assert_eq!(editor.lines(), vec!["a", "b"]);
}

#[test]
fn test_preferred_column_restored_after_short_line() {
    let mut editor = Editor::with_lines(["a long line here", "ab", "another long line"]);
    editor.move_to(0, 10);
    editor.move_down();
    assert_eq!(editor.position(), Position::new(1, 2));
    editor.move_up();
    assert_eq!(editor.position(), Position::new(0, 10));
}

#[test]
fn test_deleting_everything_leaves_one_line() {
    let mut editor = Editor::with_lines(["ab", "cd", "ef"]);
    editor.select_all();
    editor.delete_forward();
    assert_eq!(editor.lines(), vec![""]);
    editor.backspace();
    editor.delete_forward();
    assert_eq!(editor.line_count(), 1);
}

#[derive(Default)]
struct PromptLog {
    prompts: Vec<PromptKind>,
    messages: Vec<String>,
}

impl EditorHost for PromptLog {
    fn input_box(&mut self, kind: PromptKind, _title: &str, _text: &str) {
        self.prompts.push(kind);
    }

    fn message_box(&mut self, title: &str, text: &str, _buttons: &[&str]) {
        self.messages.push(format!("{title}: {text}"));
    }
}

#[test]
fn test_goto_prompt_blocks_input_until_resolved() {
    let mut editor = Editor::new(PromptLog::default(), EditorSettings::default());
    editor.load_lines((1..=200).map(|n| format!("line {n}")));

    editor.apply(Command::GotoLinePrompt);
    assert_eq!(editor.host().prompts, vec![PromptKind::GotoLine]);
    editor.apply(Command::Input("x".into()));
    editor.apply(Command::Move(Motion::Down));
    assert_eq!(editor.position(), Position::new(0, 0));
    assert!(!editor.is_dirty());

    editor.resolve_prompt(Some("150"));
    assert_eq!(editor.position().line, 149);
    assert!(editor.viewport().visible_range().contains(&149));
}

#[test]
fn test_goto_prompt_rejects_garbage() {
    let mut editor = Editor::new(PromptLog::default(), EditorSettings::default());
    editor.load_lines(["a", "b", "c"]);
    editor.goto_line_prompt();
    editor.resolve_prompt(Some("twelve"));
    assert_eq!(editor.host().messages, vec!["ERROR: Invalid input number"]);
    assert_eq!(editor.position().line, 2);
}

#[test]
fn test_goto_prompt_clamps_out_of_range_numbers() {
    let mut editor = Editor::new(PromptLog::default(), EditorSettings::default());
    editor.load_lines(["a", "b", "c"]);
    editor.move_to(1, 0);
    editor.goto_line_prompt();
    editor.resolve_prompt(Some("-5"));
    assert_eq!(editor.position().line, 0);

    editor.goto_line_prompt();
    editor.resolve_prompt(Some("40"));
    assert_eq!(editor.position().line, 2);
    assert!(editor.host().messages.is_empty());
}

#[test]
fn test_find_not_found_shows_message() {
    let mut editor = Editor::new(PromptLog::default(), EditorSettings::default());
    editor.load_lines(["alpha", "beta"]);
    editor.find_prompt();
    editor.resolve_prompt(Some("gamma"));
    assert_eq!(editor.host().prompts, vec![PromptKind::Find]);
    assert_eq!(editor.host().messages.len(), 1);
    assert_eq!(editor.position(), Position::new(0, 0));
}

#[test]
fn test_key_replay_edits_document() {
    let mut editor = Editor::with_lines(["first", "second"]);
    for key in ["down", "end", "text: line", "enter", "text:third", "up", "home", "delete"] {
        editor.apply(key.parse().unwrap());
    }
    assert_eq!(editor.lines(), vec!["first", "econd line", "third"]);
}

#[test]
fn test_block_cut_and_paste_moves_column() {
    let mut editor = Editor::with_lines(["12ab", "34cd"]);
    editor.move_to(0, 2);
    editor.toggle_block_select();
    editor.move_to(1, 4);
    editor.cut();
    assert_eq!(editor.lines(), vec!["12", "34"]);
    editor.move_to(0, 0);
    editor.paste();
    assert_eq!(editor.lines(), vec!["ab12", "cd34"]);
}
