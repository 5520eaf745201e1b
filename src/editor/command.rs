use std::str::FromStr;

use super::Editor;
use super::cursor::Motion;
use super::host::EditorHost;

/// Every action a host can dispatch to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Navigation
    /// Plain cursor movement
    Move(Motion),
    /// Shift-modified movement, extends a selection
    Select(Motion),
    /// Jump to a 1-based line number
    GotoLine(usize),
    /// Ask the host for a line number
    GotoLinePrompt,

    // Editing
    /// Delete key
    Delete,
    /// Backspace key
    Backspace,
    /// Enter key
    Enter,
    /// Tab key
    Tab,
    /// Shift+Tab
    Untab,
    /// Typed text
    Input(String),
    /// Revert the last mutation
    Undo,

    // Selection and clipboard
    /// Toggle stream selection
    ToggleSelect,
    /// Toggle block selection
    ToggleBlockSelect,
    SelectAll,
    Copy,
    Cut,
    Paste,
    /// Drop the selection
    Escape,

    // Search
    /// Ask the host for a search string
    FindPrompt,
    /// Search for the given text
    Find(String),
    /// Repeat the last search
    FindNext,

    // Modes
    ToggleInsert,
    ToggleIndent,
    ToggleLineNumbers,
}

/// Unrecognised command name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command: {0}")]
pub struct ParseCommandError(String);

fn parse_motion(name: &str) -> Option<Motion> {
    Some(match name {
        "left" => Motion::Left,
        "right" => Motion::Right,
        "up" => Motion::Up,
        "down" => Motion::Down,
        "home" => Motion::Home,
        "end" => Motion::End,
        "pageup" | "pgup" => Motion::PageUp,
        "pagedown" | "pgdn" => Motion::PageDown,
        "top" | "ctrl-home" => Motion::FileStart,
        "bottom" | "ctrl-end" => Motion::FileEnd,
        _ => return None,
    })
}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// Parse a key name such as `left`, `shift-down`, `text:abc`,
    /// `goto:12` or `find:foo`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(text) = s.strip_prefix("text:") {
            return Ok(Self::Input(text.to_string()));
        }
        if let Some(text) = s.strip_prefix("find:") {
            return Ok(Self::Find(text.to_string()));
        }
        if let Some(number) = s.strip_prefix("goto:") {
            return number
                .parse()
                .map(Self::GotoLine)
                .map_err(|_| ParseCommandError(s.to_string()));
        }

        let name = s.to_ascii_lowercase();
        if let Some(motion) = name.strip_prefix("shift-").and_then(parse_motion) {
            return Ok(Self::Select(motion));
        }
        if let Some(motion) = parse_motion(&name) {
            return Ok(Self::Move(motion));
        }

        Ok(match name.as_str() {
            "goto" => Self::GotoLinePrompt,
            "delete" | "del" => Self::Delete,
            "backspace" | "bs" => Self::Backspace,
            "enter" | "return" => Self::Enter,
            "tab" => Self::Tab,
            "untab" | "shift-tab" => Self::Untab,
            "space" => Self::Input(" ".to_string()),
            "undo" => Self::Undo,
            "select" => Self::ToggleSelect,
            "block" => Self::ToggleBlockSelect,
            "select-all" => Self::SelectAll,
            "copy" => Self::Copy,
            "cut" => Self::Cut,
            "paste" => Self::Paste,
            "escape" | "esc" => Self::Escape,
            "find" => Self::FindPrompt,
            "find-next" => Self::FindNext,
            "insert" => Self::ToggleInsert,
            "indent" => Self::ToggleIndent,
            "line-numbers" => Self::ToggleLineNumbers,
            _ => return Err(ParseCommandError(s.to_string())),
        })
    }
}

impl<H: EditorHost> Editor<H> {
    /// Dispatch one command.
    pub fn apply(&mut self, command: Command) {
        tracing::trace!(parent: &self.span, ?command, "apply");
        match command {
            Command::Move(motion) => self.move_cursor(motion),
            Command::Select(motion) => self.select_to(motion),
            Command::GotoLine(number) => self.goto_line(number),
            Command::GotoLinePrompt => self.goto_line_prompt(),
            Command::Delete => self.delete_forward(),
            Command::Backspace => self.backspace(),
            Command::Enter => self.enter(),
            Command::Tab => self.tab(),
            Command::Untab => self.untab(),
            Command::Input(text) => self.input_data(&text),
            Command::Undo => {
                self.undo();
            }
            Command::ToggleSelect => self.toggle_select(),
            Command::ToggleBlockSelect => self.toggle_block_select(),
            Command::SelectAll => self.select_all(),
            Command::Copy => self.copy(),
            Command::Cut => self.cut(),
            Command::Paste => self.paste(),
            Command::Escape => self.escape(),
            Command::FindPrompt => self.find_prompt(),
            Command::Find(text) => {
                self.find(&text);
            }
            Command::FindNext => {
                self.find_next();
            }
            Command::ToggleInsert => self.toggle_insert(),
            Command::ToggleIndent => self.toggle_indent(),
            Command::ToggleLineNumbers => self.toggle_line_numbers(),
        }
    }
}
