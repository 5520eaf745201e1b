//! The collaborator interface the editor drives.
//!
//! The engine never knows about a concrete UI. The host is told when to
//! redraw and is asked to show prompts; prompts are answered later through
//! [`super::Editor::resolve_prompt`], and the editor ignores every other
//! command while one is outstanding.

/// What an outstanding input prompt is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// "Go to line" number entry.
    GotoLine,
    /// Search string entry.
    Find,
}

impl PromptKind {
    /// Dialog title.
    pub const fn title(self) -> &'static str {
        match self {
            Self::GotoLine => "Go to Line Number",
            Self::Find => "Find",
        }
    }

    /// Dialog prompt text.
    pub const fn text(self) -> &'static str {
        match self {
            Self::GotoLine => "Enter the line number to move.",
            Self::Find => "Enter the text to find.",
        }
    }
}

/// Render-notify and prompt capabilities supplied by the UI.
///
/// Every method has a no-op default so hosts only implement what they need.
pub trait EditorHost {
    /// Called once after a successful load.
    fn post_load(&mut self) {}

    /// Called after a mutation touching `count` lines starting at `line`.
    /// `None` means "redraw everything".
    fn post_update_lines(&mut self, _line: Option<usize>, _count: Option<usize>) {}

    /// Ask the user for a line of text. The answer arrives asynchronously
    /// through `Editor::resolve_prompt`.
    fn input_box(&mut self, _kind: PromptKind, _title: &str, _text: &str) {}

    /// Show a message. The editor does not wait for the chosen button.
    fn message_box(&mut self, _title: &str, _text: &str, _buttons: &[&str]) {}
}

/// A host that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl EditorHost for NullHost {}
