use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::document::Encoding;
use crate::editor::EditorSettings;
use crate::ui::viewport::ScrollTuning;

/// Editor options as read from a config file or the command line.
///
/// Unset valued options stay `None` so a later source can fill them in.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EditorFlags {
    pub tab_size: Option<usize>,
    pub tab_stop: Option<usize>,
    pub backup: bool,
    pub line_numbers: bool,
    pub read_only: bool,
    pub indent: bool,
    pub restore_tabs: bool,
    pub encoding: Option<Encoding>,
    pub scroll_slack: Option<usize>,
    pub scroll_margin: Option<usize>,
    pub undo_limit: Option<usize>,
}

impl EditorFlags {
    /// Merge `other` over `self`: booleans are OR-ed, valued options from
    /// `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            tab_size: other.tab_size.or(self.tab_size),
            tab_stop: other.tab_stop.or(self.tab_stop),
            backup: self.backup || other.backup,
            line_numbers: self.line_numbers || other.line_numbers,
            read_only: self.read_only || other.read_only,
            indent: self.indent || other.indent,
            restore_tabs: self.restore_tabs || other.restore_tabs,
            encoding: other.encoding.or(self.encoding),
            scroll_slack: other.scroll_slack.or(self.scroll_slack),
            scroll_margin: other.scroll_margin.or(self.scroll_margin),
            undo_limit: other.undo_limit.or(self.undo_limit),
        }
    }

    /// Resolve to engine settings, filling defaults for unset options.
    pub fn settings(&self) -> EditorSettings {
        let defaults = EditorSettings::default();
        let scroll = ScrollTuning::default();
        EditorSettings {
            tab_size: self.tab_size.unwrap_or(defaults.tab_size).max(1),
            tab_stop: self.tab_stop.unwrap_or(defaults.tab_stop).max(1),
            backup: self.backup,
            line_numbers: self.line_numbers,
            read_only: self.read_only,
            indent_mode: self.indent,
            restore_tabs: self.restore_tabs,
            encoding: self.encoding.unwrap_or(defaults.encoding),
            scroll: ScrollTuning {
                slack: self.scroll_slack.unwrap_or(scroll.slack),
                margin: self.scroll_margin.unwrap_or(scroll.margin),
            },
            undo_limit: self.undo_limit.unwrap_or(defaults.undo_limit).max(1),
        }
    }
}

/// Name of the per-directory override file.
const LOCAL_FILE: &str = ".paneditrc";

/// Platform config directory for panedit, if the environment names one.
fn config_dir() -> Option<PathBuf> {
    let base = if cfg!(target_os = "windows") {
        PathBuf::from(std::env::var_os("APPDATA")?)
    } else if cfg!(target_os = "macos") {
        PathBuf::from(std::env::var_os("HOME")?).join("Library/Application Support")
    } else {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?
    };
    Some(base.join("panedit"))
}

/// User-wide defaults file, falling back to the local override file when
/// no config directory can be found.
pub fn global_config_path() -> PathBuf {
    config_dir().map_or_else(local_override_path, |dir| dir.join("config"))
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(LOCAL_FILE)
}

/// Read editor flags from a config file. A missing file yields defaults.
///
/// The file holds the same flags as the command line, any number per line;
/// blank lines and `#` comments are skipped. See [`parse_flag_tokens`] for
/// the flag grammar.
pub fn load_config_flags(path: &Path) -> Result<EditorFlags> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(EditorFlags::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read config {}", path.display()));
        }
    };
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(str::split_whitespace)
        .map(ToOwned::to_owned)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &EditorFlags) -> Result<()> {
    let mut lines = vec!["# panedit defaults (saved with --save)".to_string()];
    let valued = [
        ("--tab-size", flags.tab_size),
        ("--tab-stop", flags.tab_stop),
        ("--scroll-slack", flags.scroll_slack),
        ("--scroll-margin", flags.scroll_margin),
        ("--undo-limit", flags.undo_limit),
    ];
    for (name, value) in valued {
        if let Some(value) = value {
            lines.push(format!("{name} {value}"));
        }
    }
    let switches = [
        ("--backup", flags.backup),
        ("--line-numbers", flags.line_numbers),
        ("--read-only", flags.read_only),
        ("--indent", flags.indent),
        ("--restore-tabs", flags.restore_tabs),
    ];
    lines.extend(
        switches
            .iter()
            .filter(|(_, on)| *on)
            .map(|(name, _)| (*name).to_string()),
    );
    if let Some(encoding) = flags.encoding {
        lines.push(format!("--encoding {encoding}"));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Delete a saved config file. Clearing a file that is not there succeeds.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Err(err) if err.kind() != std::io::ErrorKind::NotFound => {
            Err(err).with_context(|| format!("Failed to remove {}", path.display()))
        }
        _ => Ok(()),
    }
}

/// Pick the editor flags out of a token list, ignoring anything unknown.
///
/// Switches: `--backup`, `--line-numbers`, `--read-only`, `--indent`,
/// `--restore-tabs`. Valued: `--tab-size`, `--tab-stop`, `--scroll-slack`,
/// `--scroll-margin`, `--undo-limit` (numbers) and `--encoding` (a name
/// accepted by [`Encoding::from_name`]). Valued flags take either
/// `--flag value` or `--flag=value`; unparsable values are skipped.
pub fn parse_flag_tokens(tokens: &[String]) -> EditorFlags {
    let mut flags = EditorFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (token, None),
        };
        match name {
            "--backup" => flags.backup = true,
            "--line-numbers" => flags.line_numbers = true,
            "--read-only" => flags.read_only = true,
            "--indent" => flags.indent = true,
            "--restore-tabs" => flags.restore_tabs = true,
            "--tab-size" | "--tab-stop" | "--scroll-slack" | "--scroll-margin"
            | "--undo-limit" | "--encoding" => {
                let value = match inline {
                    Some(value) => Some(value),
                    None => {
                        let next = tokens.get(i + 1).map(String::as_str);
                        if next.is_some() {
                            i += 1;
                        }
                        next
                    }
                };
                if let Some(value) = value {
                    apply_valued(&mut flags, name, value);
                }
            }
            _ => {}
        }
        i += 1;
    }
    flags
}

fn apply_valued(flags: &mut EditorFlags, name: &str, value: &str) {
    if name == "--encoding" {
        flags.encoding = Encoding::from_name(value);
        return;
    }
    let number = value.parse().ok();
    match name {
        "--tab-size" => flags.tab_size = number,
        "--tab-stop" => flags.tab_stop = number,
        "--scroll-slack" => flags.scroll_slack = number,
        "--scroll-margin" => flags.scroll_margin = number,
        "--undo-limit" => flags.undo_limit = number,
        _ => {}
    }
}
