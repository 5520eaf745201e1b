//! Panedit - A headless driver for the line editing engine.
//!
//! # Usage
//!
//! ```bash
//! panedit notes.txt --keys down,end,text:!,enter --write
//! panedit notes.txt --line-numbers --width 40 --height 10
//! panedit notes.txt --keys goto:120 --read-only
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use panedit::config::{
    EditorFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};
use panedit::document::Encoding;
use panedit::editor::{Command, Editor, EditorHost, PromptKind};

/// Replay editing commands against a file and print the resulting view
#[derive(Parser, Debug)]
#[command(name = "panedit", version, about, long_about = None)]
struct Cli {
    /// Text file to edit
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Comma-separated commands to apply (e.g. `down,end,text:abc,enter`)
    #[arg(long, value_delimiter = ',')]
    keys: Vec<String>,

    /// Answers for go-to-line and find prompts, consumed in order
    #[arg(long, value_delimiter = ',')]
    answers: Vec<String>,

    /// Viewport width in cells
    #[arg(long, default_value_t = 80)]
    width: u16,

    /// Viewport height in rows
    #[arg(long, default_value_t = 24)]
    height: u16,

    /// Save the file after applying the commands
    #[arg(long)]
    write: bool,

    /// Columns per tab when expanding tabs and batch indenting
    #[arg(long, value_name = "N")]
    tab_size: Option<usize>,

    /// Tab key stop width
    #[arg(long, value_name = "N")]
    tab_stop: Option<usize>,

    /// Keep the previous file as <FILE>.back when saving
    #[arg(long)]
    backup: bool,

    /// Show line numbers
    #[arg(long)]
    line_numbers: bool,

    /// Open the file read-only
    #[arg(long)]
    read_only: bool,

    /// Carry indentation onto new lines
    #[arg(long)]
    indent: bool,

    /// Turn leading indentation back into tabs when saving
    #[arg(long)]
    restore_tabs: bool,

    /// File encoding
    #[arg(long, value_enum)]
    encoding: Option<Encoding>,

    /// Scroll hysteresis slack in lines
    #[arg(long, value_name = "N")]
    scroll_slack: Option<usize>,

    /// Scroll hysteresis margin in rows
    #[arg(long, value_name = "N")]
    scroll_margin: Option<usize>,

    /// Maximum number of undo steps kept
    #[arg(long, value_name = "N")]
    undo_limit: Option<usize>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// Host that answers prompts from a queue and reports messages on stderr.
#[derive(Debug, Default)]
struct ScriptedHost {
    answers: Vec<String>,
    asked: Option<PromptKind>,
}

impl EditorHost for ScriptedHost {
    fn input_box(&mut self, kind: PromptKind, title: &str, _text: &str) {
        tracing::debug!(title, "prompt");
        self.asked = Some(kind);
    }

    fn message_box(&mut self, title: &str, text: &str, _buttons: &[&str]) {
        eprintln!("[{title}] {text}");
    }
}

fn replay(editor: &mut Editor<ScriptedHost>, keys: &[String]) -> Result<()> {
    for key in keys.iter().filter(|key| !key.is_empty()) {
        let command: Command = key
            .parse()
            .with_context(|| format!("Invalid key {key:?}"))?;
        editor.apply(command);

        if editor.host_mut().asked.take().is_some() {
            let answer = if editor.host().answers.is_empty() {
                None
            } else {
                Some(editor.host_mut().answers.remove(0))
            };
            editor.resolve_prompt(answer.as_deref());
        }
    }
    Ok(())
}

fn print_view(editor: &Editor<ScriptedHost>) {
    let numbers = editor.shows_line_numbers();
    let digits = editor.line_count().to_string().len();
    for row in editor.rows() {
        if numbers {
            if row.chunk == 0 {
                print!("{:>digits$} ", row.line + 1);
            } else {
                print!("{:>digits$} ", "");
            }
        }
        println!("{}", row.text);
    }
    let cursor = editor.position();
    let mode = if editor.is_insert() { "INS" } else { "OVR" };
    let dirty = if editor.is_dirty() { " [+]" } else { "" };
    println!(
        "-- {} {}:{} {mode}{dirty} {}%",
        editor.title(),
        cursor.line + 1,
        cursor.col + 1,
        editor.viewport().scroll_percent(editor.line_count())
    );
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        EditorFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);
    let settings = effective.settings();

    // Verify file exists
    if !cli.file.exists() {
        anyhow::bail!("File not found: {}", cli.file.display());
    }

    let host = ScriptedHost {
        answers: cli.answers.clone(),
        asked: None,
    };
    let span = tracing::info_span!("editor", file = %cli.file.display());
    let mut editor = Editor::new(host, settings)
        .with_span(span)
        .with_size(cli.width, cli.height);
    editor
        .load(&cli.file, settings.read_only)
        .with_context(|| format!("Failed to open {}", cli.file.display()))?;
    editor.set_title(cli.file.display().to_string());

    replay(&mut editor, &cli.keys)?;
    print_view(&editor);

    if cli.write {
        editor.save(None).context("Save failed")?;
    }
    Ok(())
}
