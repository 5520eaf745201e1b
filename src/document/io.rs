//! Loading and saving documents.
//!
//! Saving never overwrites the destination in place: the text is written to
//! `<path>.tmp` first and only renamed over the destination once the write
//! succeeded. An optional backup renames the old file to `<path>.back`.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use super::{Document, DocumentError, Encoding, LineEnding};
use crate::text::width::{contract_tabs, expand_tabs};

/// Options controlling how a document is written back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// Rename the existing file to `<path>.back` before replacing it.
    pub backup: bool,
    /// Contract leading filler-runs of this width back into tabs.
    pub restore_tabs: Option<usize>,
}

/// Split decoded file text into logical lines.
///
/// Tabs are expanded to `tab_size` fillers and a trailing `\r` is stripped
/// from each line; any stripped `\r` switches the result to [`LineEnding::Dos`].
pub fn split_lines(text: &str, tab_size: usize) -> (Vec<String>, LineEnding) {
    let mut dos = false;
    let lines: Vec<String> = text
        .split('\n')
        .map(|raw| {
            let raw = raw.strip_suffix('\r').map_or(raw, |stripped| {
                dos = true;
                stripped
            });
            expand_tabs(raw, tab_size)
        })
        .collect();
    let ending = if dos { LineEnding::Dos } else { LineEnding::Unix };
    (lines, ending)
}

impl Document {
    /// Read `path` into a new document.
    ///
    /// Malformed input under UTF-8 falls back to Latin-1 so every byte
    /// survives a load/save round trip.
    ///
    /// # Errors
    /// Returns [`DocumentError::Read`] when the file cannot be read.
    pub fn load(path: &Path, tab_size: usize, encoding: Encoding) -> Result<Self, DocumentError> {
        let bytes = fs::read(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let (mut text, had_errors) = encoding.decode(&bytes);
        let mut used = encoding;
        if had_errors {
            if encoding == Encoding::Utf8 {
                tracing::warn!(path = %path.display(), "malformed UTF-8, falling back to latin1");
                text = Encoding::Latin1.decode(&bytes).0;
                used = Encoding::Latin1;
            } else {
                tracing::warn!(path = %path.display(), %encoding, "malformed input replaced while decoding");
            }
        }

        let (lines, ending) = split_lines(&text, tab_size);
        tracing::debug!(path = %path.display(), lines = lines.len(), ?ending, %used, "loaded file");

        let mut doc = Self::from_lines(lines);
        doc.set_line_ending(ending);
        doc.set_encoding(used);
        doc.set_path(Some(path.to_path_buf()));
        Ok(doc)
    }

    /// Write the document to `path` through a temporary file.
    ///
    /// Backup-rename and permission failures are logged and do not fail the
    /// save. On success the document is marked clean.
    ///
    /// # Errors
    /// Returns [`DocumentError::Write`] when the temporary file cannot be
    /// written (the destination is untouched), or [`DocumentError::Rename`]
    /// when it cannot be moved over the destination.
    pub fn save_to(&mut self, path: &Path, options: SaveOptions) -> Result<(), DocumentError> {
        let tmp = with_suffix(path, ".tmp");
        let bytes = self.encoded_bytes(options.restore_tabs);

        if let Err(source) = fs::write(&tmp, &bytes) {
            let _ = fs::remove_file(&tmp);
            return Err(DocumentError::Write { path: tmp, source });
        }

        if options.backup && path.exists() {
            let back = with_suffix(path, ".back");
            if let Err(err) = fs::rename(path, &back) {
                tracing::warn!(path = %path.display(), error = %err, "backup rename failed");
            }
        }

        fs::rename(&tmp, path).map_err(|source| DocumentError::Rename {
            from: tmp.clone(),
            to: path.to_path_buf(),
            source,
        })?;

        restore_permissions(path);
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved file");
        self.mark_clean();
        Ok(())
    }

    fn encoded_bytes(&self, restore_tabs: Option<usize>) -> Vec<u8> {
        let mut text = self.text();
        if let Some(tab_size) = restore_tabs {
            text = self
                .lines()
                .iter()
                .map(|line| contract_tabs(line, tab_size))
                .collect::<Vec<_>>()
                .join(self.line_ending().as_str());
        }
        let (bytes, lossy) = self.encoding().encode(&text);
        if lossy {
            tracing::warn!(encoding = %self.encoding(), "unrepresentable characters substituted on save");
        }
        bytes.into_owned()
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(unix)]
fn restore_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Err(err) = fs::set_permissions(path, fs::Permissions::from_mode(0o644)) {
        tracing::warn!(path = %path.display(), error = %err, "failed to restore permissions");
    }
}

#[cfg(not(unix))]
fn restore_permissions(path: &Path) {
    match fs::metadata(path) {
        Ok(meta) => {
            let mut perms = meta.permissions();
            perms.set_readonly(false);
            if let Err(err) = fs::set_permissions(path, perms) {
                tracing::warn!(path = %path.display(), error = %err, "failed to restore permissions");
            }
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to read metadata");
        }
    }
}
