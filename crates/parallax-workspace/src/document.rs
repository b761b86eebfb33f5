//! Documents — rope-backed text addressed by (line, col).
//!
//! A `Document` wraps a [`ropey::Rope`] with the few queries the workspace
//! needs to keep cursors valid: line count, line content length, and
//! clamping an arbitrary [`Position`] into the text. Columns are char
//! offsets, matching how the rope indexes text.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parallax_core::{DocumentRef, Position};
use ropey::Rope;

/// A text document in the vault.
#[derive(Debug, Clone)]
pub struct Document {
    reference: DocumentRef,
    rope: Rope,
}

impl Document {
    /// Create a document from a string. `path` is vault-relative.
    #[must_use]
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        Self {
            reference: DocumentRef::new(path),
            rope: Rope::from_str(text),
        }
    }

    /// Load `root/relative` from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid UTF-8.
    pub fn from_file(root: &Path, relative: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(root.join(relative))?;
        Ok(Self::from_text(relative, &text))
    }

    #[inline]
    #[must_use]
    pub const fn reference(&self) -> &DocumentRef {
        &self.reference
    }

    /// Total number of lines. An empty document has 1 line.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Number of chars in a line excluding the trailing line ending
    /// (`\n`, `\r\n`, `\r`). `None` if the line doesn't exist.
    #[must_use]
    pub fn line_content_len(&self, line: usize) -> Option<usize> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let rope_line = self.rope.line(line);
        let total = rope_line.len_chars();
        if total == 0 {
            return Some(0);
        }
        let len = match rope_line.char(total - 1) {
            '\n' if total >= 2 && rope_line.char(total - 2) == '\r' => total - 2,
            '\n' | '\r' => total - 1,
            _ => total,
        };
        Some(len)
    }

    /// Clamp `pos` into the document. The column may sit just past the last
    /// char of the line, like an insert-mode cursor.
    #[must_use]
    pub fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.line_count().saturating_sub(1));
        let max_col = self.line_content_len(line).unwrap_or(0);
        Position::new(line, pos.col.min(max_col))
    }

    /// The full text.
    #[must_use]
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }
}
