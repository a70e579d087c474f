/*!
 * Line-oriented document model.
 */

use std::path::{Path, PathBuf};

/// A markup document as an ordered list of lines.
///
/// Lines are split on `\n` only, so joining them back with `\n` reproduces
/// the source byte for byte (including `\r` and a trailing newline).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Where the document was read from
    path: PathBuf,

    /// Lines without their `\n` terminator
    lines: Vec<String>,
}

impl Document {
    /// Build a document from raw file content
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Self {
        Self {
            path: path.into(),
            lines: content.split('\n').map(str::to_string).collect(),
        }
    }

    /// Build a document from already split lines
    pub fn from_lines(path: impl Into<PathBuf>, lines: Vec<String>) -> Self {
        Self {
            path: path.into(),
            lines,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Render the document back to text
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}
