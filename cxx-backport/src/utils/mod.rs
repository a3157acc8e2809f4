//! Utilities module.
//!
//! Path handling, source discovery and position formatting.

mod paths;

pub use paths::{
    collect_cpp_files, has_extension, is_excluded, normalize_display_path,
    validate_path_within_root,
};

/// A utility struct to convert byte offsets to line numbers.
///
/// The engine works with byte offsets; diagnostics are reported as `line:column`.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Stores the byte index of the start of each line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a new `LineIndex` by scanning the source code for newlines.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        // '\n' is always a single byte in UTF-8
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Converts a byte offset to a 1-indexed line number.
    #[must_use]
    pub fn line_index(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// Converts a byte offset to 1-indexed `(line, column)`; the column counts bytes.
    #[must_use]
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = self.line_index(offset);
        let start = self.line_starts.get(line - 1).copied().unwrap_or(0);
        (line, offset - start + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("int a;\nint b;\n\nint c;\n");
        assert_eq!(index.line_index(0), 1);
        assert_eq!(index.line_index(6), 1);
        assert_eq!(index.line_index(7), 2);
        assert_eq!(index.line_index(14), 3);
        assert_eq!(index.line_index(15), 4);
    }

    #[test]
    fn test_line_col() {
        let index = LineIndex::new("int a;\n  (x + ...);\n");
        assert_eq!(index.line_col(0), (1, 1));
        assert_eq!(index.line_col(9), (2, 3));
    }
}
