//! Byte-range edit buffer.
//!
//! Records the replacements of one pass over one file and emits the rewritten
//! text exactly once. Overlapping edits are refused as they are recorded, so the
//! buffer always holds a consistent edit set.

use super::error::EditError;

/// A single replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Start byte offset (inclusive)
    pub start_byte: usize,
    /// End byte offset (exclusive)
    pub end_byte: usize,
    /// Replacement content
    pub replacement: String,
    /// Optional description for logging
    pub description: Option<String>,
}

impl Edit {
    /// Create a new edit
    #[must_use]
    pub fn new(start_byte: usize, end_byte: usize, replacement: impl Into<String>) -> Self {
        Self {
            start_byte,
            end_byte,
            replacement: replacement.into(),
            description: None,
        }
    }

    /// Create an edit with description
    #[must_use]
    pub fn with_description(
        start_byte: usize,
        end_byte: usize,
        replacement: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            start_byte,
            end_byte,
            replacement: replacement.into(),
            description: Some(description.into()),
        }
    }

    /// Check if this edit overlaps with another
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start_byte < other.end_byte && other.start_byte < self.end_byte
    }
}

/// Pending edits over one source text
#[derive(Debug, Clone)]
pub struct EditBuffer<'s> {
    /// Original source code
    source: &'s str,
    /// Accepted edits, in the order they were recorded
    edits: Vec<Edit>,
}

impl<'s> EditBuffer<'s> {
    /// Create a new buffer for the given source
    #[must_use]
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            edits: Vec::new(),
        }
    }

    /// Record an edit.
    ///
    /// # Errors
    /// Returns error if the edit is out of bounds, splits a character, or
    /// overlaps an edit recorded earlier. The buffer is left unchanged.
    pub fn replace(&mut self, edit: Edit) -> Result<(), EditError> {
        let edit_index = self.edits.len();
        check_bounds(self.source, &edit, edit_index)?;
        if let Some(edit_a) = self.edits.iter().position(|e| e.overlaps(&edit)) {
            return Err(EditError::OverlappingEdits {
                edit_a,
                edit_b: edit_index,
            });
        }
        self.edits.push(edit);
        Ok(())
    }

    /// Get the number of recorded edits
    #[must_use]
    pub fn edit_count(&self) -> usize {
        self.edits.len()
    }

    /// Check if there are any recorded edits
    #[must_use]
    pub fn has_edits(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Apply all edits and return the rewritten text with the edits, sorted by position.
    ///
    /// Consumes the buffer: no edit can be recorded after the text is emitted.
    /// Edits are applied in reverse order (by start position) to preserve
    /// byte offsets as we modify the string.
    #[must_use]
    pub fn finish(self) -> (String, Vec<Edit>) {
        let mut sorted_edits = self.edits;
        sorted_edits.sort_by_key(|e| e.start_byte);

        // Bounds, boundaries and overlap were checked in `replace`
        let mut result = self.source.to_owned();
        for edit in sorted_edits.iter().rev() {
            result.replace_range(edit.start_byte..edit.end_byte, &edit.replacement);
        }

        (result, sorted_edits)
    }
}

fn check_bounds(source: &str, edit: &Edit, edit_index: usize) -> Result<(), EditError> {
    if edit.end_byte > source.len() || edit.start_byte > edit.end_byte {
        return Err(EditError::OutOfBounds {
            edit_index,
            end_byte: edit.end_byte,
            source_len: source.len(),
        });
    }
    if !source.is_char_boundary(edit.start_byte) || !source.is_char_boundary(edit.end_byte) {
        return Err(EditError::NotCharBoundary { edit_index });
    }
    Ok(())
}
