//! Verbatim source slicing over token ranges.

use super::error::SliceError;
use super::node::SourceRange;
use crate::cst::{CstNode, CstTree};

/// Reads original text for token ranges of one parsed file.
#[derive(Debug, Clone, Copy)]
pub struct SourceSlicer<'t> {
    tree: &'t CstTree,
}

impl<'t> SourceSlicer<'t> {
    /// Create a slicer over `tree`
    #[must_use]
    pub fn new(tree: &'t CstTree) -> Self {
        Self { tree }
    }

    /// Original source text
    #[must_use]
    pub fn source(&self) -> &'t str {
        &self.tree.source
    }

    /// Resolve `end` (start of a token) to the byte just past that token.
    pub fn resolve_end(&self, end: usize) -> Result<usize, SliceError> {
        let len = self.tree.source.len();
        if end >= len {
            return Err(SliceError::OutOfBounds { pos: end, len });
        }
        self.tree
            .token_end(end)
            .ok_or(SliceError::NoTokenAt { pos: end })
    }

    /// Text from `begin` through the end of the token starting at `end`.
    pub fn slice(&self, begin: usize, end: usize) -> Result<&'t str, SliceError> {
        if begin > end {
            return Err(SliceError::Reversed { begin, end });
        }
        let resolved = self.resolve_end(end)?;
        Ok(&self.tree.source[begin..resolved])
    }

    /// Text of a closed token range
    pub fn slice_range(&self, range: SourceRange) -> Result<&'t str, SliceError> {
        self.slice(range.begin, range.end)
    }

    /// Text of a whole node
    pub fn slice_node(&self, node: &CstNode) -> Result<&'t str, SliceError> {
        self.slice_range(SourceRange::of(node))
    }
}
