//! Error types of the rewrite engine.

use super::operators::BinaryOperator;
use crate::cst::CstError;

/// A position handed to the slicer that does not name a token boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SliceError {
    /// Position lies past the end of the source
    #[error("position {pos} is out of bounds (source length {len})")]
    OutOfBounds {
        /// Offending position
        pos: usize,
        /// Length of the source
        len: usize,
    },
    /// Range end precedes its begin
    #[error("range begin {begin} lies after its end {end}")]
    Reversed {
        /// Begin of the range
        begin: usize,
        /// End of the range
        end: usize,
    },
    /// No token starts at the range end
    #[error("no token starts at position {pos}")]
    NoTokenAt {
        /// Offending position
        pos: usize,
    },
}

/// Error while recording or applying edits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// Two edits target overlapping ranges
    #[error("Overlapping edits at indices {edit_a} and {edit_b}")]
    OverlappingEdits {
        /// Index of first overlapping edit
        edit_a: usize,
        /// Index of second overlapping edit
        edit_b: usize,
    },
    /// Edit range is out of bounds
    #[error("Edit {edit_index} out of bounds: end_byte {end_byte} > source length {source_len}")]
    OutOfBounds {
        /// Index of the bad edit
        edit_index: usize,
        /// End byte of the edit
        end_byte: usize,
        /// Length of the source
        source_len: usize,
    },
    /// Edit range splits a UTF-8 character
    #[error("Edit {edit_index} does not start and end on character boundaries")]
    NotCharBoundary {
        /// Index of the bad edit
        edit_index: usize,
    },
}

/// Fatal outcome of rewriting one file.
///
/// Every variant aborts the file: partial output is never emitted.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    /// A fold over a member-pointer access operator
    #[error("fold expressions over member access operator `{op}` are not supported (at byte {offset}: `{text}`)")]
    Unsupported {
        /// The rejected operator
        op: BinaryOperator,
        /// Byte offset of the fold expression
        offset: usize,
        /// Original text of the fold expression
        text: String,
    },
    /// A foldable operator with no entry in the name table
    #[error("operator `{op}` has no fold name (at byte {offset})")]
    UnmappedOperator {
        /// The operator
        op: BinaryOperator,
        /// Byte offset of the fold expression
        offset: usize,
    },
    /// An operator token the engine does not recognize
    #[error("unknown fold operator `{token}` at byte {offset}")]
    UnknownOperator {
        /// Token text
        token: String,
        /// Byte offset of the token
        offset: usize,
    },
    /// A node whose children do not have the shape of its kind
    #[error("malformed {kind} at byte {offset}")]
    MalformedNode {
        /// Node kind
        kind: &'static str,
        /// Byte offset of the node
        offset: usize,
    },
    /// A binary fold where neither operand can be told apart as the pack
    #[error("cannot tell which operand of `{text}` holds the parameter pack (at byte {offset})")]
    AmbiguousFold {
        /// Byte offset of the fold expression
        offset: usize,
        /// Original text of the fold expression
        text: String,
    },
    /// The source did not parse cleanly
    #[error("syntax errors in source (first at byte {offset})")]
    SyntaxErrors {
        /// Byte offset of the first error node
        offset: usize,
    },
    /// Passes kept producing edits
    #[error("no fixpoint after {passes} passes")]
    NoFixpoint {
        /// Number of passes run
        passes: usize,
    },
    /// Invalid slice position
    #[error(transparent)]
    Slice(#[from] SliceError),
    /// Invalid edit
    #[error(transparent)]
    Edit(#[from] EditError),
    /// Front-end failure
    #[error(transparent)]
    Parse(#[from] CstError),
}

impl RewriteError {
    /// Whether the error comes from an unsupported construct rather than a broken contract
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    /// Byte offset in the pass input the error points at, if any
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Unsupported { offset, .. }
            | Self::UnmappedOperator { offset, .. }
            | Self::UnknownOperator { offset, .. }
            | Self::MalformedNode { offset, .. }
            | Self::AmbiguousFold { offset, .. }
            | Self::SyntaxErrors { offset } => Some(*offset),
            Self::Slice(SliceError::OutOfBounds { pos, .. } | SliceError::NoTokenAt { pos }) => {
                Some(*pos)
            }
            Self::Slice(SliceError::Reversed { begin, .. }) => Some(*begin),
            Self::NoFixpoint { .. } | Self::Edit(_) | Self::Parse(_) => None,
        }
    }
}
