//! Views of the syntax nodes the engine rewrites.

use super::operators::BinaryOperator;
use crate::cst::CstNode;

/// Closed token range in the original source.
///
/// `end` is the start of the last token, not the byte after it; the slicer
/// resolves it to the token's full extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceRange {
    /// First byte of the first token
    pub begin: usize,
    /// First byte of the last token
    pub end: usize,
}

impl SourceRange {
    /// Create a range from its first and last token starts
    #[must_use]
    pub const fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }

    /// Range covering a whole node
    #[must_use]
    pub fn of(node: &CstNode) -> Self {
        Self {
            begin: node.start_byte,
            end: node.last_token_start(),
        }
    }
}

/// Associativity of a fold expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldDirection {
    /// `(... op E)` or `(I op ... op E)`
    Left,
    /// `(E op ...)` or `(E op ... op I)`
    Right,
}

impl FoldDirection {
    /// Suffix used in the synthesized call name
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// A fold expression, decomposed by the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldExpr {
    /// Opening through closing parenthesis
    pub range: SourceRange,
    /// The folded operator
    pub operator: BinaryOperator,
    /// Associativity
    pub direction: FoldDirection,
    /// Sub-expression expanded across the pack
    pub pattern: SourceRange,
    /// Initial value of a binary fold
    pub init: Option<SourceRange>,
}

/// A static assertion declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticAssert {
    /// `static_assert` keyword through the closing parenthesis
    pub range: SourceRange,
    /// Asserted condition
    pub condition: SourceRange,
    /// Diagnostic message, if any
    pub message: Option<SourceRange>,
}

/// The node kinds the traversal dispatches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A fold expression
    FoldExpr(FoldExpr),
    /// A static assertion
    StaticAssert(StaticAssert),
    /// Anything else
    Other,
}
