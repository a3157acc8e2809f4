//! Source-to-source rewrite engine.
//!
//! One pass walks a parsed translation unit, turns every fold expression into a
//! `fold_expr_<op>_<direction>(...)` call and gives every message-less
//! `static_assert` an empty message. Everything else is reproduced byte for byte.

mod buffer;
mod error;
mod fold;
mod node;
pub mod operators;
mod slicer;
mod static_assert;
mod traversal;

pub use buffer::{Edit, EditBuffer};
pub use error::{EditError, RewriteError, SliceError};
pub use fold::{compose, decompose};
pub use node::{FoldDirection, FoldExpr, NodeKind, SourceRange, StaticAssert};
pub use operators::{operator_name, BinaryOperator};
pub use slicer::SourceSlicer;
pub use static_assert::normalize as normalize_static_assert;
pub use traversal::{descent_for, Descent, TraversalController};

use crate::cst::CstTree;

/// A construct the engine refuses to rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Fold over `.*` or `->*`
    MemberPointerFold {
        /// The rejected operator
        op: BinaryOperator,
        /// Range of the fold expression
        range: SourceRange,
    },
}

/// Result of handing one node to its rewriter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// The node is replaced
    Rewritten(Edit),
    /// Nothing to do
    Unchanged,
    /// The node cannot be rewritten; fails the file
    Rejected(Rejection),
}

/// What one pass over one file produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    /// Rewritten text
    pub text: String,
    /// Applied edits, sorted by position
    pub edits: Vec<Edit>,
    /// Number of nodes visited
    pub visited: usize,
}

impl PassReport {
    /// Whether the pass changed anything
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.edits.is_empty()
    }
}

/// Run exactly one rewrite pass over `tree`.
///
/// # Errors
/// Returns the first fatal error; no partial text is produced.
pub fn rewrite_pass(tree: &CstTree) -> Result<PassReport, RewriteError> {
    let mut controller = TraversalController::new(tree);
    controller.run()?;
    Ok(controller.finish())
}
