//! Pre-order traversal that drives one rewrite pass.

use super::buffer::EditBuffer;
use super::error::RewriteError;
use super::fold::decompose;
use super::node::NodeKind;
use super::slicer::SourceSlicer;
use super::static_assert::normalize;
use super::{PassReport, Rejection, RewriteOutcome};
use crate::cst::{classify, CstNode, CstTree, PackIndex};

/// Whether the traversal continues into a node's children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descent {
    /// Visit the children
    Recurse,
    /// Leave the subtree to a later pass
    SkipChildren,
}

/// Descent policy for a visited node.
///
/// A rewritten node's text is replaced wholesale, so its children would produce
/// overlapping edits. Fold expressions always stop descent; nested folds are
/// picked up once the outer one has been rewritten and the output re-parsed.
#[must_use]
pub fn descent_for(kind: &NodeKind, outcome: &RewriteOutcome) -> Descent {
    match (kind, outcome) {
        (NodeKind::FoldExpr(_), _) => Descent::SkipChildren,
        (NodeKind::StaticAssert(_), RewriteOutcome::Rewritten(_)) => Descent::SkipChildren,
        _ => Descent::Recurse,
    }
}

/// Walks one parsed file and records its edits.
///
/// The controller is active until [`finish`](Self::finish) consumes it and
/// emits the rewritten text.
#[derive(Debug)]
pub struct TraversalController<'t> {
    tree: &'t CstTree,
    slicer: SourceSlicer<'t>,
    packs: PackIndex,
    buffer: EditBuffer<'t>,
    visited: usize,
}

impl<'t> TraversalController<'t> {
    /// Prepare a pass over `tree`
    #[must_use]
    pub fn new(tree: &'t CstTree) -> Self {
        Self {
            tree,
            slicer: SourceSlicer::new(tree),
            packs: PackIndex::collect(tree),
            buffer: EditBuffer::new(&tree.source),
            visited: 0,
        }
    }

    /// Walk every top-level declaration in source order.
    ///
    /// # Errors
    /// Stops at the first unsupported construct or broken invariant.
    pub fn run(&mut self) -> Result<(), RewriteError> {
        let tree = self.tree;
        for declaration in tree.declarations() {
            self.walk(declaration)?;
        }
        Ok(())
    }

    fn walk(&mut self, root: &'t CstNode) -> Result<(), RewriteError> {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if self.visit(node)? == Descent::Recurse {
                stack.extend(node.children.iter().rev());
            }
        }
        Ok(())
    }

    fn visit(&mut self, node: &'t CstNode) -> Result<Descent, RewriteError> {
        self.visited += 1;
        let kind = classify(node, self.tree, &self.packs)?;
        tracing::trace!(kind = node.kind, offset = node.start_byte, "visit");

        let outcome = self.dispatch(&kind)?;
        let descent = descent_for(&kind, &outcome);
        match outcome {
            RewriteOutcome::Rewritten(edit) => self.buffer.replace(edit)?,
            RewriteOutcome::Unchanged => {}
            RewriteOutcome::Rejected(Rejection::MemberPointerFold { op, range }) => {
                return Err(RewriteError::Unsupported {
                    op,
                    offset: range.begin,
                    text: self.slicer.slice_range(range)?.to_owned(),
                });
            }
        }
        Ok(descent)
    }

    fn dispatch(&self, kind: &NodeKind) -> Result<RewriteOutcome, RewriteError> {
        match kind {
            NodeKind::FoldExpr(fold) => decompose(fold, &self.slicer),
            NodeKind::StaticAssert(assertion) => normalize(assertion, &self.slicer),
            NodeKind::Other => Ok(RewriteOutcome::Unchanged),
        }
    }

    /// Emit the rewritten text. No edit can be recorded afterwards.
    #[must_use]
    pub fn finish(self) -> PassReport {
        let (text, edits) = self.buffer.finish();
        tracing::debug!(visited = self.visited, edits = edits.len(), "pass finished");
        PassReport {
            text,
            edits,
            visited: self.visited,
        }
    }
}
