//! Parameter pack bookkeeping.
//!
//! Binary folds `(E op ... op I)` are only directional once we know which
//! operand mentions an unexpanded pack. Tree-sitter has no name resolution,
//! so packs are collected from their declarations: a pack name is always the
//! identifier that directly follows the `...` of its declarator
//! (`typename... Ts`, `Ts&&... args`, `auto... xs`, `[...xs = args]`).

use compact_str::CompactString;
use rustc_hash::FxHashSet;

use super::parser::{CstNode, CstTree};

/// Node kinds whose subtree already expands (or counts) any pack it mentions.
const EXPANDING_KINDS: &[&str] = &["parameter_pack_expansion", "fold_expression"];

/// Identifier token kinds a pack can be named by.
const IDENTIFIER_KINDS: &[&str] = &["identifier", "type_identifier"];

/// Token kinds that make an operand a plain literal.
const LITERAL_KINDS: &[&str] = &[
    "number_literal",
    "string_literal",
    "raw_string_literal",
    "char_literal",
    "true",
    "false",
    "nullptr",
    "concatenated_string",
];

/// Names declared as parameter packs anywhere in one translation unit.
#[derive(Debug, Default, Clone)]
pub struct PackIndex {
    names: FxHashSet<CompactString>,
}

impl PackIndex {
    /// Collect the pack names declared in `tree`.
    #[must_use]
    pub fn collect(tree: &CstTree) -> Self {
        let mut tokens = Vec::new();
        tree.root.tokens(&mut tokens);

        let mut names = FxHashSet::default();
        let mut significant = tokens.iter().filter(|t| !t.is_comment()).peekable();
        while let Some(token) = significant.next() {
            if token.kind != "..." {
                continue;
            }
            if let Some(next) = significant.peek() {
                if IDENTIFIER_KINDS.contains(&next.kind) {
                    names.insert(CompactString::from(
                        tree.slice(next.start_byte, next.end_byte),
                    ));
                }
            }
        }

        tracing::trace!(packs = names.len(), "collected parameter pack names");
        Self { names }
    }

    /// Whether `name` was declared as a pack
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of distinct pack names
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no packs were declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether `node` mentions a pack that is not already expanded inside it.
    #[must_use]
    pub fn mentions_unexpanded(&self, node: &CstNode, tree: &CstTree) -> bool {
        if EXPANDING_KINDS.contains(&node.kind) || is_sizeof_pack(node) {
            return false;
        }
        if node.is_token() {
            return IDENTIFIER_KINDS.contains(&node.kind)
                && self.contains(tree.slice(node.start_byte, node.end_byte));
        }
        node.children
            .iter()
            .any(|child| self.mentions_unexpanded(child, tree))
    }
}

/// `sizeof...(Ts)` names a pack without expanding it into operands.
fn is_sizeof_pack(node: &CstNode) -> bool {
    node.kind == "sizeof_expression" && node.children.iter().any(|c| c.kind == "...")
}

/// Whether `node` is a single literal (possibly parenthesized).
#[must_use]
pub fn is_plain_literal(node: &CstNode) -> bool {
    if LITERAL_KINDS.contains(&node.kind) {
        return true;
    }
    if node.kind == "parenthesized_expression" {
        let inner: Vec<&CstNode> = node.significant_children().filter(|c| c.is_named).collect();
        return inner.len() == 1 && is_plain_literal(inner[0]);
    }
    false
}
