//! Tree-sitter based CST parser for C++ source code.
//!
//! Provides the byte-precise token layout the rewrite engine slices from.

use tree_sitter::{Node, Parser};

/// A CST node with exact source location
#[derive(Debug, Clone)]
pub struct CstNode {
    /// Node kind (e.g., "fold_expression", "identifier", "...")
    pub kind: &'static str,
    /// Start byte offset (inclusive)
    pub start_byte: usize,
    /// End byte offset (exclusive)
    pub end_byte: usize,
    /// Whether this is a named node (vs anonymous like punctuation)
    pub is_named: bool,
    /// Whether the parser inserted this node during error recovery
    pub is_missing: bool,
    /// Child nodes
    pub children: Vec<CstNode>,
}

impl CstNode {
    /// Create a `CstNode` from a tree-sitter `Node`
    fn from_ts_node(node: Node<'_>) -> Self {
        let mut children = Vec::new();
        let mut cursor = node.walk();
        if cursor.goto_first_child() {
            loop {
                children.push(Self::from_ts_node(cursor.node()));
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
        }

        Self {
            kind: node.kind(),
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            is_named: node.is_named(),
            is_missing: node.is_missing(),
            children,
        }
    }

    /// Whether this node is a leaf token
    #[must_use]
    pub fn is_token(&self) -> bool {
        self.children.is_empty()
    }

    /// Whether this node is a comment (an "extra" that may appear anywhere)
    #[must_use]
    pub fn is_comment(&self) -> bool {
        self.kind == "comment"
    }

    /// Check if this node's range contains the given byte offset
    #[must_use]
    pub fn contains_byte(&self, byte: usize) -> bool {
        byte >= self.start_byte && byte < self.end_byte
    }

    /// Start byte of the last token of this node.
    ///
    /// Trailing comments are skipped, they are not part of the construct.
    #[must_use]
    pub fn last_token_start(&self) -> usize {
        let mut node = self;
        while let Some(last) = node
            .children
            .iter()
            .rev()
            .find(|c| !c.is_comment() && c.end_byte > c.start_byte)
        {
            node = last;
        }
        node.start_byte
    }

    /// Children that take part in the syntax (comments and zero-width nodes dropped)
    pub fn significant_children(&self) -> impl Iterator<Item = &CstNode> {
        self.children
            .iter()
            .filter(|c| !c.is_comment() && !c.is_missing)
    }

    /// Whether this subtree contains an `ERROR` node or a missing token
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.kind == "ERROR" || self.is_missing || self.children.iter().any(CstNode::has_errors)
    }

    /// First `ERROR` or missing node in document order
    #[must_use]
    pub fn first_error(&self) -> Option<&CstNode> {
        if self.kind == "ERROR" || self.is_missing {
            return Some(self);
        }
        self.children.iter().find_map(CstNode::first_error)
    }

    /// Find all nodes of a specific kind
    #[must_use]
    pub fn find_by_kind(&self, kind: &str) -> Vec<&CstNode> {
        let mut result = Vec::new();
        self.find_by_kind_recursive(kind, &mut result);
        result
    }

    fn find_by_kind_recursive<'a>(&'a self, kind: &str, result: &mut Vec<&'a CstNode>) {
        if self.kind == kind {
            result.push(self);
        }
        for child in &self.children {
            child.find_by_kind_recursive(kind, result);
        }
    }

    /// Collect leaf tokens in document order
    pub fn tokens<'a>(&'a self, out: &mut Vec<&'a CstNode>) {
        if self.is_token() {
            if self.end_byte > self.start_byte {
                out.push(self);
            }
            return;
        }
        for child in &self.children {
            child.tokens(out);
        }
    }
}

/// A parsed CST tree
#[derive(Debug)]
pub struct CstTree {
    /// Root node of the CST
    pub root: CstNode,
    /// Original source code
    pub source: String,
}

impl CstTree {
    /// Extract a slice of source code by byte range
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &str {
        &self.source[start..end]
    }

    /// Resolve the end of the token that starts at `pos`.
    ///
    /// Returns `None` when no token starts at `pos`.
    #[must_use]
    pub fn token_end(&self, pos: usize) -> Option<usize> {
        let mut node = &self.root;
        loop {
            if node.is_token() {
                return (node.start_byte == pos && node.end_byte > pos).then_some(node.end_byte);
            }
            // Zero-width children never hold a token, skip them.
            node = node
                .children
                .iter()
                .find(|c| c.end_byte > c.start_byte && c.contains_byte(pos))?;
        }
    }

    /// Whether the parse needed error recovery anywhere
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.root.has_errors()
    }

    /// Top-level declarations of the translation unit, in source order
    pub fn declarations(&self) -> impl Iterator<Item = &CstNode> {
        self.root.children.iter()
    }

    /// Find all fold expressions
    #[must_use]
    pub fn find_folds(&self) -> Vec<&CstNode> {
        self.root.find_by_kind("fold_expression")
    }

    /// Find all static assertions
    #[must_use]
    pub fn find_static_asserts(&self) -> Vec<&CstNode> {
        self.root.find_by_kind("static_assert_declaration")
    }
}

/// Error during CST parsing
#[derive(Debug, thiserror::Error)]
pub enum CstError {
    /// Failed to create parser
    #[error("Failed to create CST parser: {0}")]
    ParserCreation(String),
    /// Failed to parse source
    #[error("Failed to parse source as C++")]
    ParseFailed,
}

/// Tree-sitter based CST parser
pub struct CstParser {
    parser: Parser,
}

impl CstParser {
    /// Create a new CST parser for C++
    ///
    /// # Errors
    /// Returns error if parser creation fails
    pub fn new() -> Result<Self, CstError> {
        let mut parser = Parser::new();

        // Use the LANGUAGE constant exported by tree-sitter-cpp crate
        parser
            .set_language(&tree_sitter_cpp::LANGUAGE.into())
            .map_err(|e| CstError::ParserCreation(e.to_string()))?;

        Ok(Self { parser })
    }

    /// Parse source code into a CST
    ///
    /// # Errors
    /// Returns error if parsing fails
    pub fn parse(&mut self, source: &str) -> Result<CstTree, CstError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(CstError::ParseFailed)?;

        let root = CstNode::from_ts_node(tree.root_node());

        Ok(CstTree {
            root,
            source: source.to_owned(),
        })
    }
}
