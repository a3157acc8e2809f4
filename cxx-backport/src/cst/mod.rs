//! CST (Concrete Syntax Tree) front-end for C++ sources.
//!
//! Tree-sitter gives us every token with its exact byte range, which is all the
//! rewrite engine needs:
//! - Verbatim slicing of operands, comments and whitespace included
//! - Fold expressions and static assertions located by node kind
//! - Parameter packs recovered from their declarations
//!
//! # Design Principles
//!
//! - **Byte-range anchored**: positions are byte offsets into the original buffer
//! - **Syntax only**: no name lookup or template instantiation; pack membership
//!   is inferred from declarators

mod classify;
mod packs;
mod parser;

pub use classify::classify;
pub use packs::{is_plain_literal, PackIndex};
pub use parser::{CstError, CstNode, CstParser, CstTree};
