//! Core library for the cxx-backport source rewriter.
//!
//! Rewrites C++17 fold expressions into `fold_expr_<op>_<direction>(...)` calls
//! and gives message-less `static_assert` declarations an empty message, so the
//! result builds with C++11/14 compilers once the `fold_expr_*` helpers exist.
//! Everything else in a file is reproduced byte for byte.

#![allow(clippy::similar_names, clippy::items_after_statements)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

/// Tree-sitter front-end: parsing, pack discovery and node classification.
pub mod cst;

/// Module containing the rewrite engine.
/// One pass over one translation unit: slicer, rewriters, traversal and edit buffer.
pub mod rewrite;

/// Repeated passes until the text is stable.
pub mod fixpoint;

/// Module for loading configuration.
pub mod config;

/// Module containing utility functions.
pub mod utils;

/// Module defining the entry point logic shared by both binaries.
pub mod entry_point;

/// Module containing shared constants.
pub mod constants;

/// Module for rich CLI output formatting with colored text and progress bars.
pub mod output;

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for handling CLI commands and their execution logic.
pub mod commands;

/// Diagnostic logging setup.
pub mod logging;
