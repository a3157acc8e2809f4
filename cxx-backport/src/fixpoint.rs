//! Repeated passes until the text stops changing.
//!
//! A pass never descends into a rewritten fold, so `((args * ...) + ...)`
//! needs one pass per nesting level. Each pass re-parses the previous output.

use crate::constants::DEFAULT_MAX_PASSES;
use crate::cst::{CstParser, CstTree};
use crate::rewrite::{rewrite_pass, PassReport, RewriteError};

/// Knobs of the fixpoint loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixpointOptions {
    /// Give up after this many passes that still produced edits
    pub max_passes: usize,
    /// Rewrite sources the parser had to recover from
    pub allow_parse_errors: bool,
}

impl Default for FixpointOptions {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
            allow_parse_errors: false,
        }
    }
}

/// Outcome of normalizing one source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// Final text
    pub text: String,
    /// Passes run, including the final one that produced no edits
    pub passes: usize,
    /// Edit count of every pass that changed something
    pub edits_per_pass: Vec<usize>,
    /// Whether the final text differs from the input
    pub changed: bool,
}

impl Normalized {
    /// Total number of rewrites over all passes
    #[must_use]
    pub fn total_edits(&self) -> usize {
        self.edits_per_pass.iter().sum()
    }
}

/// Parse `source` and run one pass over it.
///
/// # Errors
/// Fails on parse errors (unless allowed) and on any rewrite error.
pub fn single_pass(
    parser: &mut CstParser,
    source: &str,
    allow_parse_errors: bool,
) -> Result<PassReport, RewriteError> {
    let tree = parser.parse(source)?;
    check_syntax(&tree, allow_parse_errors)?;
    rewrite_pass(&tree)
}

fn check_syntax(tree: &CstTree, allow_parse_errors: bool) -> Result<(), RewriteError> {
    if allow_parse_errors {
        return Ok(());
    }
    match tree.root.first_error() {
        Some(node) => Err(RewriteError::SyntaxErrors {
            offset: node.start_byte,
        }),
        None => Ok(()),
    }
}

/// Rewrite `source` until a pass produces no edits.
///
/// # Errors
/// Returns [`RewriteError::NoFixpoint`] when `max_passes` passes all changed
/// the text, or the first error of any pass.
pub fn normalize(source: &str, options: &FixpointOptions) -> Result<Normalized, RewriteError> {
    let mut parser = CstParser::new()?;
    let mut text = source.to_owned();
    let mut edits_per_pass = Vec::new();

    for pass in 1..=options.max_passes.saturating_add(1) {
        let report = single_pass(&mut parser, &text, options.allow_parse_errors)?;
        if !report.changed() {
            return Ok(Normalized {
                changed: text != source,
                text,
                passes: pass,
                edits_per_pass,
            });
        }
        if pass > options.max_passes {
            break;
        }
        tracing::debug!(pass, edits = report.edits.len(), "pass changed text");
        edits_per_pass.push(report.edits.len());
        text = report.text;
    }

    Err(RewriteError::NoFixpoint {
        passes: options.max_passes,
    })
}
