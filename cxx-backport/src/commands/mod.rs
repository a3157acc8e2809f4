//! Commands module - CLI command implementations.

mod rewrite;

pub use rewrite::{
    process_file, run_rewrite, FileReport, FileStatus, RewriteOptions, RewriteReport,
    RewriteSummary,
};
