//! Static assertions without a message gain an empty one.

use super::buffer::Edit;
use super::error::RewriteError;
use super::node::StaticAssert;
use super::slicer::SourceSlicer;
use super::RewriteOutcome;

/// Rewrite `static_assert(cond)` to `static_assert(cond, "")`.
pub fn normalize(
    assertion: &StaticAssert,
    slicer: &SourceSlicer<'_>,
) -> Result<RewriteOutcome, RewriteError> {
    if assertion.message.is_some() {
        return Ok(RewriteOutcome::Unchanged);
    }

    let condition = slicer.slice_range(assertion.condition)?;
    let replacement = format!("static_assert({condition}, \"\")");
    let end = slicer.resolve_end(assertion.range.end)?;

    tracing::debug!(
        offset = assertion.range.begin,
        %replacement,
        "adding empty static_assert message"
    );

    Ok(RewriteOutcome::Rewritten(Edit::with_description(
        assertion.range.begin,
        end,
        replacement,
        "static_assert message",
    )))
}
