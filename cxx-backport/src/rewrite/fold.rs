//! Fold-expression decomposition.
//!
//! `(init op ... op pack)` becomes `fold_expr_<op>_left(init, pack...)` and
//! `(pack op ... op init)` becomes `fold_expr_<op>_right(pack..., init)`.
//! The trailing `...` stays a literal marker; expanding it into per-argument
//! applications is left to whoever provides the `fold_expr_*` helpers.

use super::buffer::Edit;
use super::error::RewriteError;
use super::node::{FoldDirection, FoldExpr};
use super::operators::operator_name;
use super::slicer::SourceSlicer;
use super::{Rejection, RewriteOutcome};

/// Rewrite one fold expression.
pub fn decompose(fold: &FoldExpr, slicer: &SourceSlicer<'_>) -> Result<RewriteOutcome, RewriteError> {
    let pattern = slicer.slice_range(fold.pattern)?;

    if fold.operator.is_member_pointer() {
        return Ok(RewriteOutcome::Rejected(Rejection::MemberPointerFold {
            op: fold.operator,
            range: fold.range,
        }));
    }
    let op_name = operator_name(fold.operator).ok_or(RewriteError::UnmappedOperator {
        op: fold.operator,
        offset: fold.range.begin,
    })?;

    let init = fold
        .init
        .map(|range| slicer.slice_range(range))
        .transpose()?;

    let replacement = compose(op_name, fold.direction, pattern, init);
    let end = slicer.resolve_end(fold.range.end)?;

    tracing::debug!(
        offset = fold.range.begin,
        original = &slicer.source()[fold.range.begin..end],
        %replacement,
        "rewriting fold expression"
    );

    Ok(RewriteOutcome::Rewritten(Edit::with_description(
        fold.range.begin,
        end,
        replacement,
        format!("fold over `{}`", fold.operator),
    )))
}

/// Build the call-like expansion of a fold.
#[must_use]
pub fn compose(op_name: &str, direction: FoldDirection, pattern: &str, init: Option<&str>) -> String {
    let mut out = String::with_capacity(
        "fold_expr__right(..., )".len() + op_name.len() + pattern.len() + init.map_or(0, str::len),
    );
    out.push_str("fold_expr_");
    out.push_str(op_name);
    out.push('_');
    out.push_str(direction.suffix());
    out.push('(');

    if let (FoldDirection::Left, Some(init)) = (direction, init) {
        out.push_str(init);
        out.push_str(", ");
    }
    out.push_str(pattern);
    out.push_str("...");
    if let (FoldDirection::Right, Some(init)) = (direction, init) {
        out.push_str(", ");
        out.push_str(init);
    }

    out.push(')');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_left_with_init() {
        assert_eq!(
            compose("add", FoldDirection::Left, "args", Some("0")),
            "fold_expr_add_left(0, args...)"
        );
    }

    #[test]
    fn test_compose_left_without_init() {
        assert_eq!(
            compose("land", FoldDirection::Left, "args", None),
            "fold_expr_land_left(args...)"
        );
    }

    #[test]
    fn test_compose_right_without_init() {
        assert_eq!(
            compose("add", FoldDirection::Right, "args", None),
            "fold_expr_add_right(args...)"
        );
    }

    #[test]
    fn test_compose_right_with_init() {
        assert_eq!(
            compose("add", FoldDirection::Right, "args", Some("0")),
            "fold_expr_add_right(args..., 0)"
        );
    }

    #[test]
    fn test_compose_keeps_operand_text_verbatim() {
        assert_eq!(
            compose("comma", FoldDirection::Right, "f( args ,\n 1 )", None),
            "fold_expr_comma_right(f( args ,\n 1 )...)"
        );
    }
}
