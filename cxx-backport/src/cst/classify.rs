//! Maps CST nodes to the node kinds the rewrite engine dispatches on.

use smallvec::SmallVec;

use super::packs::{is_plain_literal, PackIndex};
use super::parser::{CstNode, CstTree};
use crate::rewrite::{
    BinaryOperator, FoldDirection, FoldExpr, NodeKind, RewriteError, SourceRange, StaticAssert,
};

const FOLD_EXPRESSION: &str = "fold_expression";
const STATIC_ASSERT: &str = "static_assert_declaration";

/// Classify `node`.
///
/// Nodes that are neither fold expressions nor static assertions are `Other`.
pub fn classify(
    node: &CstNode,
    tree: &CstTree,
    packs: &PackIndex,
) -> Result<NodeKind, RewriteError> {
    match node.kind {
        FOLD_EXPRESSION => classify_fold(node, tree, packs).map(NodeKind::FoldExpr),
        STATIC_ASSERT => classify_static_assert(node).map(NodeKind::StaticAssert),
        _ => Ok(NodeKind::Other),
    }
}

fn malformed(node: &CstNode) -> RewriteError {
    RewriteError::MalformedNode {
        kind: node.kind,
        offset: node.start_byte,
    }
}

fn operator_of(token: &CstNode, tree: &CstTree) -> Result<BinaryOperator, RewriteError> {
    let text = tree.slice(token.start_byte, token.end_byte);
    BinaryOperator::from_token(text).ok_or_else(|| RewriteError::UnknownOperator {
        token: text.to_owned(),
        offset: token.start_byte,
    })
}

/// Decompose `( ... )` by position:
///
/// - `... op E`: unary left fold
/// - `E op ...`: unary right fold
/// - `E op ... op E`: binary fold, direction decided by which side holds the pack
fn classify_fold(
    node: &CstNode,
    tree: &CstTree,
    packs: &PackIndex,
) -> Result<FoldExpr, RewriteError> {
    let children: SmallVec<[&CstNode; 7]> = node.significant_children().collect();
    let (Some(open), Some(close)) = (children.first(), children.last()) else {
        return Err(malformed(node));
    };
    if children.len() < 5 || open.kind != "(" || close.kind != ")" {
        return Err(malformed(node));
    }
    let inner = &children[1..children.len() - 1];
    let range = SourceRange::new(open.start_byte, close.start_byte);

    match inner {
        [ellipsis, op, pattern] if ellipsis.kind == "..." => Ok(FoldExpr {
            range,
            operator: operator_of(op, tree)?,
            direction: FoldDirection::Left,
            pattern: SourceRange::of(pattern),
            init: None,
        }),
        [pattern, op, ellipsis] if ellipsis.kind == "..." => Ok(FoldExpr {
            range,
            operator: operator_of(op, tree)?,
            direction: FoldDirection::Right,
            pattern: SourceRange::of(pattern),
            init: None,
        }),
        [left, op, ellipsis, op2, right] if ellipsis.kind == "..." => {
            let operator = operator_of(op, tree)?;
            if operator_of(op2, tree)? != operator {
                return Err(malformed(node));
            }
            let direction = binary_fold_direction(node, left, right, tree, packs)?;
            let (pattern, init) = match direction {
                FoldDirection::Left => (right, left),
                FoldDirection::Right => (left, right),
            };
            Ok(FoldExpr {
                range,
                operator,
                direction,
                pattern: SourceRange::of(pattern),
                init: Some(SourceRange::of(init)),
            })
        }
        _ => Err(malformed(node)),
    }
}

fn binary_fold_direction(
    node: &CstNode,
    left: &CstNode,
    right: &CstNode,
    tree: &CstTree,
    packs: &PackIndex,
) -> Result<FoldDirection, RewriteError> {
    let left_pack = packs.mentions_unexpanded(left, tree);
    let right_pack = packs.mentions_unexpanded(right, tree);
    match (left_pack, right_pack) {
        (true, false) => Ok(FoldDirection::Right),
        (false, true) => Ok(FoldDirection::Left),
        _ => match (is_plain_literal(left), is_plain_literal(right)) {
            (false, true) => Ok(FoldDirection::Right),
            (true, false) => Ok(FoldDirection::Left),
            _ => Err(RewriteError::AmbiguousFold {
                offset: node.start_byte,
                text: tree.slice(node.start_byte, node.end_byte).to_owned(),
            }),
        },
    }
}

/// `static_assert ( cond [, message] ) ;`
fn classify_static_assert(node: &CstNode) -> Result<StaticAssert, RewriteError> {
    let children: SmallVec<[&CstNode; 7]> = node.significant_children().collect();
    let keyword = children.first().ok_or_else(|| malformed(node))?;
    let open = children
        .iter()
        .position(|c| c.kind == "(")
        .ok_or_else(|| malformed(node))?;
    let close = children
        .iter()
        .rposition(|c| c.kind == ")")
        .ok_or_else(|| malformed(node))?;
    if close <= open + 1 {
        return Err(malformed(node));
    }

    let args = &children[open + 1..close];
    let condition = args
        .iter()
        .find(|c| c.is_named)
        .ok_or_else(|| malformed(node))?;
    let message = args
        .iter()
        .position(|c| c.kind == ",")
        .and_then(|comma| args[comma + 1..].iter().find(|c| c.is_named));

    Ok(StaticAssert {
        range: SourceRange::new(keyword.start_byte, children[close].start_byte),
        condition: SourceRange::of(condition),
        message: message.map(|m| SourceRange::of(m)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::CstParser;

    fn first_of_kind(source: &str, kind: &str) -> NodeKind {
        let tree = CstParser::new().unwrap().parse(source).unwrap();
        let packs = PackIndex::collect(&tree);
        let node = tree.root.find_by_kind(kind)[0];
        classify(node, &tree, &packs).unwrap()
    }

    #[test]
    fn test_unary_right_fold() {
        let source = "template <typename... Ts>\nbool all(Ts... args) { return (args && ...); }\n";
        let NodeKind::FoldExpr(fold) = first_of_kind(source, "fold_expression") else {
            panic!("expected fold");
        };
        assert_eq!(fold.operator, BinaryOperator::LAnd);
        assert_eq!(fold.direction, FoldDirection::Right);
        assert_eq!(fold.init, None);
        assert_eq!(fold.range.begin, source.find("(args").unwrap());
        assert_eq!(fold.range.end, source.find("...)").unwrap() + 3);
    }

    #[test]
    fn test_unary_left_fold() {
        let source = "template <typename... Ts>\nint sum(Ts... args) { return (... + args); }\n";
        let NodeKind::FoldExpr(fold) = first_of_kind(source, "fold_expression") else {
            panic!("expected fold");
        };
        assert_eq!(fold.operator, BinaryOperator::Add);
        assert_eq!(fold.direction, FoldDirection::Left);
        assert_eq!(fold.pattern.begin, source.find("args);").unwrap());
    }

    #[test]
    fn test_binary_fold_direction_follows_pack() {
        let left = "template <typename... Ts>\nint f(Ts... args) { return (0 + ... + args); }\n";
        let NodeKind::FoldExpr(fold) = first_of_kind(left, "fold_expression") else {
            panic!("expected fold");
        };
        assert_eq!(fold.direction, FoldDirection::Left);
        assert_eq!(fold.init.map(|r| r.begin), Some(left.find("0 +").unwrap()));

        let right = "template <typename... Ts>\nint f(Ts... args) { return (args + ... + 0); }\n";
        let NodeKind::FoldExpr(fold) = first_of_kind(right, "fold_expression") else {
            panic!("expected fold");
        };
        assert_eq!(fold.direction, FoldDirection::Right);
        assert_eq!(fold.pattern.begin, right.find("args +").unwrap());
    }

    #[test]
    fn test_binary_fold_with_unknown_pack_falls_back_to_literal() {
        let source = "int f() { return (xs * ... * 1); }\n";
        let NodeKind::FoldExpr(fold) = first_of_kind(source, "fold_expression") else {
            panic!("expected fold");
        };
        assert_eq!(fold.direction, FoldDirection::Right);
    }

    #[test]
    fn test_static_assert_without_message() {
        let source = "static_assert(sizeof(int) == 4);\n";
        let NodeKind::StaticAssert(assertion) =
            first_of_kind(source, "static_assert_declaration")
        else {
            panic!("expected static_assert");
        };
        assert_eq!(assertion.message, None);
        assert_eq!(assertion.range, SourceRange::new(0, source.find(");").unwrap()));
        assert_eq!(assertion.condition.begin, "static_assert(".len());
    }

    #[test]
    fn test_static_assert_with_message() {
        let source = "static_assert(true, \"always\");\n";
        let NodeKind::StaticAssert(assertion) =
            first_of_kind(source, "static_assert_declaration")
        else {
            panic!("expected static_assert");
        };
        assert!(assertion.message.is_some());
    }

    #[test]
    fn test_other_nodes() {
        let source = "int x = (1 + 2);\n";
        assert_eq!(first_of_kind(source, "parenthesized_expression"), NodeKind::Other);
    }
}
