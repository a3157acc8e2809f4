//! Single-pass rewrite behavior through the public API.

use cxx_backport::cst::CstParser;
use cxx_backport::rewrite::{rewrite_pass, BinaryOperator, PassReport, RewriteError};

const OPERATORS: &[(&str, &str)] = &[
    ("+", "add"),
    ("-", "sub"),
    ("*", "mul"),
    ("/", "div"),
    ("%", "mod"),
    ("^", "xor"),
    ("&", "and"),
    ("|", "or"),
    ("<<", "shl"),
    (">>", "shr"),
    ("+=", "add_assign"),
    ("-=", "sub_assign"),
    ("*=", "mul_assign"),
    ("/=", "div_assign"),
    ("%=", "mod_assign"),
    ("^=", "xor_assign"),
    ("&=", "and_assign"),
    ("|=", "or_assign"),
    ("<<=", "shl_assign"),
    (">>=", "shr_assign"),
    ("=", "assign"),
    ("==", "equals"),
    ("!=", "notequals"),
    ("<", "less"),
    (">", "greater"),
    ("<=", "lessequals"),
    (">=", "greaterequals"),
    ("&&", "land"),
    ("||", "lor"),
    (",", "comma"),
];

fn pass(source: &str) -> Result<PassReport, RewriteError> {
    let tree = CstParser::new().unwrap().parse(source).unwrap();
    assert!(!tree.has_errors(), "fixture does not parse cleanly: {source}");
    rewrite_pass(&tree)
}

fn rewrite_once(source: &str) -> String {
    pass(source).unwrap().text
}

fn in_function(expr: &str) -> String {
    format!("template <typename... Ts>\nauto f(Ts... args) {{ return {expr}; }}\n")
}

#[test]
fn test_every_operator_left_fold() {
    for (token, name) in OPERATORS {
        let source = in_function(&format!("(... {token} args)"));
        assert_eq!(
            rewrite_once(&source),
            in_function(&format!("fold_expr_{name}_left(args...)")),
            "operator {token}"
        );
    }
}

#[test]
fn test_every_operator_right_fold() {
    for (token, name) in OPERATORS {
        let source = in_function(&format!("(get(args) {token} ...)"));
        assert_eq!(
            rewrite_once(&source),
            in_function(&format!("fold_expr_{name}_right(get(args)...)")),
            "operator {token}"
        );
    }
}

#[test]
fn test_binary_left_fold() {
    assert_eq!(
        rewrite_once(&in_function("(0 + ... + args)")),
        in_function("fold_expr_add_left(0, args...)")
    );
}

#[test]
fn test_unary_right_fold() {
    assert_eq!(
        rewrite_once(&in_function("(args + ...)")),
        in_function("fold_expr_add_right(args...)")
    );
}

#[test]
fn test_binary_right_fold() {
    assert_eq!(
        rewrite_once(&in_function("(args + ... + 0)")),
        in_function("fold_expr_add_right(args..., 0)")
    );
}

#[test]
fn test_unary_left_logical_and() {
    assert_eq!(
        rewrite_once(&in_function("(... && args)")),
        in_function("fold_expr_land_left(args...)")
    );
}

#[test]
fn test_binary_fold_with_expression_init() {
    assert_eq!(
        rewrite_once(&in_function("(std::cout << ... << args)")),
        in_function("fold_expr_shl_left(std::cout, args...)")
    );
}

#[test]
fn test_alternative_operator_spelling() {
    assert_eq!(
        rewrite_once(&in_function("(args and ...)")),
        in_function("fold_expr_land_right(args...)")
    );
}

#[test]
fn test_operands_are_copied_verbatim() {
    assert_eq!(
        rewrite_once(&in_function("(g(args /* keep */,\n      1) * ...)")),
        in_function("fold_expr_mul_right(g(args /* keep */,\n      1)...)")
    );
}

#[test]
fn test_member_pointer_fold_is_rejected() {
    let source = "template <typename T, typename... Ms>\nauto get(T t, Ms... ms) { return (t .* ... .* ms); }\n";
    let err = pass(source).unwrap_err();
    match err {
        RewriteError::Unsupported { op, offset, text } => {
            assert_eq!(op, BinaryOperator::PtrMemD);
            assert_eq!(offset, source.find("(t .*").unwrap());
            assert_eq!(text, "(t .* ... .* ms)");
        }
        other => panic!("expected unsupported fold, got {other}"),
    }
}

#[test]
fn test_static_assert_gains_empty_message() {
    let source = "static_assert(sizeof(int) == 4);\n";
    assert_eq!(rewrite_once(source), "static_assert(sizeof(int) == 4, \"\");\n");
}

#[test]
fn test_static_assert_condition_spacing_is_kept() {
    let source = "static_assert(  A  &&\n  B );\n";
    assert_eq!(rewrite_once(source), "static_assert(A  &&\n  B, \"\");\n");
}

#[test]
fn test_static_assert_with_message_is_unchanged() {
    let source = "static_assert(sizeof(long) >= 4, \"long too small\");\n";
    let report = pass(source).unwrap();
    assert_eq!(report.text, source);
    assert!(report.edits.is_empty());
}

#[test]
fn test_static_assert_in_nested_scopes() {
    let source = "\
namespace outer {
struct Widget {
  static_assert(true);
  void run() {
    static_assert(sizeof(Widget) > 0);
  }
};
}  // namespace outer
";
    assert_eq!(
        rewrite_once(source),
        "\
namespace outer {
struct Widget {
  static_assert(true, \"\");
  void run() {
    static_assert(sizeof(Widget) > 0, \"\");
  }
};
}  // namespace outer
"
    );
}

#[test]
fn test_fold_inside_lambda() {
    let source = "\
template <typename... Ts>
void each(Ts... args) {
  auto print = [&] { (std::cout << ... << args); };
  print();
}
";
    assert_eq!(
        rewrite_once(source),
        "\
template <typename... Ts>
void each(Ts... args) {
  auto print = [&] { fold_expr_shl_left(std::cout, args...); };
  print();
}
"
    );
}

#[test]
fn test_if_constexpr_is_kept_verbatim() {
    let source = "\
template <typename... Ts>
int count(Ts... args) {
  if constexpr (sizeof...(Ts) > 0) {
    return (1 + ... + (args, 0));
  } else {
    return 0;
  }
}
";
    let report = pass(source).unwrap();
    assert_eq!(report.edits.len(), 1);
    assert_eq!(
        report.text,
        "\
template <typename... Ts>
int count(Ts... args) {
  if constexpr (sizeof...(Ts) > 0) {
    return fold_expr_add_left(1, (args, 0)...);
  } else {
    return 0;
  }
}
"
    );
}

#[test]
fn test_no_match_is_byte_identical() {
    let source = "\
// Copyright (c) utf-8 \u{00e9}\u{00e8}
#include <cstddef>
#define CONCAT(a, b) a##b

/* block
   comment */
template <typename T>
T twice(T value) { return (value + value) * 2; }

int main(int argc, char** argv) {
  const char* raw = R\"(x + ... + y)\";
  return argc > 1 ? twice(argc) : 0;
}
";
    let report = pass(source).unwrap();
    assert_eq!(report.text, source);
    assert!(report.edits.is_empty());
}

#[test]
fn test_edits_do_not_overlap() {
    let source = "\
template <typename... Ts>
struct Pack {
  static_assert(sizeof...(Ts) > 0);
  static constexpr int sum = (0 + ... + sizeof(Ts));
  static constexpr bool all = (true && ... && (sizeof(Ts) > 1));
};

template <typename... Ts>
int count(Ts... args) { return ((args, 1) + ...); }
";
    let report = pass(source).unwrap();
    assert_eq!(report.edits.len(), 4);
    for pair in report.edits.windows(2) {
        assert!(
            pair[0].end_byte <= pair[1].start_byte,
            "{:?} overlaps {:?}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_nested_fold_rewrites_outer_only() {
    let report = pass(&in_function("((args * ...) + ...)")).unwrap();
    assert_eq!(report.edits.len(), 1);
    assert_eq!(
        report.text,
        in_function("fold_expr_add_right((args * ...)...)")
    );
}
