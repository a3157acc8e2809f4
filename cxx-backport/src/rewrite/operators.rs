//! Binary operator tags and the fold-name table.

use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;

/// Every binary operator kind of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `.*`
    PtrMemD,
    /// `->*`
    PtrMemI,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Rem,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `<<`
    Shl,
    /// `>>`
    Shr,
    /// `<=>`
    Cmp,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `&`
    And,
    /// `^`
    Xor,
    /// `|`
    Or,
    /// `&&`
    LAnd,
    /// `||`
    LOr,
    /// `=`
    Assign,
    /// `*=`
    MulAssign,
    /// `/=`
    DivAssign,
    /// `%=`
    RemAssign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
    /// `<<=`
    ShlAssign,
    /// `>>=`
    ShrAssign,
    /// `&=`
    AndAssign,
    /// `^=`
    XorAssign,
    /// `|=`
    OrAssign,
    /// `,`
    Comma,
}

impl BinaryOperator {
    /// Parse an operator token, including the alternative spellings (`and`, `bitor`, ...).
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            ".*" => Self::PtrMemD,
            "->*" => Self::PtrMemI,
            "*" => Self::Mul,
            "/" => Self::Div,
            "%" => Self::Rem,
            "+" => Self::Add,
            "-" => Self::Sub,
            "<<" => Self::Shl,
            ">>" => Self::Shr,
            "<=>" => Self::Cmp,
            "<" => Self::Lt,
            ">" => Self::Gt,
            "<=" => Self::Le,
            ">=" => Self::Ge,
            "==" => Self::Eq,
            "!=" | "not_eq" => Self::Ne,
            "&" | "bitand" => Self::And,
            "^" | "xor" => Self::Xor,
            "|" | "bitor" => Self::Or,
            "&&" | "and" => Self::LAnd,
            "||" | "or" => Self::LOr,
            "=" => Self::Assign,
            "*=" => Self::MulAssign,
            "/=" => Self::DivAssign,
            "%=" => Self::RemAssign,
            "+=" => Self::AddAssign,
            "-=" => Self::SubAssign,
            "<<=" => Self::ShlAssign,
            ">>=" => Self::ShrAssign,
            "&=" | "and_eq" => Self::AndAssign,
            "^=" | "xor_eq" => Self::XorAssign,
            "|=" | "or_eq" => Self::OrAssign,
            "," => Self::Comma,
            _ => return None,
        };
        Some(op)
    }

    /// Primary spelling of the operator
    #[must_use]
    pub const fn spelling(self) -> &'static str {
        match self {
            Self::PtrMemD => ".*",
            Self::PtrMemI => "->*",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Cmp => "<=>",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::And => "&",
            Self::Xor => "^",
            Self::Or => "|",
            Self::LAnd => "&&",
            Self::LOr => "||",
            Self::Assign => "=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::RemAssign => "%=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::ShlAssign => "<<=",
            Self::ShrAssign => ">>=",
            Self::AndAssign => "&=",
            Self::XorAssign => "^=",
            Self::OrAssign => "|=",
            Self::Comma => ",",
        }
    }

    /// Member-pointer access (`.*`, `->*`)
    #[must_use]
    pub const fn is_member_pointer(self) -> bool {
        matches!(self, Self::PtrMemD | Self::PtrMemI)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spelling())
    }
}

/// Name fragments used in synthesized `fold_expr_<name>_<direction>` calls.
pub fn operator_names() -> &'static FxHashMap<BinaryOperator, &'static str> {
    static NAMES: OnceLock<FxHashMap<BinaryOperator, &'static str>> = OnceLock::new();
    NAMES.get_or_init(|| {
        use BinaryOperator as Op;

        let mut m = FxHashMap::default();
        m.insert(Op::Add, "add");
        m.insert(Op::Sub, "sub");
        m.insert(Op::Mul, "mul");
        m.insert(Op::Div, "div");
        m.insert(Op::Rem, "mod");
        m.insert(Op::Xor, "xor");
        m.insert(Op::And, "and");
        m.insert(Op::Or, "or");
        m.insert(Op::Shl, "shl");
        m.insert(Op::Shr, "shr");

        m.insert(Op::AddAssign, "add_assign");
        m.insert(Op::SubAssign, "sub_assign");
        m.insert(Op::MulAssign, "mul_assign");
        m.insert(Op::DivAssign, "div_assign");
        m.insert(Op::RemAssign, "mod_assign");
        m.insert(Op::XorAssign, "xor_assign");
        m.insert(Op::AndAssign, "and_assign");
        m.insert(Op::OrAssign, "or_assign");
        m.insert(Op::ShlAssign, "shl_assign");
        m.insert(Op::ShrAssign, "shr_assign");

        m.insert(Op::Assign, "assign");
        m.insert(Op::Eq, "equals");
        m.insert(Op::Ne, "notequals");
        m.insert(Op::Lt, "less");
        m.insert(Op::Gt, "greater");
        m.insert(Op::Le, "lessequals");
        m.insert(Op::Ge, "greaterequals");
        m.insert(Op::LAnd, "land");
        m.insert(Op::LOr, "lor");
        m.insert(Op::Comma, "comma");
        m
    })
}

/// Look up the fold-name fragment for `op`.
#[must_use]
pub fn operator_name(op: BinaryOperator) -> Option<&'static str> {
    operator_names().get(&op).copied()
}
