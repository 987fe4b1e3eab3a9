use std::fmt::Display;

use crate::Span;

use super::types::Type;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    BitOr,
    BitAnd,
    BitXor,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    And,
    Or,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::BitOr => "|",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitXor => "^",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }

    /// Comparison operators, which produce `bool` from two values.
    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Equal
                | BinaryOp::NotEqual
                | BinaryOp::Less
                | BinaryOp::Greater
                | BinaryOp::LessEqual
                | BinaryOp::GreaterEqual
        )
    }

    /// `and` / `or`, which combine two conditions.
    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem
        )
    }

    /// Shifts and bitwise operators, which only make sense on integers.
    pub fn is_bitwise(&self) -> bool {
        matches!(
            self,
            BinaryOp::Shl | BinaryOp::Shr | BinaryOp::BitOr | BinaryOp::BitAnd | BinaryOp::BitXor
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    AddressOf,
    Plus,
    Minus,
    Not,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::AddressOf => "&",
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "not",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Int(value) => write!(f, "{}", value),
            Literal::Float(value) => write!(f, "{:?}", value),
            Literal::Bool(value) => write!(f, "{}", value),
            Literal::Text(value) => write!(f, "{:?}", value),
            Literal::Null => write!(f, "null"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Identifier(String),
    /// `*ptr`
    Deref(Box<Expr>),
    Member {
        base: Box<Expr>,
        field: String,
    },
    Index {
        base: Box<Expr>,
        index: Box<Expr>,
    },
    Literal(Literal),
    /// `cast<T>(expr)`, or a conversion spliced in by coercion when `implicit`.
    TypeCast {
        target: Type,
        expr: Box<Expr>,
        implicit: bool,
    },
    Sizeof(Type),
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
}

/// Expression node.
///
/// `typ` and `is_lvalue` start out empty and are filled in by the type
/// checker, which is their only writer.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    pub typ: Option<Type>,
    pub is_lvalue: Option<bool>,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr {
            kind,
            span,
            typ: None,
            is_lvalue: None,
        }
    }

    /// Whether the checker classified this node as addressable storage.
    pub fn is_lvalue(&self) -> bool {
        self.is_lvalue.unwrap_or(false)
    }

    /// Whether the checker has already resolved this node.
    pub fn is_checked(&self) -> bool {
        self.typ.is_some() && self.is_lvalue.is_some()
    }

    /// Wraps the expression in a compiler inserted conversion to `target`.
    ///
    /// The wrapper is returned unchecked; the caller threads it back into
    /// the parent slot.
    pub fn into_implicit_cast(self, target: Type) -> Expr {
        let span = self.span.clone();
        Expr::new(
            ExprKind::TypeCast {
                target,
                expr: Box::new(self),
                implicit: true,
            },
            span,
        )
    }

    /// Identifier / member chains name a symbol; anything else does not.
    pub fn symbol_path(&self) -> Option<String> {
        match &self.kind {
            ExprKind::Identifier(name) => Some(name.clone()),
            ExprKind::Member { base, field } => {
                base.symbol_path().map(|base| format!("{}.{}", base, field))
            }
            _ => None,
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ExprKind::Binary { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            ExprKind::Unary { op: UnaryOp::Not, operand } => write!(f, "not {}", operand),
            ExprKind::Unary { op, operand } => write!(f, "{}{}", op.symbol(), operand),
            ExprKind::Identifier(name) => write!(f, "{}", name),
            ExprKind::Deref(pointer) => write!(f, "*{}", pointer),
            ExprKind::Member { base, field } => write!(f, "{}.{}", base, field),
            ExprKind::Index { base, index } => write!(f, "{}[{}]", base, index),
            ExprKind::Literal(literal) => write!(f, "{}", literal),
            ExprKind::TypeCast { target, expr, .. } => write!(f, "cast<{}>({})", target, expr),
            ExprKind::Sizeof(typ) => write!(f, "sizeof({})", typ),
            ExprKind::Call { callee, arguments } => {
                write!(f, "{}(", callee)?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                write!(f, ")")
            }
        }
    }
}
