use crate::Span;

use super::expressions::Expr;

/// One `case value:` or `default:` arm. `value` is absent for the default.
#[derive(Debug, Clone)]
pub struct SwitchOption {
    pub value: Option<Expr>,
    pub body: Stmt,
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    Compound(Vec<Stmt>),
    Empty,
    Assignment {
        lhs: Expr,
        rhs: Expr,
    },
    Expression(Expr),
    If {
        condition: Expr,
        then_body: Box<Stmt>,
        else_body: Box<Stmt>,
    },
    Return(Option<Expr>),
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    For {
        init: Box<Stmt>,
        condition: Expr,
        final_stmt: Box<Stmt>,
        body: Box<Stmt>,
    },
    Switch {
        scrutinee: Expr,
        options: Vec<SwitchOption>,
    },
}

#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }

    pub fn empty(span: Span) -> Self {
        Stmt::new(StmtKind::Empty, span)
    }
}
