use crate::{
    ast::{
        expressions::{BinaryOp, Expr, ExprKind, Literal, UnaryOp},
        types::{BaseType, Type},
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    context::Symbol,
    type_checker::{CheckResult, TypeChecker},
};

/// How an expression is checked: comparisons, `and`, `or` and `not` always
/// produce `bool` and go through condition checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprClass {
    Boolean,
    General,
}

pub fn classify(expr: &Expr) -> ExprClass {
    match &expr.kind {
        ExprKind::Binary { op, .. } if op.is_comparison() || op.is_logical() => ExprClass::Boolean,
        ExprKind::Unary {
            op: UnaryOp::Not, ..
        } => ExprClass::Boolean,
        _ => ExprClass::General,
    }
}

/// Resolved type and addressability of a node.
struct Checked {
    typ: Type,
    lvalue: bool,
}

impl Checked {
    fn lvalue(typ: Type) -> Self {
        Checked { typ, lvalue: true }
    }

    fn rvalue(typ: Type) -> Self {
        Checked { typ, lvalue: false }
    }
}

impl TypeChecker<'_> {
    /// Resolves the type and lvalue status of `expr` and its children.
    ///
    /// With `want_rvalue`, an lvalue result is turned into an rvalue, which
    /// later stages read as "load from this location".
    pub fn check_expr(&mut self, expr: &mut Expr, want_rvalue: bool) -> CheckResult<Type> {
        let checked = match classify(expr) {
            ExprClass::Boolean => Checked::rvalue(self.check_condition(expr)?),
            ExprClass::General => self.check_general(expr)?,
        };
        expr.typ = Some(checked.typ.clone());
        expr.is_lvalue = Some(checked.lvalue);

        if want_rvalue && checked.lvalue {
            match self.context.get_type(&checked.typ)? {
                Type::Base(_) | Type::Pointer(_) => expr.is_lvalue = Some(false),
                _ => {
                    return Err(Error::new(
                        ErrorImpl::CannotDereference {
                            type_: checked.typ.to_string(),
                        },
                        expr.span.start.clone(),
                    ))
                }
            }
        }

        Ok(checked.typ)
    }

    /// Checks an expression used as a condition; the result must be `bool`.
    pub fn check_condition(&mut self, expr: &mut Expr) -> CheckResult<Type> {
        let typ = match &mut expr.kind {
            ExprKind::Binary { op, left, right } if op.is_logical() => {
                self.check_condition(left)?;
                self.check_condition(right)?;
                Type::bool()
            }
            ExprKind::Binary { op, left, right } if op.is_comparison() => {
                let typ = self.check_expr(left, true)?;
                self.check_expr(right, true)?;
                self.coerce_slot(right, &typ)?;
                Type::bool()
            }
            ExprKind::Unary {
                op: UnaryOp::Not,
                operand,
            } => {
                self.check_condition(operand)?;
                Type::bool()
            }
            ExprKind::Literal(_) => self.check_expr(expr, false)?,
            _ => self.check_expr(expr, true)?,
        };
        expr.typ = Some(typ.clone());
        expr.is_lvalue = Some(false);

        if !self.context.equal_types(&typ, &Type::bool()) {
            return Err(Error::new(
                ErrorImpl::InvalidConditionType {
                    expected: Type::bool().to_string(),
                    received: typ.to_string(),
                },
                expr.span.start.clone(),
            ));
        }

        Ok(typ)
    }

    fn check_general(&mut self, expr: &mut Expr) -> CheckResult<Checked> {
        if self.is_module_ref(expr) {
            return self.check_module_member(expr);
        }

        let at = expr.span.start.clone();
        match &mut expr.kind {
            ExprKind::Binary { op, left, right } => self.check_binop(*op, left, right, &at),
            ExprKind::Unary { op, operand } => self.check_unop(*op, operand),
            ExprKind::Identifier(name) => {
                match self.context.resolve_name(&self.scope, name, &at)? {
                    Symbol::Variable(variable) => Ok(Checked::lvalue(variable.typ)),
                    Symbol::Constant { typ, .. } => Ok(Checked::rvalue(typ)),
                    _ => Err(Error::new(
                        ErrorImpl::CannotUseInExpression {
                            symbol: name.clone(),
                        },
                        at,
                    )),
                }
            }
            ExprKind::Deref(pointer) => {
                let typ = self.check_expr(pointer, true)?;
                match self.context.get_type(&typ)? {
                    Type::Pointer(pointee) => Ok(Checked::lvalue(*pointee)),
                    _ => Err(Error::new(
                        ErrorImpl::CannotDereference {
                            type_: typ.to_string(),
                        },
                        at,
                    )),
                }
            }
            ExprKind::Member { base, field } => self.check_member(base, field, &at),
            ExprKind::Index { base, index } => self.check_index(base, index),
            ExprKind::Literal(literal) => check_literal(literal, &at),
            ExprKind::TypeCast {
                target,
                expr: inner,
                implicit,
            } => {
                // Casts spliced in by coercion wrap an already checked rvalue.
                if !(inner.is_checked() && !inner.is_lvalue()) {
                    self.check_expr(inner, true)?;
                }
                if !*implicit {
                    self.context.check_type(target, &at)?;
                }
                Ok(Checked::rvalue(target.clone()))
            }
            ExprKind::Sizeof(typ) => {
                self.context.check_type(typ, &at)?;
                Ok(Checked::rvalue(Type::int()))
            }
            ExprKind::Call { callee, arguments } => self.check_call(callee, arguments, &at),
        }
    }

    /// Whether `expr` selects a member of a module rather than of a structure.
    fn is_module_ref(&self, expr: &Expr) -> bool {
        let ExprKind::Member { base, .. } = &expr.kind else {
            return false;
        };

        base.symbol_path().is_some()
            && matches!(
                self.context.resolve_symbol(&self.scope, base),
                Ok(Symbol::Module(_))
            )
    }

    fn check_module_member(&mut self, expr: &Expr) -> CheckResult<Checked> {
        match self.context.resolve_symbol(&self.scope, expr)? {
            Symbol::Variable(variable) => Ok(Checked::lvalue(variable.typ)),
            Symbol::Constant { typ, .. } => Ok(Checked::rvalue(typ)),
            _ => Err(Error::new(
                ErrorImpl::CannotUseInExpression {
                    symbol: expr.to_string(),
                },
                expr.span.start.clone(),
            )),
        }
    }

    fn check_binop(
        &mut self,
        op: BinaryOp,
        left: &mut Expr,
        right: &mut Expr,
        at: &Position,
    ) -> CheckResult<Checked> {
        self.check_expr(left, true)?;
        self.check_expr(right, true)?;

        let common = self.context.get_common_type(left, right)?;
        let invalid = || {
            Error::new(
                ErrorImpl::InvalidOperator {
                    operator: op.symbol().to_string(),
                    type_: common.to_string(),
                },
                at.clone(),
            )
        };

        if !(op.is_arithmetic() || op.is_bitwise()) {
            return Err(invalid());
        }

        match self.context.get_type(&common)? {
            Type::Base(base) if op.is_bitwise() && !base.is_integer() => return Err(invalid()),
            Type::Pointer(_) if !matches!(op, BinaryOp::Add | BinaryOp::Sub) => {
                return Err(invalid())
            }
            Type::Pointer(_) | Type::Base(_) => {}
            _ => return Err(invalid()),
        }

        self.coerce_slot(left, &common)?;
        self.coerce_slot(right, &common)?;

        Ok(Checked::rvalue(common))
    }

    fn check_unop(&mut self, op: UnaryOp, operand: &mut Expr) -> CheckResult<Checked> {
        match op {
            UnaryOp::AddressOf => {
                let typ = self.check_expr(operand, false)?;
                if !operand.is_lvalue() {
                    return Err(Error::new(
                        ErrorImpl::InvalidLvalue {
                            expression: operand.to_string(),
                        },
                        operand.span.start.clone(),
                    ));
                }
                Ok(Checked::rvalue(Type::pointer_to(typ)))
            }
            UnaryOp::Plus | UnaryOp::Minus => {
                let typ = self.check_expr(operand, true)?;
                Ok(Checked::rvalue(typ))
            }
            UnaryOp::Not => {
                self.check_condition(operand)?;
                Ok(Checked::rvalue(Type::bool()))
            }
        }
    }

    fn check_member(&mut self, base: &mut Expr, field: &str, at: &Position) -> CheckResult<Checked> {
        let base_type = self.check_expr(base, false)?;

        let resolved = self.context.get_type(&base_type)?;
        let Type::Struct(structure) = &resolved else {
            return Err(Error::new(
                ErrorImpl::NonStructureAccess {
                    type_: base_type.to_string(),
                    field: field.to_string(),
                },
                at.clone(),
            ));
        };
        self.context.check_type(&resolved, at)?;

        let Some(field_type) = structure.field_type(field) else {
            return Err(Error::new(
                ErrorImpl::InvalidField {
                    type_: base_type.to_string(),
                    field: field.to_string(),
                },
                at.clone(),
            ));
        };

        // Fields are reached through the address of the structure.
        if !base.is_lvalue() {
            return Err(Error::new(
                ErrorImpl::InvalidLvalue {
                    expression: base.to_string(),
                },
                base.span.start.clone(),
            ));
        }

        Ok(Checked::lvalue(field_type.clone()))
    }

    fn check_index(&mut self, base: &mut Expr, index: &mut Expr) -> CheckResult<Checked> {
        let base_type = self.check_expr(base, false)?;
        self.check_expr(index, true)?;

        let Type::Array(array) = self.context.get_type(&base_type)? else {
            return Err(Error::new(
                ErrorImpl::NonArrayIndex {
                    type_: base_type.to_string(),
                },
                base.span.start.clone(),
            ));
        };

        self.coerce_slot(index, &Type::int())?;

        if !base.is_lvalue() {
            return Err(Error::new(
                ErrorImpl::InvalidLvalue {
                    expression: base.to_string(),
                },
                base.span.start.clone(),
            ));
        }

        Ok(Checked::lvalue(*array.element))
    }

    fn check_call(
        &mut self,
        callee: &Expr,
        arguments: &mut [Expr],
        at: &Position,
    ) -> CheckResult<Checked> {
        let not_callable = || {
            Error::new(
                ErrorImpl::NotCallable {
                    symbol: callee.to_string(),
                },
                at.clone(),
            )
        };

        if callee.symbol_path().is_none() {
            return Err(not_callable());
        }
        let Symbol::Function(signature) = self.context.resolve_symbol(&self.scope, callee)? else {
            return Err(not_callable());
        };

        if arguments.len() != signature.parameter_types.len() {
            return Err(Error::new(
                ErrorImpl::ArityMismatch {
                    function: signature.qualified_name(),
                    expected: signature.parameter_types.len(),
                    received: arguments.len(),
                },
                at.clone(),
            ));
        }

        for (argument, typ) in arguments.iter_mut().zip(signature.parameter_types.iter()) {
            self.check_expr(argument, true)?;
            self.coerce_slot(argument, typ)?;
        }

        if !self.context.is_simple_type(&signature.return_type) {
            return Err(Error::new(
                ErrorImpl::NonSimpleReturn {
                    function: signature.qualified_name(),
                },
                at.clone(),
            ));
        }

        Ok(Checked::rvalue(signature.return_type))
    }
}

fn check_literal(literal: &Literal, at: &Position) -> CheckResult<Checked> {
    let base = match literal {
        Literal::Int(_) => BaseType::Int,
        Literal::Float(_) => BaseType::Double,
        Literal::Bool(_) => BaseType::Bool,
        Literal::Text(_) => BaseType::String,
        Literal::Null => {
            return Err(Error::new(
                ErrorImpl::UnknownLiteralType {
                    literal: literal.to_string(),
                },
                at.clone(),
            ))
        }
    };

    Ok(Checked::rvalue(Type::Base(base)))
}
