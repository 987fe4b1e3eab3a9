use crate::{
    ast::{
        expressions::{Expr, ExprKind},
        statements::{Stmt, StmtKind, SwitchOption},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    Span,
};

use super::type_checker::{CheckResult, Outcome, TypeChecker};

impl TypeChecker<'_> {
    /// Checks one statement and everything below it.
    ///
    /// Errors are reported where they occur; sibling and nested statements
    /// are still visited.
    pub fn check_stmt(&mut self, stmt: &mut Stmt) -> Outcome {
        match &mut stmt.kind {
            StmtKind::Compound(statements) => {
                let mut outcome = Outcome::ok();
                for statement in statements.iter_mut() {
                    outcome += self.check_stmt(statement);
                }
                outcome
            }
            StmtKind::Empty => Outcome::ok(),
            StmtKind::Assignment { lhs, rhs } => {
                let result = self.check_assignment(lhs, rhs, &stmt.span);
                self.recover(result)
            }
            StmtKind::Expression(expr) => {
                let result = self.check_expression_stmt(expr);
                self.recover(result)
            }
            StmtKind::If {
                condition,
                then_body,
                else_body,
            } => {
                let result = self.check_condition(condition);
                let mut outcome = self.recover(result);
                outcome += self.check_stmt(then_body);
                outcome += self.check_stmt(else_body);
                outcome
            }
            StmtKind::Return(value) => {
                let result = self.check_return(value.as_mut(), &stmt.span);
                self.recover(result)
            }
            StmtKind::While { condition, body } => {
                let result = self.check_condition(condition);
                let mut outcome = self.recover(result);
                outcome += self.check_stmt(body);
                outcome
            }
            StmtKind::For {
                init,
                condition,
                final_stmt,
                body,
            } => {
                let mut outcome = self.check_stmt(init);
                let result = self.check_condition(condition);
                outcome += self.recover(result);
                outcome += self.check_stmt(body);
                outcome += self.check_stmt(final_stmt);
                outcome
            }
            StmtKind::Switch { scrutinee, options } => {
                self.check_switch(scrutinee, options, &stmt.span)
            }
        }
    }

    fn check_assignment(&mut self, lhs: &mut Expr, rhs: &mut Expr, span: &Span) -> CheckResult<()> {
        let typ = self.check_expr(lhs, false)?;

        if !self.context.is_simple_type(&typ) {
            return Err(Error::new(
                ErrorImpl::ComplexAssignment {
                    type_: typ.to_string(),
                },
                span.start.clone(),
            ));
        }

        if !lhs.is_lvalue() {
            return Err(Error::new(
                ErrorImpl::InvalidLvalue {
                    expression: lhs.to_string(),
                },
                lhs.span.start.clone(),
            ));
        }

        self.check_expr(rhs, true)?;
        self.coerce_slot(rhs, &typ)
    }

    /// Only calls to void functions may stand alone.
    fn check_expression_stmt(&mut self, expr: &mut Expr) -> CheckResult<()> {
        if !matches!(expr.kind, ExprKind::Call { .. }) {
            return Err(Error::new(
                ErrorImpl::NotACallExpression,
                expr.span.start.clone(),
            ));
        }

        let typ = self.check_expr(expr, false)?;
        if !self.context.equal_types(&typ, &Type::void()) {
            return Err(Error::new(
                ErrorImpl::InvalidVoidCall {
                    type_: typ.to_string(),
                },
                expr.span.start.clone(),
            ));
        }

        Ok(())
    }

    fn check_return(&mut self, value: Option<&mut Expr>, span: &Span) -> CheckResult<()> {
        let Some(target) = self.returns.clone() else {
            return Ok(());
        };
        let is_void = self.context.equal_types(&target.typ, &Type::void());

        match value {
            None if is_void => Ok(()),
            None => Err(Error::new(
                ErrorImpl::MissingReturnValue {
                    function: target.function,
                },
                span.start.clone(),
            )),
            Some(value) if is_void => Err(Error::new(
                ErrorImpl::UnexpectedReturnValue {
                    function: target.function,
                },
                value.span.start.clone(),
            )),
            Some(value) => {
                self.check_expr(value, true)?;
                self.coerce_slot(value, &target.typ)
            }
        }
    }

    fn check_switch(&mut self, scrutinee: &mut Expr, options: &mut [SwitchOption], span: &Span) -> Outcome {
        let result = self.check_scrutinee(scrutinee);
        let mut outcome = self.recover(result);

        let mut defaults = 0;
        for option in options.iter_mut() {
            outcome += self.check_stmt(&mut option.body);

            match option.value.as_mut() {
                None => defaults += 1,
                Some(value) => {
                    let result = self.check_case_value(value);
                    outcome += self.recover(result);
                }
            }
        }

        if defaults == 0 {
            outcome += self.report(Error::new(
                ErrorImpl::MissingDefaultCase,
                span.start.clone(),
            ));
        } else if defaults > 1 {
            outcome += self.report(Error::new(
                ErrorImpl::DuplicateDefaultCase,
                span.start.clone(),
            ));
        }

        outcome
    }

    fn check_scrutinee(&mut self, scrutinee: &mut Expr) -> CheckResult<()> {
        let typ = self.check_expr(scrutinee, true)?;

        if !self.context.equal_types(&typ, &Type::int()) {
            return Err(Error::new(
                ErrorImpl::InvalidConditionType {
                    expected: Type::int().to_string(),
                    received: typ.to_string(),
                },
                scrutinee.span.start.clone(),
            ));
        }

        Ok(())
    }

    fn check_case_value(&mut self, value: &mut Expr) -> CheckResult<()> {
        self.check_expr(value, true)?;
        self.coerce_slot(value, &Type::int())
    }
}
