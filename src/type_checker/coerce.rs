use std::mem;

use tracing::debug;

use crate::{
    ast::{
        expressions::{Expr, ExprKind, Literal},
        types::{BaseType, Type},
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::type_checker::{CheckResult, TypeChecker};

impl TypeChecker<'_> {
    /// Whether a value of type `have` needs a conversion to be used as `want`.
    ///
    /// Fails with `TypeMismatch` when no implicit conversion exists.
    pub fn needs_cast(&self, have: &Type, want: &Type, at: &Position) -> CheckResult<bool> {
        if self.context.equal_types(have, want) {
            return Ok(false);
        }

        let allowed = match (self.context.get_type(have)?, self.context.get_type(want)?) {
            (Type::Pointer(_), Type::Pointer(_)) => true,
            (Type::Base(BaseType::Int), Type::Pointer(_)) => true,
            (Type::Base(from), Type::Base(to)) => matches!(
                (from, to),
                (BaseType::Int, BaseType::Byte)
                    | (BaseType::Int, BaseType::Double)
                    | (BaseType::Double, BaseType::Float)
                    | (BaseType::Float, BaseType::Double)
                    | (BaseType::Byte, BaseType::Int)
            ),
            _ => false,
        };

        if !allowed {
            return Err(Error::new(
                ErrorImpl::TypeMismatch {
                    have: have.to_string(),
                    want: want.to_string(),
                },
                at.clone(),
            ));
        }

        Ok(true)
    }

    /// Converts `expr` to `target`, returning either `expr` itself or `expr`
    /// wrapped in an implicit cast.
    pub fn coerce(&mut self, mut expr: Expr, target: &Type) -> CheckResult<Expr> {
        let have = match expr.typ.clone() {
            Some(typ) => typ,
            None => self.check_expr(&mut expr, true)?,
        };

        if !self.needs_cast(&have, target, &expr.span.start)? {
            return Ok(expr);
        }

        debug!(from = %have, to = %target, "inserting implicit cast");
        let mut cast = expr.into_implicit_cast(target.clone());
        self.check_expr(&mut cast, false)?;
        Ok(cast)
    }

    /// [`coerce`](Self::coerce) for a child held by its parent; the result
    /// replaces the child in place.
    pub fn coerce_slot(&mut self, slot: &mut Expr, target: &Type) -> CheckResult<()> {
        let have = match slot.typ.clone() {
            Some(typ) => typ,
            None => self.check_expr(slot, true)?,
        };

        // Decide before taking the child out so a mismatch leaves it in place.
        if !self.needs_cast(&have, target, &slot.span.start)? {
            return Ok(());
        }

        let placeholder = Expr::new(ExprKind::Literal(Literal::Null), slot.span.clone());
        let expr = mem::replace(slot, placeholder);
        *slot = self.coerce(expr, target)?;
        Ok(())
    }
}
