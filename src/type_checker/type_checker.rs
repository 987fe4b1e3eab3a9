use std::ops::{Add, AddAssign};

use tracing::{debug, info};

use crate::{
    ast::{
        ast::{Function, Module, Unit},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    context::{Context, Scope},
    diagnostics::Diagnostics,
};

pub type CheckResult<T> = Result<T, Error>;

/// Number of errors reported while checking one piece of the tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub errors: usize,
}

impl Outcome {
    pub fn ok() -> Self {
        Outcome { errors: 0 }
    }

    pub fn is_ok(&self) -> bool {
        self.errors == 0
    }
}

impl Add for Outcome {
    type Output = Outcome;

    fn add(self, rhs: Outcome) -> Outcome {
        Outcome {
            errors: self.errors + rhs.errors,
        }
    }
}

impl AddAssign for Outcome {
    fn add_assign(&mut self, rhs: Outcome) {
        self.errors += rhs.errors;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOutcome {
    pub module: String,
    pub errors: usize,
}

impl ModuleOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors == 0
    }
}

/// Function currently being checked, for `return` statements.
#[derive(Debug, Clone)]
pub(super) struct ReturnTarget {
    pub function: String,
    pub typ: Type,
}

pub struct TypeChecker<'a> {
    pub(super) context: &'a Context,
    pub(super) diagnostics: &'a mut Diagnostics,
    pub(super) scope: Scope,
    pub(super) returns: Option<ReturnTarget>,
}

impl<'a> TypeChecker<'a> {
    pub fn new(context: &'a Context, diagnostics: &'a mut Diagnostics) -> Self {
        TypeChecker {
            context,
            diagnostics,
            scope: Scope::module(""),
            returns: None,
        }
    }

    /// Records `error` and keeps going.
    pub(super) fn report(&mut self, error: Error) -> Outcome {
        self.diagnostics.error(error);
        Outcome { errors: 1 }
    }

    /// Turns a failed check into a reported error.
    pub(super) fn recover<T>(&mut self, result: CheckResult<T>) -> Outcome {
        match result {
            Ok(_) => Outcome::ok(),
            Err(error) => self.report(error),
        }
    }

    /// Checks every module of `unit`.
    ///
    /// All modules are visited even when earlier ones fail; the rollup
    /// error is returned only afterwards.
    pub fn check(&mut self, unit: &mut Unit) -> CheckResult<Vec<ModuleOutcome>> {
        let outcomes: Vec<ModuleOutcome> = unit
            .modules
            .iter_mut()
            .map(|module| self.check_module(module))
            .collect();

        let invalid = outcomes.iter().filter(|outcome| !outcome.is_valid()).count();
        if invalid > 0 {
            return Err(Error::new(
                ErrorImpl::SemanticErrors { modules: invalid },
                Position::null(),
            ));
        }

        Ok(outcomes)
    }

    pub fn check_module(&mut self, module: &mut Module) -> ModuleOutcome {
        info!(module = %module.name, "checking module");
        self.scope = Scope::module(&module.name);
        self.returns = None;

        let top_level = self.check_top_level(module);
        let mut outcome = self.recover(top_level);

        for function in module.functions.iter_mut() {
            outcome += self.check_function(function);
        }

        ModuleOutcome {
            module: module.name.clone(),
            errors: outcome.errors,
        }
    }

    /// Declared types, globals and constants. Stops at the first error.
    fn check_top_level(&mut self, module: &mut Module) -> CheckResult<()> {
        for def in module.types.iter() {
            self.context.check_type(&def.typ, &def.span.start)?;
        }

        for variable in module.variables.iter() {
            debug_assert!(!variable.is_local);
            self.context.check_type(&variable.typ, &variable.span.start)?;
        }

        for constant in module.constants.iter_mut() {
            self.context.check_type(&constant.typ, &constant.span.start)?;
            self.check_expr(&mut constant.value, true)?;
            self.coerce_slot(&mut constant.value, &constant.typ)?;
        }

        Ok(())
    }

    pub fn check_function(&mut self, function: &mut Function) -> Outcome {
        debug!(function = %function.qualified_name(), "checking function");

        let signature = self.enter_function(function);
        if signature.is_err() {
            return self.recover(signature);
        }

        let outcome = match function.body.as_mut() {
            Some(body) => self.check_stmt(body),
            None => Outcome::ok(),
        };

        self.scope = Scope::module(&function.module);
        self.returns = None;
        outcome
    }

    /// Validates the signature and inner scope, then makes them current.
    fn enter_function(&mut self, function: &Function) -> CheckResult<()> {
        for parameter in function.parameters.iter() {
            self.context.check_type(&parameter.typ, &parameter.span.start)?;

            if !self.context.is_simple_type(&parameter.typ) {
                return Err(Error::new(
                    ErrorImpl::NonSimpleParameter {
                        function: function.qualified_name(),
                        parameter: parameter.name.clone(),
                    },
                    parameter.span.start.clone(),
                ));
            }
        }

        self.context
            .check_type(&function.return_type, &function.span.start)?;
        if !self.context.is_simple_type(&function.return_type) {
            return Err(Error::new(
                ErrorImpl::NonSimpleReturn {
                    function: function.qualified_name(),
                },
                function.span.start.clone(),
            ));
        }

        for local in function.locals.iter() {
            self.context.check_type(&local.typ, &local.span.start)?;
        }

        self.scope = Scope::function(function)?;
        self.returns = Some(ReturnTarget {
            function: function.qualified_name(),
            typ: function.return_type.clone(),
        });
        Ok(())
    }
}

/// Builds the context for `unit` and checks it, recording every semantic
/// error in `diagnostics`.
pub fn type_check(unit: &mut Unit, diagnostics: &mut Diagnostics) -> CheckResult<Vec<ModuleOutcome>> {
    let context = Context::new(unit)?;
    TypeChecker::new(&context, diagnostics).check(unit)
}
