//! Symbol tables and type queries shared by every check.
//!
//! A [`Context`] is built once per unit and is read-only afterwards, so one
//! context can back checks of several modules. Name resolution inside a
//! function goes through a [`Scope`]:
//!
//! 1. parameters and locals of the function
//! 2. top level symbols of the current module
//! 3. imported module names and the module's own name
//!
//! so a variable named like a module hides that module in `a.b` expressions.

use std::collections::HashMap;

use crate::{
    ast::{
        ast::{Function, TypeDef, Unit, Variable},
        expressions::{Expr, ExprKind},
        types::{BaseType, Type, TypeName},
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// What a name resolves to.
#[derive(Debug, Clone)]
pub enum Symbol {
    Variable(Variable),
    Constant { name: String, typ: Type },
    Function(FunctionSignature),
    Type(TypeDef),
    Module(String),
}

#[derive(Debug, Clone)]
pub struct FunctionSignature {
    pub name: String,
    pub module: String,
    pub parameter_types: Vec<Type>,
    pub return_type: Type,
}

impl FunctionSignature {
    pub fn new(function: &Function) -> Self {
        FunctionSignature {
            name: function.name.clone(),
            module: function.module.clone(),
            parameter_types: function
                .parameters
                .iter()
                .map(|parameter| parameter.typ.clone())
                .collect(),
            return_type: function.return_type.clone(),
        }
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.module, self.name)
    }
}

#[derive(Debug, Default)]
struct ModuleSymbols {
    symbols: HashMap<String, Symbol>,
    imports: Vec<String>,
}

impl ModuleSymbols {
    fn define(&mut self, name: &str, symbol: Symbol, at: &Position) -> Result<(), Error> {
        if self.symbols.contains_key(name) {
            return Err(Error::new(
                ErrorImpl::Redefinition {
                    symbol: name.to_string(),
                },
                at.clone(),
            ));
        }

        self.symbols.insert(name.to_string(), symbol);
        Ok(())
    }
}

/// Names visible at one point of a module: the module plus, inside a
/// function, its parameters and locals.
#[derive(Debug, Clone)]
pub struct Scope {
    module: String,
    locals: HashMap<String, Symbol>,
}

impl Scope {
    pub fn module(name: &str) -> Self {
        Scope {
            module: name.to_string(),
            locals: HashMap::new(),
        }
    }

    /// Scope of a function body. Parameters and locals share one namespace.
    pub fn function(function: &Function) -> Result<Self, Error> {
        let mut scope = Scope::module(&function.module);
        for variable in function.parameters.iter().chain(function.locals.iter()) {
            scope.declare(variable)?;
        }

        Ok(scope)
    }

    pub fn declare(&mut self, variable: &Variable) -> Result<(), Error> {
        if self.locals.contains_key(&variable.name) {
            return Err(Error::new(
                ErrorImpl::Redefinition {
                    symbol: variable.name.clone(),
                },
                variable.span.start.clone(),
            ));
        }

        self.locals
            .insert(variable.name.clone(), Symbol::Variable(variable.clone()));
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct Context {
    modules: HashMap<String, ModuleSymbols>,
}

impl Context {
    /// Collects the top level symbols of every module in `unit`.
    pub fn new(unit: &Unit) -> Result<Self, Error> {
        let mut context = Context::default();

        for module in unit.modules.iter() {
            if context.modules.contains_key(&module.name) {
                return Err(Error::new(
                    ErrorImpl::Redefinition {
                        symbol: module.name.clone(),
                    },
                    module.span.start.clone(),
                ));
            }

            let mut symbols = ModuleSymbols::default();
            for def in module.types.iter() {
                symbols.define(&def.name, Symbol::Type(def.clone()), &def.span.start)?;
            }
            for variable in module.variables.iter() {
                symbols.define(
                    &variable.name,
                    Symbol::Variable(variable.clone()),
                    &variable.span.start,
                )?;
            }
            for constant in module.constants.iter() {
                symbols.define(
                    &constant.name,
                    Symbol::Constant {
                        name: constant.name.clone(),
                        typ: constant.typ.clone(),
                    },
                    &constant.span.start,
                )?;
            }
            for function in module.functions.iter() {
                symbols.define(
                    &function.name,
                    Symbol::Function(FunctionSignature::new(function)),
                    &function.span.start,
                )?;
            }

            context.modules.insert(module.name.clone(), symbols);
        }

        for module in unit.modules.iter() {
            for import in module.imports.iter() {
                if !context.modules.contains_key(&import.module) {
                    return Err(Error::new(
                        ErrorImpl::UnknownModule {
                            module: import.module.clone(),
                        },
                        import.span.start.clone(),
                    ));
                }

                if let Some(symbols) = context.modules.get_mut(&module.name) {
                    symbols.imports.push(import.module.clone());
                }
            }
        }

        Ok(context)
    }

    pub fn has_module(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Looks `name` up without failing.
    pub fn lookup(&self, scope: &Scope, name: &str) -> Option<Symbol> {
        if let Some(symbol) = scope.locals.get(name) {
            return Some(symbol.clone());
        }

        let module = self.modules.get(&scope.module)?;
        if let Some(symbol) = module.symbols.get(name) {
            return Some(symbol.clone());
        }

        if name == scope.module || module.imports.iter().any(|import| import == name) {
            return Some(Symbol::Module(name.to_string()));
        }

        None
    }

    /// A top level symbol of `module`.
    pub fn module_member(&self, module: &str, name: &str) -> Option<Symbol> {
        self.modules.get(module)?.symbols.get(name).cloned()
    }

    pub fn resolve_name(&self, scope: &Scope, name: &str, at: &Position) -> Result<Symbol, Error> {
        self.lookup(scope, name).ok_or_else(|| {
            Error::new(
                ErrorImpl::UndefinedSymbol {
                    symbol: name.to_string(),
                },
                at.clone(),
            )
        })
    }

    /// Resolves an identifier or a `module.member` chain.
    pub fn resolve_symbol(&self, scope: &Scope, expr: &Expr) -> Result<Symbol, Error> {
        let at = expr.span.start.clone();

        match &expr.kind {
            ExprKind::Identifier(name) => self.resolve_name(scope, name, &at),
            ExprKind::Member { base, field } => match self.resolve_symbol(scope, base)? {
                Symbol::Module(module) => self.module_member(&module, field).ok_or_else(|| {
                    Error::new(
                        ErrorImpl::UndefinedSymbol {
                            symbol: format!("{}.{}", module, field),
                        },
                        at,
                    )
                }),
                _ => Err(Error::new(
                    ErrorImpl::NotAModule {
                        symbol: base.to_string(),
                    },
                    at,
                )),
            },
            _ => Err(Error::new(
                ErrorImpl::UndefinedSymbol {
                    symbol: expr.to_string(),
                },
                at,
            )),
        }
    }

    fn type_definition(&self, name: &TypeName) -> Result<&Type, Error> {
        let visible = name.module == name.referenced_in
            || self
                .modules
                .get(&name.referenced_in)
                .is_some_and(|from| from.imports.iter().any(|import| *import == name.module));
        if !visible {
            return Err(Error::new(
                ErrorImpl::UndefinedSymbol {
                    symbol: name.module.clone(),
                },
                name.span.start.clone(),
            ));
        }

        let module = self.modules.get(&name.module).ok_or_else(|| {
            Error::new(
                ErrorImpl::UnknownModule {
                    module: name.module.clone(),
                },
                name.span.start.clone(),
            )
        })?;

        match module.symbols.get(&name.name) {
            Some(Symbol::Type(def)) => Ok(&def.typ),
            Some(_) => Err(Error::new(
                ErrorImpl::InvalidType {
                    type_: name.name.clone(),
                    reason: String::from("not a type"),
                },
                name.span.start.clone(),
            )),
            None => Err(Error::new(
                ErrorImpl::UndefinedSymbol {
                    symbol: name.name.clone(),
                },
                name.span.start.clone(),
            )),
        }
    }

    /// Follows type aliases. Structures keep the name they were declared
    /// under, which is what makes them nominal.
    fn resolve_alias(&self, typ: &Type) -> Result<(Option<TypeName>, Type), Error> {
        let mut current = typ.clone();
        let mut identity = None;
        let mut seen: Vec<TypeName> = vec![];

        while let Type::Named(name) = &current {
            if seen.iter().any(|other| other.same_as(name)) {
                return Err(Error::new(
                    ErrorImpl::InvalidType {
                        type_: name.name.clone(),
                        reason: String::from("circular type alias"),
                    },
                    name.span.start.clone(),
                ));
            }
            seen.push(name.clone());
            identity = Some(name.clone());

            let next = self.type_definition(name)?.clone();
            current = next;
        }

        let identity = match current {
            Type::Struct(_) => identity,
            _ => None,
        };
        Ok((identity, current))
    }

    /// Canonical form of `typ` with every top level alias followed.
    pub fn get_type(&self, typ: &Type) -> Result<Type, Error> {
        self.resolve_alias(typ).map(|(_, typ)| typ)
    }

    /// Fails with `InvalidType` (or `UndefinedSymbol` for unknown names) when
    /// `typ` is ill-formed.
    pub fn check_type(&self, typ: &Type, at: &Position) -> Result<(), Error> {
        self.check_type_inner(typ, at, &mut vec![])
    }

    fn check_type_inner(
        &self,
        typ: &Type,
        at: &Position,
        visiting: &mut Vec<TypeName>,
    ) -> Result<(), Error> {
        match typ {
            Type::Base(_) => Ok(()),
            // A pointer breaks by-value containment, `type Node = struct { next: Node*; }`
            // is fine as long as `Node` exists.
            Type::Pointer(pointee) => match pointee.as_ref() {
                Type::Named(name) => self.type_definition(name).map(|_| ()),
                other => self.check_type_inner(other, at, &mut vec![]),
            },
            Type::Struct(structure) => {
                for (i, field) in structure.fields.iter().enumerate() {
                    if structure.fields[..i]
                        .iter()
                        .any(|other| other.name == field.name)
                    {
                        return Err(Error::new(
                            ErrorImpl::InvalidType {
                                type_: typ.to_string(),
                                reason: format!("duplicate field {}", field.name),
                            },
                            field.span.start.clone(),
                        ));
                    }

                    self.check_type_inner(&field.typ, &field.span.start, visiting)?;
                }
                Ok(())
            }
            Type::Array(array) => {
                if array.size == 0 {
                    return Err(Error::new(
                        ErrorImpl::InvalidType {
                            type_: typ.to_string(),
                            reason: String::from("array size must be positive"),
                        },
                        at.clone(),
                    ));
                }
                self.check_type_inner(&array.element, at, visiting)
            }
            Type::Named(name) => {
                if visiting.iter().any(|other| other.same_as(name)) {
                    return Err(Error::new(
                        ErrorImpl::InvalidType {
                            type_: name.name.clone(),
                            reason: String::from("type contains itself"),
                        },
                        name.span.start.clone(),
                    ));
                }

                let definition = self.type_definition(name)?;
                visiting.push(name.clone());
                let result = self.check_type_inner(definition, &name.span.start, visiting);
                visiting.pop();
                result
            }
        }
    }

    pub fn equal_types(&self, a: &Type, b: &Type) -> bool {
        let (Ok((name_a, a)), Ok((name_b, b))) = (self.resolve_alias(a), self.resolve_alias(b))
        else {
            return false;
        };

        match (&a, &b) {
            (Type::Base(x), Type::Base(y)) => x == y,
            (Type::Pointer(x), Type::Pointer(y)) => self.equal_types(x, y),
            (Type::Array(x), Type::Array(y)) => {
                x.size == y.size && self.equal_types(&x.element, &y.element)
            }
            (Type::Struct(x), Type::Struct(y)) => match (name_a, name_b) {
                (Some(name_a), Some(name_b)) => name_a.same_as(&name_b),
                _ => {
                    x.fields.len() == y.fields.len()
                        && x.fields.iter().zip(y.fields.iter()).all(|(left, right)| {
                            left.name == right.name && self.equal_types(&left.typ, &right.typ)
                        })
                }
            },
            _ => false,
        }
    }

    /// The type both operands are promoted to in an arithmetic operation.
    pub fn get_common_type(&self, a: &Expr, b: &Expr) -> Result<Type, Error> {
        let left = checked_type(a)?;
        let right = checked_type(b)?;

        if self.equal_types(left, right) {
            return Ok(left.clone());
        }

        let common = match (self.get_type(left)?, self.get_type(right)?) {
            (Type::Pointer(_), Type::Base(BaseType::Int)) => Some(left.clone()),
            (Type::Base(BaseType::Int), Type::Pointer(_)) => Some(right.clone()),
            (Type::Base(x), Type::Base(y)) => match (x, y) {
                (BaseType::Int, BaseType::Byte) | (BaseType::Byte, BaseType::Int) => {
                    Some(Type::int())
                }
                (BaseType::Int, BaseType::Double)
                | (BaseType::Double, BaseType::Int)
                | (BaseType::Float, BaseType::Double)
                | (BaseType::Double, BaseType::Float) => Some(Type::Base(BaseType::Double)),
                _ => None,
            },
            _ => None,
        };

        common.ok_or_else(|| {
            Error::new(
                ErrorImpl::NoCommonType {
                    left: left.to_string(),
                    right: right.to_string(),
                },
                a.span.start.clone(),
            )
        })
    }

    /// Scalars and pointers; the types that fit in a register.
    pub fn is_simple_type(&self, typ: &Type) -> bool {
        matches!(self.get_type(typ), Ok(Type::Base(_)) | Ok(Type::Pointer(_)))
    }
}

fn checked_type(expr: &Expr) -> Result<&Type, Error> {
    expr.typ.as_ref().ok_or_else(|| {
        Error::new(
            ErrorImpl::InvalidType {
                type_: expr.to_string(),
                reason: String::from("expression has not been checked"),
            },
            expr.span.start.clone(),
        )
    })
}
