use crate::Span;

use super::{expressions::Expr, statements::Stmt, types::Type};

/// Every module handed to the checker in one run.
#[derive(Debug, Clone, Default)]
pub struct Unit {
    pub modules: Vec<Module>,
}

impl Unit {
    pub fn new(modules: Vec<Module>) -> Self {
        Unit { modules }
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|module| module.name == name)
    }
}

#[derive(Debug, Clone)]
pub struct Module {
    pub name: String,
    pub imports: Vec<Import>,
    pub types: Vec<TypeDef>,
    pub variables: Vec<Variable>,
    pub constants: Vec<Constant>,
    pub functions: Vec<Function>,
    pub span: Span,
}

impl Module {
    pub fn new(name: String, span: Span) -> Self {
        Module {
            name,
            imports: vec![],
            types: vec![],
            variables: vec![],
            constants: vec![],
            functions: vec![],
            span,
        }
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|function| function.name == name)
    }
}

#[derive(Debug, Clone)]
pub struct Import {
    pub module: String,
    pub span: Span,
}

/// `type Name = ...;`
#[derive(Debug, Clone)]
pub struct TypeDef {
    pub name: String,
    pub typ: Type,
    pub span: Span,
}

/// A global (`is_local == false`), a local or a parameter.
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub typ: Type,
    pub is_local: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Constant {
    pub name: String,
    pub typ: Type,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    /// Name of the owning module.
    pub module: String,
    pub parameters: Vec<Variable>,
    pub return_type: Type,
    /// Absent for declaration-only functions.
    pub body: Option<Stmt>,
    /// Locals declared anywhere in the body.
    pub locals: Vec<Variable>,
    pub span: Span,
}

impl Function {
    /// `module.name`, as used in diagnostics.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.module, self.name)
    }
}
