/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Compilation unit, modules and top-level declarations
/// - expressions: Expression nodes and operators
/// - statements: Statement nodes
/// - types: Type representations
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
