//! Type checking and semantic analysis module.
//!
//! This module walks the parsed modules of a unit and, for every expression,
//! fills in its resolved type and whether it denotes storage (lvalue). Along
//! the way it:
//!
//! - Validates declared types, globals, constants and function signatures
//! - Enforces the typing rules of statements (conditions, switch, returns)
//! - Splices implicit casts into the tree where a conversion is allowed
//! - Reports every error to a [`Diagnostics`](diagnostics::Diagnostics) sink
//!   and carries on with the next statement or function
//!
//! Name resolution and type queries live in [`context`].

pub mod coerce;
pub mod context;
pub mod diagnostics;
pub mod expr;
pub mod stmt;
pub mod type_checker;
