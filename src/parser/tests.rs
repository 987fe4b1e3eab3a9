//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Module headers and top level declarations
//! - Function declarations and their locals
//! - Expressions and operator precedence
//! - Control flow statements
//! - Type annotations

use indoc::indoc;

use super::parser::{parse_source, parse_unit};
use crate::ast::{
    ast::Module,
    expressions::{BinaryOp, ExprKind, Literal, UnaryOp},
    statements::{Stmt, StmtKind},
    types::{BaseType, Type},
};

fn parse(source: &str) -> Module {
    parse_source(source, "test.c3").unwrap()
}

/// Body statements of the first function in `source`.
fn body(source: &str) -> Vec<Stmt> {
    let module = parse(source);
    match module.functions[0].body.as_ref().map(|body| &body.kind) {
        Some(StmtKind::Compound(statements)) => statements.clone(),
        other => panic!("expected a compound body, got {:?}", other),
    }
}

fn expression(source: &str) -> ExprKind {
    let wrapped = format!("module m; function f() {{ {}; }}", source);
    match &body(&wrapped)[0].kind {
        StmtKind::Expression(expr) => expr.kind.clone(),
        other => panic!("expected an expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_module_header() {
    let module = parse("module hello;");

    assert_eq!(module.name, "hello");
    assert!(module.functions.is_empty());
}

#[test]
fn test_missing_module_header() {
    let error = parse_source("function f() {}", "test.c3").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_parse_top_level_declarations() {
    let module = parse(indoc! {"
        module geometry;
        import io;
        type Point = struct { x: int; y: int; };
        var origin: Point;
        const SIZE: int = 4;
        function area(p: Point*): int;
    "});

    assert_eq!(module.imports[0].module, "io");
    assert_eq!(module.types[0].name, "Point");
    assert!(matches!(&module.types[0].typ, Type::Struct(s) if s.fields.len() == 2));
    assert_eq!(module.variables[0].name, "origin");
    assert!(!module.variables[0].is_local);
    assert!(matches!(&module.variables[0].typ, Type::Named(name) if name.module == "geometry"));
    assert_eq!(module.constants[0].name, "SIZE");

    let area = module.function("area").unwrap();
    assert!(area.body.is_none());
    assert_eq!(area.qualified_name(), "geometry.area");
    assert!(area.return_type.is_base(BaseType::Int));
    assert!(matches!(&area.parameters[0].typ, Type::Pointer(_)));
}

#[test]
fn test_function_without_return_type_is_void() {
    let module = parse("module m; function f() {}");

    assert!(module.functions[0].return_type.is_base(BaseType::Void));
    assert!(module.functions[0].body.is_some());
}

#[test]
fn test_local_declarations_are_collected() {
    let module = parse(indoc! {"
        module m;
        function f() {
            var a: int;
            var b: int = 3;
        }
        function g() {
            var c: byte;
        }
    "});

    let f = module.function("f").unwrap();
    let names: Vec<&str> = f.locals.iter().map(|local| local.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert!(f.locals.iter().all(|local| local.is_local));

    let g = module.function("g").unwrap();
    assert_eq!(g.locals.len(), 1);

    match &f.body.as_ref().unwrap().kind {
        StmtKind::Compound(statements) => {
            assert!(matches!(statements[0].kind, StmtKind::Empty));
            assert!(matches!(
                &statements[1].kind,
                StmtKind::Assignment { lhs, .. } if matches!(&lhs.kind, ExprKind::Identifier(name) if name == "b")
            ));
        }
        other => panic!("unexpected body {:?}", other),
    }
}

#[test]
fn test_operator_precedence() {
    match expression("a + b * c") {
        ExprKind::Binary { op, right, .. } => {
            assert_eq!(op, BinaryOp::Add);
            assert!(matches!(right.kind, ExprKind::Binary { op: BinaryOp::Mul, .. }));
        }
        other => panic!("unexpected {:?}", other),
    }

    match expression("a < b and c or d") {
        ExprKind::Binary { op, left, .. } => {
            assert_eq!(op, BinaryOp::Or);
            assert!(matches!(left.kind, ExprKind::Binary { op: BinaryOp::And, .. }));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_prefix_operators_bind_tightly() {
    match expression("-a * b") {
        ExprKind::Binary { op, left, .. } => {
            assert_eq!(op, BinaryOp::Mul);
            assert!(matches!(left.kind, ExprKind::Unary { op: UnaryOp::Minus, .. }));
        }
        other => panic!("unexpected {:?}", other),
    }

    assert!(matches!(
        expression("not a == b"),
        ExprKind::Unary { op: UnaryOp::Not, .. }
    ));
    assert!(matches!(expression("*p"), ExprKind::Deref(_)));
    assert!(matches!(
        expression("&s.x"),
        ExprKind::Unary { op: UnaryOp::AddressOf, operand } if matches!(operand.kind, ExprKind::Member { .. })
    ));
}

#[test]
fn test_postfix_expressions() {
    match expression("io.print(a[1], s.x)") {
        ExprKind::Call { callee, arguments } => {
            assert_eq!(callee.symbol_path().unwrap(), "io.print");
            assert_eq!(arguments.len(), 2);
            assert!(matches!(arguments[0].kind, ExprKind::Index { .. }));
            assert!(matches!(arguments[1].kind, ExprKind::Member { .. }));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_literals() {
    assert!(matches!(expression("42"), ExprKind::Literal(Literal::Int(42))));
    assert!(matches!(expression("0x10"), ExprKind::Literal(Literal::Int(16))));
    assert!(matches!(expression("true"), ExprKind::Literal(Literal::Bool(true))));
    assert!(matches!(expression("null"), ExprKind::Literal(Literal::Null)));
    assert!(matches!(expression("2.5"), ExprKind::Literal(Literal::Float(v)) if v == 2.5));
    assert!(matches!(expression("\"hi\""), ExprKind::Literal(Literal::Text(s)) if s == "hi"));
}

#[test]
fn test_cast_and_sizeof() {
    match expression("cast<int*>(p)") {
        ExprKind::TypeCast {
            target, implicit, ..
        } => {
            assert!(!implicit);
            assert_eq!(target.to_string(), "int*");
        }
        other => panic!("unexpected {:?}", other),
    }

    match expression("sizeof(Point[3])") {
        ExprKind::Sizeof(typ) => assert_eq!(typ.to_string(), "Point[3]"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_qualified_type_names() {
    let module = parse("module m; var p: geometry.Point*;");

    match &module.variables[0].typ {
        Type::Pointer(pointee) => match pointee.as_ref() {
            Type::Named(name) => {
                assert_eq!(name.module, "geometry");
                assert_eq!(name.name, "Point");
                assert_eq!(name.referenced_in, "m");
            }
            other => panic!("unexpected {:?}", other),
        },
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_array_sizes() {
    let module = parse("module m; var a: int[16]; var b: byte[0x10];");

    for variable in module.variables.iter() {
        match &variable.typ {
            Type::Array(array) => assert_eq!(array.size, 16),
            other => panic!("unexpected {:?}", other),
        }
    }

    let error = parse_source("module m; var c: int[1.5];", "test.c3").unwrap_err();
    assert_eq!(error.get_error_name(), "NumberParseError");
}

#[test]
fn test_control_flow_statements() {
    let statements = body(indoc! {"
        module m;
        function f(a: int) {
            if (a > 1) a = 2; else { a = 3; }
            while (a < 10) a = a + 1;
            for (a = 0; a < 3; a = a + 1) { }
            return;
        }
    "});

    assert!(matches!(statements[0].kind, StmtKind::If { .. }));
    assert!(matches!(statements[1].kind, StmtKind::While { .. }));
    assert!(matches!(
        &statements[2].kind,
        StmtKind::For { init, final_stmt, .. }
            if matches!(init.kind, StmtKind::Assignment { .. })
                && matches!(final_stmt.kind, StmtKind::Assignment { .. })
    ));
    assert!(matches!(statements[3].kind, StmtKind::Return(None)));
}

#[test]
fn test_if_without_else_gets_empty_branch() {
    let statements = body("module m; function f(a: int) { if (a == 1) a = 2; }");

    match &statements[0].kind {
        StmtKind::If { else_body, .. } => assert!(matches!(else_body.kind, StmtKind::Empty)),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_switch_statement() {
    let statements = body(indoc! {"
        module m;
        function f(a: int) {
            switch (a) {
                case 1: a = 2;
                case 2: a = 3; a = 4;
                default: return;
            }
        }
    "});

    match &statements[0].kind {
        StmtKind::Switch { options, .. } => {
            assert_eq!(options.len(), 3);
            assert!(matches!(options[0].body.kind, StmtKind::Assignment { .. }));
            assert!(matches!(&options[1].body.kind, StmtKind::Compound(inner) if inner.len() == 2));
            assert!(options[2].value.is_none());
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_global_initializer_is_rejected() {
    let error = parse_source("module m; var x: int = 3;", "test.c3").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_parse_unit_keeps_module_order() {
    let unit = parse_unit([("a.c3", "module a;"), ("b.c3", "module b; import a;")]).unwrap();

    assert_eq!(unit.modules.len(), 2);
    assert_eq!(unit.modules[1].imports[0].module, "a");
    assert!(unit.module("a").is_some());
}

#[test]
fn test_error_positions_carry_the_file_name() {
    let error = parse_source("module m; function f( {", "broken.c3").unwrap_err();

    assert_eq!(error.get_position().1.as_str(), "broken.c3");
}
