//! End-to-end tests: source text through the lexer, parser and type checker.

use c3check::{
    ast::{
        ast::Unit,
        expressions::{Expr, ExprKind},
        statements::StmtKind,
        types::BaseType,
    },
    errors::errors::ErrorImpl,
    format_error,
    parser::parser::parse_unit,
    type_checker::{
        diagnostics::Diagnostics,
        type_checker::{type_check, CheckResult, ModuleOutcome},
    },
};
use indoc::indoc;

fn run(sources: &[(&str, &str)]) -> (Unit, Diagnostics, CheckResult<Vec<ModuleOutcome>>) {
    let mut unit = parse_unit(sources.iter().copied()).unwrap();
    let mut diagnostics = Diagnostics::new();
    let result = type_check(&mut unit, &mut diagnostics);
    (unit, diagnostics, result)
}

fn returned_value(unit: &Unit, module: &str, function: &str) -> Expr {
    let function = unit.module(module).unwrap().function(function).unwrap();
    let StmtKind::Compound(statements) = &function.body.as_ref().unwrap().kind else {
        panic!("expected a block body");
    };
    match &statements.last().unwrap().kind {
        StmtKind::Return(Some(value)) => value.clone(),
        other => panic!("expected a return, got {:?}", other),
    }
}

#[test]
fn test_check_multi_module_program() {
    let (unit, diagnostics, result) = run(&[
        (
            "math.c3",
            indoc! {"
                module math;

                type Vec2 = struct { x: double; y: double; };

                const ORIGIN_X: double = 0;

                function half(value: double): double {
                    return value / 2.0;
                }

                function dot(a: Vec2*, b: Vec2*): double {
                    return (*a).x * (*b).x + (*a).y * (*b).y;
                }
            "},
        ),
        (
            "app.c3",
            indoc! {"
                module app;
                import math;

                var cursor: math.Vec2;

                function run(n: int): double {
                    var scratch: math.Vec2;
                    scratch.x = math.ORIGIN_X;
                    scratch.y = math.half(n);
                    return math.dot(&cursor, &scratch);
                }

                function middle(n: int): double {
                    return math.half(n);
                }
            "},
        ),
    ]);

    assert!(diagnostics.is_empty(), "{:?}", diagnostics.errors());
    let outcomes = result.unwrap();
    assert_eq!(
        outcomes.iter().map(|outcome| outcome.module.as_str()).collect::<Vec<_>>(),
        vec!["math", "app"]
    );

    // The int argument is converted to the double parameter.
    let value = returned_value(&unit, "app", "middle");
    assert!(value.typ.as_ref().unwrap().is_base(BaseType::Double));
    let ExprKind::Call { arguments, .. } = &value.kind else {
        panic!("expected a call, got {:?}", value.kind);
    };
    match &arguments[0].kind {
        ExprKind::TypeCast {
            target,
            expr,
            implicit,
        } => {
            assert!(*implicit);
            assert!(target.is_base(BaseType::Double));
            assert!(expr.typ.as_ref().unwrap().is_base(BaseType::Int));
            assert_eq!(expr.is_lvalue, Some(false));
        }
        other => panic!("expected an implicit cast, got {:?}", other),
    }
}

#[test]
fn test_errors_are_collected_across_modules() {
    let (_, diagnostics, result) = run(&[
        (
            "a.c3",
            indoc! {r#"
                module a;
                function f(): int {
                    return "text";
                }
            "#},
        ),
        (
            "b.c3",
            indoc! {"
                module b;
                function g() {
                    var x: int;
                    x = true;
                    if (x) g();
                }
                function h() {
                    g();
                }
            "},
        ),
    ]);

    assert_eq!(diagnostics.len(), 3);
    assert_eq!(diagnostics.count_of("TypeMismatch"), 2);
    assert_eq!(diagnostics.count_of("InvalidConditionType"), 1);

    let files: Vec<&str> = diagnostics
        .errors()
        .iter()
        .map(|error| error.get_position().1.as_str())
        .collect();
    assert_eq!(files, vec!["a.c3", "b.c3", "b.c3"]);

    assert!(matches!(
        result.unwrap_err().get_kind(),
        ErrorImpl::SemanticErrors { modules: 2 }
    ));
}

#[test]
fn test_diagnostic_renders_source_line() {
    let source = indoc! {"
        module m;
        function f(flag: bool): int {
            var count: int;
            count = flag;
            return count;
        }
    "};
    let (_, diagnostics, result) = run(&[("m.c3", source)]);
    assert!(result.is_err());
    assert_eq!(diagnostics.len(), 1);

    let rendered = format_error(&diagnostics.errors()[0], "m.c3", source);
    assert!(rendered.starts_with("Error: TypeMismatch"), "{}", rendered);
    assert!(rendered.contains("-> m.c3"));
    assert!(rendered.contains("4 | count = flag;"), "{}", rendered);
}

#[test]
fn test_unknown_import_stops_before_checking() {
    let (_, diagnostics, result) = run(&[(
        "m.c3",
        indoc! {"
            module m;
            import nowhere;
            function f() { f(1); }
        "},
    )]);

    assert!(diagnostics.is_empty());
    assert!(matches!(
        result.unwrap_err().get_kind(),
        ErrorImpl::UnknownModule { module } if module == "nowhere"
    ));
}

#[test]
fn test_duplicate_module_is_a_redefinition() {
    let (_, diagnostics, result) = run(&[
        ("one.c3", "module m; function f() {}"),
        ("two.c3", "module m; function g() {}"),
    ]);

    assert!(diagnostics.is_empty());
    assert_eq!(result.unwrap_err().get_error_name(), "Redefinition");
}

#[test]
fn test_syntax_errors_fail_before_checking() {
    let error = parse_unit([
        ("good.c3", "module good;"),
        ("bad.c3", "module bad; function f( { }"),
    ])
    .unwrap_err();
    assert_eq!(error.get_position().1.as_str(), "bad.c3");

    let error = parse_unit([("lex.c3", "module lex; var x: int @ 1;")]).unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_checking_twice_is_stable() {
    let source = indoc! {"
        module m;
        function f(b: byte): int {
            var total: int;
            total = b + 1;
            return total;
        }
    "};
    let mut unit = parse_unit([("m.c3", source)]).unwrap();

    let mut first = Diagnostics::new();
    type_check(&mut unit, &mut first).unwrap();
    let after_first = format!("{:?}", unit.modules[0].functions[0].body);

    let mut second = Diagnostics::new();
    type_check(&mut unit, &mut second).unwrap();
    let after_second = format!("{:?}", unit.modules[0].functions[0].body);

    assert!(first.is_empty() && second.is_empty());
    assert_eq!(after_first, after_second);
}
