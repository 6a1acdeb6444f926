//! Unit tests for the declaration pass and the type checker.

use std::rc::Rc;

use crate::{
    ast::{
        declarations::{Initializer, Item, Program, VarDecl},
        expressions::{Expr, ExprKind, LvalueKind},
        statements::StmtKind,
    },
    errors::{diagnostics::Diagnostics, errors::ErrorImpl},
    lexer::lexer::tokenize,
    parser::parser::parse,
    symbols::types::Type,
    Position, Span,
};

use super::{
    symbol_pass::{build_program, build_symbols, SymbolBuilder},
    type_checker::{check_program, check_types, TypeChecker},
};

fn parse_source(source: &str) -> Program {
    let file = Rc::new("test.c".to_string());
    let tokens = tokenize(source, Rc::clone(&file)).unwrap();
    parse(tokens, file).unwrap()
}

/// Parses, builds symbols and type checks `source`, returning every
/// diagnostic of both passes.
fn analyze(source: &str) -> (Program, Diagnostics) {
    let mut program = parse_source(source);
    let mut diagnostics = Diagnostics::new();
    build_symbols(&mut program, &mut diagnostics);
    check_types(&mut program, &mut diagnostics).unwrap();
    (program, diagnostics)
}

fn names(diagnostics: &Diagnostics) -> Vec<&str> {
    diagnostics.iter().map(|error| error.get_error_name()).collect()
}

fn span() -> Span {
    let file = Rc::new("test.c".to_string());
    Span {
        start: Position(0, Rc::clone(&file)),
        end: Position(0, file),
    }
}

#[test]
fn test_declaration_shapes() {
    let scalar = VarDecl::new("a".to_string(), span());
    assert!(!scalar.is_array());
    assert!(scalar.initializer().is_none());
    assert_eq!(scalar.declared_type(), Type::Int);

    let initialized = VarDecl::with_init(
        "b".to_string(),
        Expr::new(ExprKind::IntConst(3), span()),
        span(),
    );
    assert!(matches!(initialized.initializer(), Some(Initializer::Scalar(_))));

    let array = VarDecl::array("c".to_string(), vec![2, 3], span());
    assert!(array.is_array());
    assert_eq!(array.dims(), Some(&[2, 3][..]));
    assert_eq!(array.declared_type(), Type::array(Type::Int, vec![2, 3]));

    let listed = VarDecl::array_with_init(
        "d".to_string(),
        vec![2],
        vec![
            Expr::new(ExprKind::IntConst(1), span()),
            Expr::new(ExprKind::IntConst(2), span()),
        ],
        span(),
    );
    assert_eq!(listed.to_string(), "int d[2] = {1, 2}");

    let param = VarDecl::parameter("p".to_string(), Some(vec![0, 3]), span());
    assert!(param.is_parameter() && param.is_array());
    assert!(!listed.is_parameter());
    assert_eq!(param.to_string(), "int p[][3]");
}

#[test]
fn test_symbol_pass_attaches_everything() {
    let mut program = parse_source(
        "int g; int f(int a) { int b; { int c; } for (int i = 0; i < 1; i = i + 1) ; return a; }",
    );
    let mut diagnostics = Diagnostics::new();
    build_symbols(&mut program, &mut diagnostics);

    assert!(diagnostics.is_empty());
    let global = program.global_scope.clone().unwrap();
    assert_eq!(global.borrow().len(), 2);

    match &program.items[0] {
        Item::Declaration(decl) => assert!(decl.symbol().unwrap().is_global_var()),
        _ => panic!("expected a declaration"),
    }

    let function = program.functions().next().unwrap();
    let symbol = function.symbol.clone().unwrap();
    assert!(symbol.is_function());
    // `a` and `b` share the function scope
    assert_eq!(symbol.get_associated_scope().unwrap().borrow().len(), 2);

    match &function.body[1].kind {
        StmtKind::Block(block) => assert_eq!(block.scope.as_ref().unwrap().borrow().len(), 1),
        other => panic!("expected a block, found {:?}", other),
    }
    match &function.body[2].kind {
        StmtKind::For(for_stmt) => assert!(for_stmt.decl_scope.is_some()),
        other => panic!("expected a for loop, found {:?}", other),
    }
}

#[test]
fn test_symbol_pass_reports_redeclaration() {
    let mut program = parse_source("int x; int x; int f(int a) { int a; return 0; }");
    let mut diagnostics = Diagnostics::new();
    build_symbols(&mut program, &mut diagnostics);

    assert_eq!(names(&diagnostics), vec!["DeclConflict", "DeclConflict"]);

    // The second `x` still gets a symbol
    match &program.items[1] {
        Item::Declaration(decl) => assert!(decl.symbol().is_some()),
        _ => panic!("expected a declaration"),
    }
}

#[test]
fn test_scope_calls_are_balanced() {
    let source = r#"
        int f(int a[][2]) {
            { { undefined; } }
            for (int i = 0; i < a; i = i + 1) { int j = a[i]; }
            while (a) { int k[0]; }
            return a;
        }
    "#;
    let mut program = parse_source(source);
    let mut diagnostics = Diagnostics::new();

    let mut builder = SymbolBuilder::new(&mut diagnostics);
    build_program(&mut builder, &mut program);
    assert_eq!(builder.scopes().opened(), builder.scopes().closed());
    assert_eq!(builder.scopes().depth(), 0);

    let mut checker = TypeChecker::new(&mut diagnostics);
    check_program(&mut checker, &mut program).unwrap();

    // global, function, two blocks, for declaration, for body, while body
    assert_eq!(checker.scopes().opened(), 7);
    assert_eq!(checker.scopes().closed(), 7);
    assert_eq!(checker.scopes().depth(), 0);
    assert!(!diagnostics.is_empty());
}

#[test]
fn test_expressions_are_annotated() {
    let (program, diagnostics) =
        analyze("int g[2][3]; int main() { int x; x = g[1][2] + 1; return x; }");
    assert!(diagnostics.is_empty());

    let function = program.functions().next().unwrap();
    let expr = match &function.body[1].kind {
        StmtKind::Expression(expr) => expr,
        other => panic!("expected an expression statement, found {:?}", other),
    };

    assert_eq!(expr.ty, Some(Type::Int));
    let (target, value) = match &expr.kind {
        ExprKind::Assign { target, value } => (target, value),
        other => panic!("expected an assignment, found {:?}", other),
    };
    assert_eq!(target.lvalue_kind, Some(LvalueKind::SimpleVar));
    assert!(!target.symbol.as_ref().unwrap().is_global_var());

    let element = match &value.kind {
        ExprKind::Binary { left, .. } => left,
        other => panic!("expected a binary expression, found {:?}", other),
    };
    match &element.kind {
        ExprKind::Lvalue(var_ref) => {
            assert_eq!(var_ref.lvalue_kind, Some(LvalueKind::ArrayElement));
            assert_eq!(var_ref.ty, Some(Type::Int));
            assert!(var_ref.symbol.as_ref().unwrap().is_global_var());
            assert!(var_ref.indices.iter().all(|index| index.ty == Some(Type::Int)));
        }
        other => panic!("expected a reference, found {:?}", other),
    }
}

#[test]
fn test_rejected_reference_has_no_symbol() {
    let (program, diagnostics) = analyze("int main() { int a[2]; return a[0][1] + b; }");
    assert_eq!(names(&diagnostics), vec!["BadIndex", "SymbolNotFound"]);

    let function = program.functions().next().unwrap();
    match &function.body[1].kind {
        StmtKind::Return(value) => {
            assert_eq!(value.ty, Some(Type::Int));
            match &value.kind {
                ExprKind::Binary { left, right, .. } => {
                    assert_eq!(left.ty, Some(Type::Error));
                    assert_eq!(right.ty, Some(Type::Error));
                    match &left.kind {
                        ExprKind::Lvalue(var_ref) => {
                            assert!(var_ref.symbol.is_none());
                            assert!(var_ref.lvalue_kind.is_none());
                        }
                        other => panic!("expected a reference, found {:?}", other),
                    }
                }
                other => panic!("expected a binary expression, found {:?}", other),
            }
        }
        other => panic!("expected a return statement, found {:?}", other),
    }
}

#[test]
fn test_rerun_is_idempotent() {
    let source = r#"
        int g = 1;
        int h = g;
        int f(int a, int b[2]) { return a; }
        int main() {
            int x[2];
            if (x) return f(1);
            return f(x, 2) + y;
        }
    "#;
    let (mut program, first) = analyze(source);
    let first_types: Vec<Option<Type>> = collect_return_types(&program);

    let mut second = Diagnostics::new();
    check_types(&mut program, &mut second).unwrap();

    let render = |diagnostics: &Diagnostics| {
        diagnostics
            .iter()
            .map(|error| format!("{}@{}", error.get_error_name(), error.get_position().0))
            .collect::<Vec<String>>()
    };
    assert!(!first.is_empty());
    assert_eq!(render(&first), render(&second));
    assert_eq!(first_types, collect_return_types(&program));
}

fn collect_return_types(program: &Program) -> Vec<Option<Type>> {
    program
        .functions()
        .flat_map(|function| function.body.iter())
        .filter_map(|stmt| match &stmt.kind {
            StmtKind::Return(value) => Some(value.ty.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_unresolved_tree_is_an_error() {
    let mut program = parse_source("int main() { return 0; }");
    let mut diagnostics = Diagnostics::new();

    let error = check_types(&mut program, &mut diagnostics).unwrap_err();
    assert!(matches!(error.kind(), ErrorImpl::UnresolvedTree { .. }));
    assert!(diagnostics.is_empty());
}
