//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs including:
//! - Global declarations and initializers
//! - Function definitions and parameters
//! - Expressions and operator precedence
//! - Control flow statements
//! - Syntax errors

use std::rc::Rc;

use crate::{
    ast::{
        declarations::{Initializer, Item, Program},
        expressions::ExprKind,
        statements::StmtKind,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
};

use super::parser::parse;

fn parse_source(source: &str) -> Result<Program, Error> {
    let file = Rc::new("test.c".to_string());
    let tokens = tokenize(source, Rc::clone(&file)).unwrap();
    parse(tokens, file)
}

/// Parses `int main() { return <expr>; }` and renders the returned expression.
fn render_return(expr: &str) -> String {
    let program = parse_source(&format!("int main() {{ return {}; }}", expr)).unwrap();
    let function = program.functions().next().unwrap();

    match &function.body[0].kind {
        StmtKind::Return(value) => value.to_string(),
        other => panic!("expected a return statement, found {:?}", other),
    }
}

#[test]
fn test_parse_empty_program() {
    let program = parse_source("").unwrap();
    assert!(program.items.is_empty());
}

#[test]
fn test_parse_global_declarations() {
    let program = parse_source("int a; int b = 5; int c[2][3]; int d[2] = {1, 2};").unwrap();
    assert_eq!(program.items.len(), 4);

    let rendered: Vec<String> = program
        .items
        .iter()
        .map(|item| match item {
            Item::Declaration(decl) => decl.to_string(),
            Item::Function(function) => panic!("unexpected function {}", function.name),
        })
        .collect();

    assert_eq!(
        rendered,
        vec!["int a", "int b = 5", "int c[2][3]", "int d[2] = {1, 2}"]
    );
}

#[test]
fn test_parse_mismatched_initializer_shapes() {
    // Both are left for the type checker to reject
    let program = parse_source("int a[2] = 1; int x = {1, 2};").unwrap();

    match &program.items[0] {
        Item::Declaration(decl) => {
            assert!(decl.is_array());
            assert!(matches!(decl.initializer(), Some(Initializer::Scalar(_))));
        }
        _ => panic!("expected a declaration"),
    }

    match &program.items[1] {
        Item::Declaration(decl) => {
            assert!(!decl.is_array());
            assert!(matches!(decl.initializer(), Some(Initializer::List(list)) if list.len() == 2));
        }
        _ => panic!("expected a declaration"),
    }
}

#[test]
fn test_parse_function_definition() {
    let program = parse_source("int add(int a, int b[][3]) { return a + b[0][1]; }").unwrap();
    let function = program.functions().next().unwrap();

    assert_eq!(function.name, "add");
    assert_eq!(function.params.len(), 2);
    assert!(function.params.iter().all(|param| param.is_parameter()));
    assert_eq!(function.params[1].dims(), Some(&[0, 3][..]));
    assert_eq!(function.body.len(), 1);
}

#[test]
fn test_parse_negative_dimension() {
    let program = parse_source("int a[-2];").unwrap();

    match &program.items[0] {
        Item::Declaration(decl) => assert_eq!(decl.dims(), Some(&[-2][..])),
        _ => panic!("expected a declaration"),
    }
}

#[test]
fn test_operator_precedence() {
    assert_eq!(render_return("1 + 2 * 3"), "(1 + (2 * 3))");
    assert_eq!(render_return("1 - 2 - 3"), "((1 - 2) - 3)");
    assert_eq!(render_return("a < b == c > d"), "((a < b) == (c > d))");
    assert_eq!(render_return("a || b && c"), "(a || (b && c))");
    assert_eq!(render_return("-a * !b"), "((-a) * (!b))");
    assert_eq!(render_return("~(1 + 2)"), "(~(1 + 2))");
}

#[test]
fn test_assignment_and_conditional_are_right_associative() {
    assert_eq!(render_return("a = b = 3"), "(a = (b = 3))");
    assert_eq!(render_return("a ? b : c ? d : e"), "(a ? b : (c ? d : e))");
    assert_eq!(render_return("x = a ? 1 : 2"), "(x = (a ? 1 : 2))");
}

#[test]
fn test_calls_and_indexing() {
    assert_eq!(render_return("f(1, g(2), a[1][2])"), "f(1, g(2), a[1][2])");
    assert_eq!(render_return("-a[i + 1]"), "(-a[(i + 1)])");
    assert_eq!(render_return("f()"), "f()");
}

#[test]
fn test_index_reference_shape() {
    let program = parse_source("int main() { a[1][2] = 3; }").unwrap();
    let function = program.functions().next().unwrap();

    match &function.body[0].kind {
        StmtKind::Expression(expr) => match &expr.kind {
            ExprKind::Assign { target, .. } => {
                assert_eq!(target.name, "a");
                assert_eq!(target.indices.len(), 2);
            }
            other => panic!("expected an assignment, found {:?}", other),
        },
        other => panic!("expected an expression statement, found {:?}", other),
    }
}

#[test]
fn test_parse_control_flow() {
    let source = r#"
        int main() {
            int s = 0;
            for (int i = 0; i < 10; i = i + 1) s = s + i;
            for (;;) ;
            while (s) { s = s - 1; }
            if (s) return 1; else return 2;
            return 0;
        }
    "#;
    let program = parse_source(source).unwrap();
    let body = &program.functions().next().unwrap().body;

    assert_eq!(body.len(), 6);
    assert!(matches!(body[0].kind, StmtKind::Declaration(_)));
    match &body[1].kind {
        StmtKind::For(for_stmt) => {
            assert!(for_stmt.init_decl.is_some());
            assert!(for_stmt.init_expr.is_none());
            assert!(for_stmt.condition.is_some());
            assert!(for_stmt.update.is_some());
        }
        other => panic!("expected a for loop, found {:?}", other),
    }
    match &body[2].kind {
        StmtKind::For(for_stmt) => {
            assert!(for_stmt.init_decl.is_none());
            assert!(for_stmt.condition.is_none());
            assert!(for_stmt.update.is_none());
            assert!(matches!(for_stmt.body.kind, StmtKind::Empty));
        }
        other => panic!("expected a for loop, found {:?}", other),
    }
    assert!(matches!(body[3].kind, StmtKind::While { .. }));
    assert!(matches!(
        body[4].kind,
        StmtKind::If {
            else_branch: Some(_),
            ..
        }
    ));
}

#[test]
fn test_assignment_to_non_reference_fails() {
    let error = parse_source("int main() { 1 = 2; }").unwrap_err();
    assert!(matches!(error.kind(), ErrorImpl::UnexpectedTokenDetailed { .. }));
}

#[test]
fn test_missing_semicolon_fails() {
    let error = parse_source("int main() { return 1 }").unwrap_err();
    assert!(matches!(error.kind(), ErrorImpl::UnexpectedToken { token } if token == "}"));
    assert_eq!(error.get_position().0, 22);
}

#[test]
fn test_number_out_of_range_fails() {
    let error = parse_source("int x = 2147483648;").unwrap_err();
    assert!(matches!(error.kind(), ErrorImpl::NumberParseError { .. }));
}

#[test]
fn test_unterminated_body_fails() {
    assert!(parse_source("int main() { return 1;").is_err());
}

#[test]
fn test_program_display() {
    let program =
        parse_source("int g[2] = {1, 2}; int main() { for (;;) ; if (g[0]) return 1; else { return 2; } }")
            .unwrap();

    let expected = "\
int g[2] = {1, 2};
int main() {
    for (; ; )
        ;
    if (g[0])
        return 1;
    else
        {
            return 2;
        }
}
";
    assert_eq!(program.to_string(), expected);
}
