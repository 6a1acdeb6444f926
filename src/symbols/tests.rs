//! Unit tests for types, symbols and the scope stack.

use std::rc::Rc;

use crate::Position;

use super::{
    scope::{Scope, ScopeKind, ScopeStack},
    symbol::Symbol,
    types::Type,
};

fn at(offset: u32) -> Position {
    Position(offset, Rc::new("test.c".to_string()))
}

#[test]
fn test_type_equality() {
    assert!(Type::Int.equal(&Type::Int));
    assert!(Type::Error.equal(&Type::Error));
    assert!(!Type::Int.equal(&Type::Error));

    let matrix = Type::array(Type::Int, vec![2, 3]);
    assert!(matrix.equal(&Type::array(Type::Int, vec![2, 3])));
    assert!(!matrix.equal(&Type::array(Type::Int, vec![3, 2])));
    assert!(!matrix.equal(&Type::array(Type::Int, vec![2])));
    assert!(!matrix.equal(&Type::Int));
}

#[test]
fn test_unsized_leading_dimension_matches_any_extent() {
    let parameter = Type::array(Type::Int, vec![0, 3]);

    assert!(parameter.equal(&Type::array(Type::Int, vec![4, 3])));
    assert!(Type::array(Type::Int, vec![4, 3]).equal(&parameter));
    assert!(!parameter.equal(&Type::array(Type::Int, vec![4, 2])));
    // Only the leading dimension may be unsized
    assert!(!Type::array(Type::Int, vec![4, 0]).equal(&Type::array(Type::Int, vec![4, 3])));
}

#[test]
fn test_compatibility_absorbs_errors() {
    let array = Type::array(Type::Int, vec![2]);

    assert!(Type::Int.compatible(&Type::Int));
    assert!(Type::Error.compatible(&Type::Int));
    assert!(Type::Int.compatible(&Type::Error));
    assert!(Type::Error.compatible(&array));
    assert!(!array.compatible(&Type::Int));
    assert!(!Type::Int.compatible(&array));
}

#[test]
fn test_function_types() {
    let ty = Type::function(vec![Type::Int, Type::array(Type::Int, vec![0, 3])], Type::Int);
    let function = ty.as_function().unwrap();

    assert_eq!(function.param_count(), 2);
    assert_eq!(*function.result_type(), Type::Int);
    assert!(ty.equal(&Type::function(
        vec![Type::Int, Type::array(Type::Int, vec![0, 3])],
        Type::Int
    )));
    assert!(!ty.equal(&Type::function(vec![Type::Int], Type::Int)));
}

#[test]
fn test_type_display() {
    assert_eq!(Type::Int.to_string(), "int");
    assert_eq!(Type::Error.to_string(), "error");
    assert_eq!(Type::array(Type::Int, vec![2, 3]).to_string(), "int[2][3]");
    assert_eq!(Type::array(Type::Int, vec![0, 3]).to_string(), "int[][3]");
    assert_eq!(
        Type::function(vec![Type::Int, Type::array(Type::Int, vec![4])], Type::Int).to_string(),
        "int(int, int[4])"
    );
}

#[test]
fn test_symbol_predicates() {
    let scope = Scope::new_ref(ScopeKind::Function);
    let global = Symbol::variable("g".to_string(), Type::Int, true, at(0));
    let local = Symbol::variable("l".to_string(), Type::Int, false, at(0));
    let param = Symbol::parameter("p".to_string(), Type::Int, at(0));
    let function = Symbol::function(
        "f".to_string(),
        Type::function(vec![], Type::Int),
        Rc::clone(&scope),
        at(0),
    );

    assert!(global.is_variable() && global.is_global_var());
    assert!(local.is_variable() && !local.is_global_var());
    assert!(param.is_variable() && !param.is_global_var());
    assert!(function.is_function() && !function.is_variable());
    assert!(!function.is_global_var());
    assert!(Rc::ptr_eq(&function.get_associated_scope().unwrap(), &scope));
    assert!(global.get_associated_scope().is_none());
}

#[test]
fn test_scope_stack_shadowing() {
    let mut stack = ScopeStack::new();
    let global = Scope::new_ref(ScopeKind::Global);
    let block = Scope::new_ref(ScopeKind::Local);

    let outer = Symbol::variable("x".to_string(), Type::Int, true, at(0));
    let inner = Symbol::variable("x".to_string(), Type::array(Type::Int, vec![2]), false, at(10));
    global.borrow_mut().declare(Rc::clone(&outer));
    block.borrow_mut().declare(Rc::clone(&inner));

    stack.open(global);
    stack.open(block);

    let found = stack.lookup("x", &at(20)).unwrap();
    assert!(Rc::ptr_eq(&found, &inner));

    stack.close();
    let found = stack.lookup("x", &at(20)).unwrap();
    assert!(Rc::ptr_eq(&found, &outer));

    assert!(stack.lookup("y", &at(20)).is_none());
}

#[test]
fn test_local_lookup_respects_declaration_order() {
    let mut stack = ScopeStack::new();
    let global = Scope::new_ref(ScopeKind::Global);
    let block = Scope::new_ref(ScopeKind::Local);

    let outer = Symbol::variable("x".to_string(), Type::Int, true, at(50));
    let inner = Symbol::variable("x".to_string(), Type::Int, false, at(30));
    global.borrow_mut().declare(Rc::clone(&outer));
    block.borrow_mut().declare(Rc::clone(&inner));

    stack.open(global);
    stack.open(block);

    // Before the local declaration the global is seen, even though the global
    // itself is declared later in the file
    let found = stack.lookup("x", &at(20)).unwrap();
    assert!(Rc::ptr_eq(&found, &outer));

    let found = stack.lookup("x", &at(30)).unwrap();
    assert!(Rc::ptr_eq(&found, &inner));
}

#[test]
fn test_scope_stack_counts() {
    let mut stack = ScopeStack::new();

    stack.open(Scope::new_ref(ScopeKind::Global));
    stack.open(Scope::new_ref(ScopeKind::Local));
    assert_eq!(stack.depth(), 2);

    assert!(stack.declare(Symbol::variable("a".to_string(), Type::Int, false, at(0))));
    assert!(stack.lookup_local("a").is_some());

    stack.close();
    stack.close();
    assert!(stack.close().is_none());
    assert!(!stack.declare(Symbol::variable("b".to_string(), Type::Int, false, at(0))));

    assert_eq!(stack.depth(), 0);
    assert_eq!(stack.opened(), 2);
    assert_eq!(stack.closed(), 2);
}
