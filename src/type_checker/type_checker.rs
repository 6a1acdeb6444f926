use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::{
        declarations::{FuncDefn, Initializer, Item, Program, VarDecl},
        expressions::{CallExpr, Expr, ExprKind, LvalueKind, VarRef},
        statements::{ForStmt, Stmt, StmtKind},
    },
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    symbols::{
        scope::{ScopeRef, ScopeStack},
        types::Type,
    },
    Position,
};

/// State for one type checking run.
///
/// `return_type` holds the declared return type of the function being
/// walked. Function definitions never nest, so one slot is enough.
pub struct TypeChecker<'a> {
    scopes: ScopeStack,
    diagnostics: &'a mut Diagnostics,
    return_type: Type,
}

impl<'a> TypeChecker<'a> {
    pub fn new(diagnostics: &'a mut Diagnostics) -> Self {
        TypeChecker {
            scopes: ScopeStack::new(),
            diagnostics,
            return_type: Type::Error,
        }
    }

    pub fn scopes(&self) -> &ScopeStack {
        &self.scopes
    }

    fn issue(&mut self, position: &Position, error: ErrorImpl) {
        self.diagnostics.issue(position.clone(), error);
    }

    /// Runs `walk` with `scope` open. The scope is closed on every path,
    /// including when `walk` fails.
    fn within_scope(
        &mut self,
        scope: ScopeRef,
        walk: impl FnOnce(&mut Self) -> Result<(), Error>,
    ) -> Result<(), Error> {
        self.scopes.open(scope);
        let result = walk(self);
        self.scopes.close();
        result
    }

    /// Reports `UnexpectedType` unless `expr` has type `expected` or has
    /// already been diagnosed.
    fn expect_type(&mut self, expr: &Expr, expected: &Type) {
        let received = expr.resolved_type();
        if !received.is_error() && !received.equal(expected) {
            self.issue(
                &expr.span.start,
                ErrorImpl::UnexpectedType {
                    expected: expected.clone(),
                    received,
                },
            );
        }
    }

    /// Reports `BadTestExpr` unless `expr` is exactly `int`.
    fn expect_test(&mut self, expr: &Expr) {
        let ty = expr.resolved_type();
        if !ty.is_error() && !ty.equal(&Type::Int) {
            self.issue(&expr.span.start, ErrorImpl::BadTestExpr);
        }
    }
}

fn unresolved(node: &str, position: &Position) -> Error {
    Error::new(
        ErrorImpl::UnresolvedTree {
            node: String::from(node),
        },
        position.clone(),
    )
}

/// Type checks `program`, which must already carry the scopes and symbols
/// of the declaration pass.
///
/// Every violation goes to `diagnostics` and the walk carries on. `Err` is
/// returned only when a scope or symbol the declaration pass should have
/// attached is missing.
pub fn check_types(program: &mut Program, diagnostics: &mut Diagnostics) -> Result<(), Error> {
    let mut checker = TypeChecker::new(diagnostics);
    check_program(&mut checker, program)
}

pub fn check_program(checker: &mut TypeChecker, program: &mut Program) -> Result<(), Error> {
    let global = program
        .global_scope
        .clone()
        .ok_or_else(|| unresolved("global scope", &program.span.start))?;

    checker.within_scope(global, |checker| {
        for item in program.items.iter_mut() {
            match item {
                Item::Declaration(decl) => check_var_decl(checker, decl)?,
                Item::Function(function) => check_function(checker, function)?,
            }
        }

        Ok(())
    })
}

fn check_function(checker: &mut TypeChecker, function: &mut FuncDefn) -> Result<(), Error> {
    debug!(function = %function.name, "type checking function");

    let symbol = function
        .symbol
        .clone()
        .ok_or_else(|| unresolved("function symbol", &function.span.start))?;
    let scope = symbol
        .get_associated_scope()
        .ok_or_else(|| unresolved("function scope", &function.span.start))?;
    let signature = symbol
        .get_type()
        .as_function()
        .ok_or_else(|| unresolved("function type", &function.span.start))?;

    checker.return_type = signature.result_type().clone();

    checker.within_scope(scope, |checker| {
        for param in function.params.iter_mut() {
            check_var_decl(checker, param)?;
        }

        for stmt in function.body.iter_mut() {
            check_stmt(checker, stmt)?;
        }

        Ok(())
    })
}

pub fn check_var_decl(checker: &mut TypeChecker, decl: &mut VarDecl) -> Result<(), Error> {
    let position = decl.span().start.clone();
    let symbol = decl
        .symbol()
        .ok_or_else(|| unresolved("declaration symbol", &position))?;
    let declared = symbol.get_type().clone();
    let is_global = symbol.is_global_var();
    let is_array = decl.is_array();

    // A parameter's leading dimension may be left unsized
    let exempt_first = decl.is_parameter();
    let bad_dims = decl
        .dims()
        .unwrap_or(&[])
        .iter()
        .enumerate()
        .filter(|(index, dim)| **dim <= 0 && !(exempt_first && *index == 0))
        .count();
    for _ in 0..bad_dims {
        checker.issue(&position, ErrorImpl::ZeroLengthedArray);
    }

    match decl.initializer_mut() {
        None => {}
        Some(Initializer::Scalar(init)) => {
            if is_array {
                checker.issue(&position, ErrorImpl::NotArray);
            }

            check_expr(checker, init)?;

            if is_global && !init.is_int_const() {
                checker.issue(&init.span.start, ErrorImpl::NotConstInit);
            }

            let received = init.resolved_type();
            if !received.compatible(&declared) {
                checker.issue(
                    &position,
                    ErrorImpl::Incompatible {
                        expected: declared,
                        received,
                    },
                );
            }
        }
        Some(Initializer::List(elements)) => {
            if !is_array {
                checker.issue(&position, ErrorImpl::NotArray);
            }

            for element in elements.iter_mut() {
                check_expr(checker, element)?;

                if is_global && !element.is_int_const() {
                    checker.issue(&element.span.start, ErrorImpl::NotConstInit);
                }
            }
        }
    }

    Ok(())
}

pub fn check_stmt(checker: &mut TypeChecker, stmt: &mut Stmt) -> Result<(), Error> {
    match &mut stmt.kind {
        StmtKind::Expression(expr) => check_expr(checker, expr),
        StmtKind::Declaration(decl) => check_var_decl(checker, decl),
        StmtKind::Block(block) => {
            let scope = block
                .scope
                .clone()
                .ok_or_else(|| unresolved("block scope", &stmt.span.start))?;

            checker.within_scope(scope, |checker| {
                for stmt in block.statements.iter_mut() {
                    check_stmt(checker, stmt)?;
                }
                Ok(())
            })
        }
        StmtKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            check_expr(checker, condition)?;
            checker.expect_test(condition);

            check_stmt(checker, then_branch)?;
            if let Some(else_branch) = else_branch {
                check_stmt(checker, else_branch)?;
            }
            Ok(())
        }
        StmtKind::While { condition, body } => {
            check_expr(checker, condition)?;
            checker.expect_test(condition);

            check_stmt(checker, body)
        }
        StmtKind::For(for_stmt) => check_for(checker, for_stmt, &stmt.span.start),
        StmtKind::Return(value) => {
            check_expr(checker, value)?;

            let expected = checker.return_type.clone();
            let received = value.resolved_type();
            if !expected.is_error() && !received.compatible(&expected) {
                checker.issue(
                    &stmt.span.start,
                    ErrorImpl::Incompatible { expected, received },
                );
            }
            Ok(())
        }
        StmtKind::Empty => Ok(()),
    }
}

fn check_for(
    checker: &mut TypeChecker,
    for_stmt: &mut ForStmt,
    position: &Position,
) -> Result<(), Error> {
    let ForStmt {
        init_expr,
        init_decl,
        condition,
        update,
        body,
        decl_scope,
    } = for_stmt;

    if let Some(init) = init_expr {
        check_expr(checker, init)?;
        checker.expect_test(init);
    }

    let Some(decl) = init_decl else {
        return check_for_clauses(checker, condition, update, body);
    };

    let scope = decl_scope
        .clone()
        .ok_or_else(|| unresolved("loop declaration scope", position))?;

    // The declaration's scope stays open until the body has been walked
    checker.within_scope(scope, |checker| {
        check_var_decl(checker, decl)?;
        check_for_clauses(checker, condition, update, body)
    })
}

fn check_for_clauses(
    checker: &mut TypeChecker,
    condition: &mut Option<Expr>,
    update: &mut Option<Expr>,
    body: &mut Stmt,
) -> Result<(), Error> {
    if let Some(condition) = condition {
        check_expr(checker, condition)?;
        checker.expect_test(condition);
    }

    if let Some(update) = update {
        check_expr(checker, update)?;
        checker.expect_test(update);
    }

    check_stmt(checker, body)
}

/// Computes and attaches the type of `expr` and everything below it.
pub fn check_expr(checker: &mut TypeChecker, expr: &mut Expr) -> Result<(), Error> {
    let ty = match &mut expr.kind {
        ExprKind::IntConst(_) => Type::Int,
        ExprKind::Binary { left, right, .. } => {
            check_expr(checker, left)?;
            checker.expect_type(left, &Type::Int);

            check_expr(checker, right)?;
            checker.expect_type(right, &Type::Int);

            Type::Int
        }
        ExprKind::Unary { operand, .. } => {
            check_expr(checker, operand)?;
            checker.expect_type(operand, &Type::Int);

            Type::Int
        }
        ExprKind::Conditional {
            condition,
            then_expr,
            else_expr,
        } => {
            for operand in [condition, then_expr, else_expr] {
                check_expr(checker, operand)?;
                checker.expect_type(operand, &Type::Int);
            }

            Type::Int
        }
        ExprKind::Lvalue(var_ref) => {
            check_var_ref(checker, var_ref)?;
            var_ref.resolved_type()
        }
        ExprKind::Call(call) => check_call(checker, call, &expr.span.start)?,
        ExprKind::Assign { target, value } => {
            check_var_ref(checker, target)?;
            check_expr(checker, value)?;

            let target_type = target.resolved_type();
            let value_type = value.resolved_type();
            if !target_type.is_error() && !value_type.compatible(&target_type) {
                checker.issue(
                    &expr.span.start,
                    ErrorImpl::Incompatible {
                        expected: target_type.clone(),
                        received: value_type,
                    },
                );
            }

            target_type
        }
    };

    expr.ty = Some(ty);
    Ok(())
}

/// Resolves a possibly indexed variable reference.
///
/// Every rejected reference ends up typed `Error` with no symbol attached.
fn check_var_ref(checker: &mut TypeChecker, var_ref: &mut VarRef) -> Result<(), Error> {
    let position = var_ref.span.start.clone();

    var_ref.ty = Some(Type::Error);
    var_ref.symbol = None;
    var_ref.lvalue_kind = None;

    let Some(symbol) = checker.scopes.lookup(&var_ref.name, &position) else {
        checker.issue(
            &position,
            ErrorImpl::SymbolNotFound {
                name: var_ref.name.clone(),
            },
        );
        return Ok(());
    };

    if !symbol.is_variable() {
        checker.issue(
            &position,
            ErrorImpl::NotVariable {
                name: var_ref.name.clone(),
            },
        );
        return Ok(());
    }

    if !var_ref.is_array_ref() {
        var_ref.ty = Some(symbol.get_type().clone());
        var_ref.symbol = Some(symbol);
        var_ref.lvalue_kind = Some(LvalueKind::SimpleVar);
        return Ok(());
    }

    let Some(array) = symbol.get_type().as_array() else {
        checker.issue(
            &position,
            ErrorImpl::NotVariable {
                name: var_ref.name.clone(),
            },
        );
        return Ok(());
    };

    if array.dim_count() != var_ref.indices.len() {
        checker.issue(&position, ErrorImpl::BadIndex);
        return Ok(());
    }

    for index in var_ref.indices.iter_mut() {
        check_expr(checker, index)?;
        checker.expect_type(index, &Type::Int);
    }

    var_ref.ty = Some(array.element_type().clone());
    var_ref.symbol = Some(Rc::clone(&symbol));
    var_ref.lvalue_kind = Some(LvalueKind::ArrayElement);
    Ok(())
}

/// Resolves a call and returns its type.
///
/// On an arity mismatch the arguments are left unvisited.
fn check_call(
    checker: &mut TypeChecker,
    call: &mut CallExpr,
    position: &Position,
) -> Result<Type, Error> {
    call.symbol = None;

    let Some(symbol) = checker.scopes.lookup(&call.name, position) else {
        checker.issue(
            position,
            ErrorImpl::SymbolNotFound {
                name: call.name.clone(),
            },
        );
        return Ok(Type::Error);
    };

    let Some(signature) = symbol.get_type().as_function().filter(|_| symbol.is_function()) else {
        checker.issue(
            position,
            ErrorImpl::NotMethod {
                name: call.name.clone(),
            },
        );
        return Ok(Type::Error);
    };

    if signature.param_count() != call.arguments.len() {
        checker.issue(
            position,
            ErrorImpl::BadArgCount {
                function: call.name.clone(),
                expected: signature.param_count(),
                received: call.arguments.len(),
            },
        );
        return Ok(Type::Error);
    }

    for (argument, param) in call.arguments.iter_mut().zip(signature.params.iter()) {
        check_expr(checker, argument)?;
        checker.expect_type(argument, param);
    }

    let result = signature.result_type().clone();
    call.symbol = Some(Rc::clone(&symbol));
    Ok(result)
}
