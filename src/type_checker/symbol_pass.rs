//! The declaration pass that runs before type checking.
//!
//! It creates every scope and every symbol, attaches them to the tree and
//! reports redeclarations. Names used in expressions are not resolved here;
//! that is left to the type checker, which sees declaration order.

use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::{
        declarations::{FuncDefn, Item, Program, VarDecl},
        statements::{Stmt, StmtKind},
    },
    errors::{diagnostics::Diagnostics, errors::ErrorImpl},
    symbols::{
        scope::{Scope, ScopeKind, ScopeRef, ScopeStack},
        symbol::Symbol,
        types::Type,
    },
};

pub struct SymbolBuilder<'a> {
    scopes: ScopeStack,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> SymbolBuilder<'a> {
    pub fn new(diagnostics: &'a mut Diagnostics) -> Self {
        SymbolBuilder {
            scopes: ScopeStack::new(),
            diagnostics,
        }
    }

    /// Declares `symbol` in the innermost scope unless the name is taken
    /// there, in which case `DeclConflict` is issued and the earlier symbol
    /// stays visible.
    fn declare(&mut self, symbol: &Rc<Symbol>) {
        if self.scopes.lookup_local(&symbol.name).is_some() {
            self.diagnostics.issue(
                symbol.position.clone(),
                ErrorImpl::DeclConflict {
                    name: symbol.name.clone(),
                },
            );
            return;
        }

        self.scopes.declare(Rc::clone(symbol));
    }

    fn with_scope(&mut self, scope: ScopeRef, walk: impl FnOnce(&mut Self)) {
        self.scopes.open(scope);
        walk(self);
        self.scopes.close();
    }

    pub fn scopes(&self) -> &ScopeStack {
        &self.scopes
    }
}

/// Builds and attaches all scopes and symbols of `program`.
pub fn build_symbols(program: &mut Program, diagnostics: &mut Diagnostics) {
    let mut builder = SymbolBuilder::new(diagnostics);
    build_program(&mut builder, program);
}

pub fn build_program(builder: &mut SymbolBuilder, program: &mut Program) {
    let global = Scope::new_ref(ScopeKind::Global);
    program.global_scope = Some(Rc::clone(&global));

    builder.with_scope(global, |builder| {
        for item in program.items.iter_mut() {
            match item {
                Item::Declaration(decl) => build_var_decl(builder, decl, true),
                Item::Function(function) => build_function(builder, function),
            }
        }
    });
}

fn build_var_decl(builder: &mut SymbolBuilder, decl: &mut VarDecl, is_global: bool) {
    let symbol = if decl.is_parameter() {
        Symbol::parameter(
            decl.name().to_string(),
            decl.declared_type(),
            decl.span().start.clone(),
        )
    } else {
        Symbol::variable(
            decl.name().to_string(),
            decl.declared_type(),
            is_global,
            decl.span().start.clone(),
        )
    };

    builder.declare(&symbol);
    decl.attach_symbol(symbol);
}

fn build_function(builder: &mut SymbolBuilder, function: &mut FuncDefn) {
    debug!(function = %function.name, "building symbols");

    let scope = Scope::new_ref(ScopeKind::Function);
    let param_types = function
        .params
        .iter()
        .map(|param| param.declared_type())
        .collect::<Vec<Type>>();
    let symbol = Symbol::function(
        function.name.clone(),
        Type::function(param_types, function.return_type.clone()),
        Rc::clone(&scope),
        function.span.start.clone(),
    );

    builder.declare(&symbol);
    function.symbol = Some(symbol);

    builder.with_scope(scope, |builder| {
        for param in function.params.iter_mut() {
            build_var_decl(builder, param, false);
        }

        for stmt in function.body.iter_mut() {
            build_stmt(builder, stmt);
        }
    });
}

fn build_stmt(builder: &mut SymbolBuilder, stmt: &mut Stmt) {
    match &mut stmt.kind {
        StmtKind::Declaration(decl) => build_var_decl(builder, decl, false),
        StmtKind::Block(block) => {
            let scope = Scope::new_ref(ScopeKind::Local);
            block.scope = Some(Rc::clone(&scope));

            builder.with_scope(scope, |builder| {
                for stmt in block.statements.iter_mut() {
                    build_stmt(builder, stmt);
                }
            });
        }
        StmtKind::If {
            then_branch,
            else_branch,
            ..
        } => {
            build_stmt(builder, then_branch);
            if let Some(else_branch) = else_branch {
                build_stmt(builder, else_branch);
            }
        }
        StmtKind::While { body, .. } => build_stmt(builder, body),
        StmtKind::For(for_stmt) => match for_stmt.init_decl.as_mut() {
            Some(decl) => {
                let scope = Scope::new_ref(ScopeKind::Local);
                for_stmt.decl_scope = Some(Rc::clone(&scope));

                let body = &mut for_stmt.body;
                builder.with_scope(scope, |builder| {
                    build_var_decl(builder, decl, false);
                    build_stmt(builder, body);
                });
            }
            None => build_stmt(builder, &mut for_stmt.body),
        },
        StmtKind::Expression(_) | StmtKind::Return(_) | StmtKind::Empty => {}
    }
}
