use std::fmt::Display;

use crate::{symbols::scope::ScopeRef, Span};

use super::{declarations::VarDecl, expressions::Expr};

#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    Expression(Expr),
    Declaration(VarDecl),
    Block(Block),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    For(ForStmt),
    Return(Expr),
    Empty,
}

/// `{ ... }`; `scope` is attached by the symbol pass.
#[derive(Debug, Clone)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub scope: Option<ScopeRef>,
}

/// `for (init; condition; update) body`
///
/// At most one of `init_expr` and `init_decl` is present. `decl_scope` holds
/// the declaration's scope and is attached only when `init_decl` is.
#[derive(Debug, Clone)]
pub struct ForStmt {
    pub init_expr: Option<Expr>,
    pub init_decl: Option<Box<VarDecl>>,
    pub condition: Option<Expr>,
    pub update: Option<Expr>,
    pub body: Box<Stmt>,
    pub decl_scope: Option<ScopeRef>,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl Block {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Block {
            statements,
            scope: None,
        }
    }
}

impl Stmt {
    /// Writes the statement C-style, nested lines indented by `depth` levels.
    pub fn write_indented(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        let indent = "    ".repeat(depth);

        match &self.kind {
            StmtKind::Expression(expr) => writeln!(f, "{}{};", indent, expr),
            StmtKind::Declaration(decl) => writeln!(f, "{}{};", indent, decl),
            StmtKind::Block(block) => {
                writeln!(f, "{}{{", indent)?;
                for stmt in block.statements.iter() {
                    stmt.write_indented(f, depth + 1)?;
                }
                writeln!(f, "{}}}", indent)
            }
            StmtKind::If {
                condition,
                then_branch,
                else_branch,
            } => {
                writeln!(f, "{}if ({})", indent, condition)?;
                then_branch.write_indented(f, depth + 1)?;
                if let Some(else_branch) = else_branch {
                    writeln!(f, "{}else", indent)?;
                    else_branch.write_indented(f, depth + 1)?;
                }
                Ok(())
            }
            StmtKind::While { condition, body } => {
                writeln!(f, "{}while ({})", indent, condition)?;
                body.write_indented(f, depth + 1)
            }
            StmtKind::For(for_stmt) => {
                let init = match (&for_stmt.init_decl, &for_stmt.init_expr) {
                    (Some(decl), _) => decl.to_string(),
                    (None, Some(expr)) => expr.to_string(),
                    (None, None) => String::new(),
                };
                let condition = for_stmt
                    .condition
                    .as_ref()
                    .map(|expr| expr.to_string())
                    .unwrap_or_default();
                let update = for_stmt
                    .update
                    .as_ref()
                    .map(|expr| expr.to_string())
                    .unwrap_or_default();

                writeln!(f, "{}for ({}; {}; {})", indent, init, condition, update)?;
                for_stmt.body.write_indented(f, depth + 1)
            }
            StmtKind::Return(value) => writeln!(f, "{}return {};", indent, value),
            StmtKind::Empty => writeln!(f, "{};", indent),
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write_indented(f, 0)
    }
}
