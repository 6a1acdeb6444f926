use std::{fmt::Display, rc::Rc};

use crate::{
    lexer::tokens::TokenKind,
    symbols::{symbol::Symbol, types::Type},
    Span,
};

/// An expression node.
///
/// `ty` is filled in by the type checker; `None` means the node has not been
/// visited (yet).
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    pub ty: Option<Type>,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    IntConst(i32),
    Binary {
        operator: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        operator: UnaryOp,
        operand: Box<Expr>,
    },
    /// `condition ? then_expr : else_expr`
    Conditional {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    /// A reference read as a value
    Lvalue(VarRef),
    Call(CallExpr),
    Assign {
        target: VarRef,
        value: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Equ,
    Neq,
    Les,
    Leq,
    Grt,
    Geq,
    And,
    Or,
}

impl BinaryOp {
    pub fn from_token(kind: TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Dash => Some(BinaryOp::Sub),
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            TokenKind::Equals => Some(BinaryOp::Equ),
            TokenKind::NotEquals => Some(BinaryOp::Neq),
            TokenKind::Less => Some(BinaryOp::Les),
            TokenKind::LessEquals => Some(BinaryOp::Leq),
            TokenKind::Greater => Some(BinaryOp::Grt),
            TokenKind::GreaterEquals => Some(BinaryOp::Geq),
            TokenKind::And => Some(BinaryOp::And),
            TokenKind::Or => Some(BinaryOp::Or),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    BitNot,
    Not,
}

impl UnaryOp {
    pub fn from_token(kind: TokenKind) -> Option<UnaryOp> {
        match kind {
            TokenKind::Dash => Some(UnaryOp::Neg),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            TokenKind::Not => Some(UnaryOp::Not),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LvalueKind {
    SimpleVar,
    ArrayElement,
}

/// A variable reference, optionally indexed: `a` or `a[i][j]`.
#[derive(Debug, Clone)]
pub struct VarRef {
    pub name: String,
    pub indices: Vec<Expr>,
    pub span: Span,
    pub ty: Option<Type>,
    pub symbol: Option<Rc<Symbol>>,
    pub lvalue_kind: Option<LvalueKind>,
}

impl VarRef {
    pub fn new(name: String, span: Span) -> Self {
        VarRef {
            name,
            indices: vec![],
            span,
            ty: None,
            symbol: None,
            lvalue_kind: None,
        }
    }

    pub fn is_array_ref(&self) -> bool {
        !self.indices.is_empty()
    }

    /// The resolved type, `Error` when unresolved.
    pub fn resolved_type(&self) -> Type {
        self.ty.clone().unwrap_or(Type::Error)
    }
}

#[derive(Debug, Clone)]
pub struct CallExpr {
    pub name: String,
    pub arguments: Vec<Expr>,
    pub symbol: Option<Rc<Symbol>>,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr {
            kind,
            span,
            ty: None,
        }
    }

    /// The resolved type, `Error` when unresolved.
    pub fn resolved_type(&self) -> Type {
        self.ty.clone().unwrap_or(Type::Error)
    }

    pub fn is_int_const(&self) -> bool {
        matches!(self.kind, ExprKind::IntConst(_))
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Equ => "==",
            BinaryOp::Neq => "!=",
            BinaryOp::Les => "<",
            BinaryOp::Leq => "<=",
            BinaryOp::Grt => ">",
            BinaryOp::Geq => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        };
        write!(f, "{}", symbol)
    }
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::BitNot => write!(f, "~"),
            UnaryOp::Not => write!(f, "!"),
        }
    }
}

impl Display for VarRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)?;
        for index in self.indices.iter() {
            write!(f, "[{}]", index)?;
        }
        Ok(())
    }
}

// Fully parenthesized, so the output shows how the parser grouped things
impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ExprKind::IntConst(value) => write!(f, "{}", value),
            ExprKind::Binary {
                operator,
                left,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            ExprKind::Unary { operator, operand } => write!(f, "({}{})", operator, operand),
            ExprKind::Conditional {
                condition,
                then_expr,
                else_expr,
            } => write!(f, "({} ? {} : {})", condition, then_expr, else_expr),
            ExprKind::Lvalue(var_ref) => write!(f, "{}", var_ref),
            ExprKind::Call(call) => {
                let arguments = call
                    .arguments
                    .iter()
                    .map(|argument| argument.to_string())
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "{}({})", call.name, arguments)
            }
            ExprKind::Assign { target, value } => write!(f, "({} = {})", target, value),
        }
    }
}
