use std::{fmt::Display, rc::Rc};

use crate::{
    symbols::{scope::ScopeRef, symbol::Symbol, types::Type},
    Span,
};

use super::{expressions::Expr, statements::Stmt};

/// The initializer of a declaration.
#[derive(Debug, Clone)]
pub enum Initializer {
    /// `= expr`
    Scalar(Expr),
    /// `= { expr, ... }`, matched positionally against the elements
    List(Vec<Expr>),
}

/// A variable, array or parameter declaration.
///
/// The legal shapes are a scalar with or without an initializer and an array
/// with or without an initializer list; each has its own constructor.
/// [`VarDecl::from_parts`] also admits the mismatched shapes so the type
/// checker can report them.
#[derive(Debug, Clone)]
pub struct VarDecl {
    name: String,
    dims: Option<Vec<i64>>,
    initializer: Option<Initializer>,
    is_parameter: bool,
    span: Span,
    symbol: Option<Rc<Symbol>>,
}

impl VarDecl {
    /// `int name;`
    pub fn new(name: String, span: Span) -> Self {
        VarDecl::from_parts(name, None, None, span)
    }

    /// `int name = init;`
    pub fn with_init(name: String, init: Expr, span: Span) -> Self {
        VarDecl::from_parts(name, None, Some(Initializer::Scalar(init)), span)
    }

    /// `int name[d1][d2]...;`
    pub fn array(name: String, dims: Vec<i64>, span: Span) -> Self {
        VarDecl::from_parts(name, Some(dims), None, span)
    }

    /// `int name[d1]... = { e1, e2, ... };`
    pub fn array_with_init(name: String, dims: Vec<i64>, init_list: Vec<Expr>, span: Span) -> Self {
        VarDecl::from_parts(name, Some(dims), Some(Initializer::List(init_list)), span)
    }

    /// A function parameter; parameters never carry initializers.
    pub fn parameter(name: String, dims: Option<Vec<i64>>, span: Span) -> Self {
        VarDecl {
            is_parameter: true,
            ..VarDecl::from_parts(name, dims, None, span)
        }
    }

    pub fn from_parts(
        name: String,
        dims: Option<Vec<i64>>,
        initializer: Option<Initializer>,
        span: Span,
    ) -> Self {
        VarDecl {
            name,
            dims,
            initializer,
            is_parameter: false,
            span,
            symbol: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dims(&self) -> Option<&[i64]> {
        self.dims.as_deref()
    }

    pub fn is_array(&self) -> bool {
        self.dims.is_some()
    }

    pub fn is_parameter(&self) -> bool {
        self.is_parameter
    }

    pub fn initializer(&self) -> Option<&Initializer> {
        self.initializer.as_ref()
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// The type this declaration gives its symbol.
    pub fn declared_type(&self) -> Type {
        match &self.dims {
            Some(dims) => Type::array(Type::Int, dims.clone()),
            None => Type::Int,
        }
    }

    pub fn symbol(&self) -> Option<Rc<Symbol>> {
        self.symbol.clone()
    }

    pub(crate) fn attach_symbol(&mut self, symbol: Rc<Symbol>) {
        self.symbol = Some(symbol);
    }

    pub(crate) fn initializer_mut(&mut self) -> Option<&mut Initializer> {
        self.initializer.as_mut()
    }
}

impl Display for VarDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "int {}", self.name)?;
        for dim in self.dims.iter().flatten() {
            if *dim == 0 {
                write!(f, "[]")?;
            } else {
                write!(f, "[{}]", dim)?;
            }
        }

        match &self.initializer {
            None => Ok(()),
            Some(Initializer::Scalar(init)) => write!(f, " = {}", init),
            Some(Initializer::List(list)) => {
                let elements = list
                    .iter()
                    .map(|element| element.to_string())
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, " = {{{}}}", elements)
            }
        }
    }
}

/// A function definition. `symbol` carries the function's scope once the
/// symbol pass has run.
#[derive(Debug, Clone)]
pub struct FuncDefn {
    pub name: String,
    pub return_type: Type,
    pub params: Vec<VarDecl>,
    pub body: Vec<Stmt>,
    pub span: Span,
    pub symbol: Option<Rc<Symbol>>,
}

#[derive(Debug, Clone)]
pub enum Item {
    Declaration(VarDecl),
    Function(FuncDefn),
}

#[derive(Debug, Clone)]
pub struct Program {
    pub items: Vec<Item>,
    pub span: Span,
    pub global_scope: Option<ScopeRef>,
}

impl Program {
    pub fn functions(&self) -> impl Iterator<Item = &FuncDefn> {
        self.items.iter().filter_map(|item| match item {
            Item::Function(function) => Some(function),
            Item::Declaration(_) => None,
        })
    }
}

impl Display for FuncDefn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params = self
            .params
            .iter()
            .map(|param| param.to_string())
            .collect::<Vec<String>>()
            .join(", ");

        writeln!(f, "{} {}({}) {{", self.return_type, self.name, params)?;
        for stmt in self.body.iter() {
            stmt.write_indented(f, 1)?;
        }
        writeln!(f, "}}")
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for item in self.items.iter() {
            match item {
                Item::Declaration(decl) => writeln!(f, "{};", decl)?,
                Item::Function(function) => write!(f, "{}", function)?,
            }
        }
        Ok(())
    }
}
