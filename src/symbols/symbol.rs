use std::rc::Rc;

use crate::Position;

use super::{scope::ScopeRef, types::Type};

/// A declared variable or function.
///
/// Symbols are created by the symbol pass and shared by `Rc`; two references
/// name the same symbol exactly when they point at the same allocation.
#[derive(Debug)]
pub struct Symbol {
    pub name: String,
    pub position: Position,
    pub kind: SymbolKind,
}

#[derive(Debug)]
pub enum SymbolKind {
    Variable(Variable),
    Function(Function),
}

#[derive(Debug)]
pub struct Variable {
    pub ty: Type,
    pub is_global: bool,
    pub is_parameter: bool,
}

#[derive(Debug)]
pub struct Function {
    pub ty: Type,
    pub scope: ScopeRef,
}

impl Symbol {
    pub fn variable(name: String, ty: Type, is_global: bool, position: Position) -> Rc<Symbol> {
        Rc::new(Symbol {
            name,
            position,
            kind: SymbolKind::Variable(Variable {
                ty,
                is_global,
                is_parameter: false,
            }),
        })
    }

    pub fn parameter(name: String, ty: Type, position: Position) -> Rc<Symbol> {
        Rc::new(Symbol {
            name,
            position,
            kind: SymbolKind::Variable(Variable {
                ty,
                is_global: false,
                is_parameter: true,
            }),
        })
    }

    /// `ty` must be a [`Type::Function`].
    pub fn function(name: String, ty: Type, scope: ScopeRef, position: Position) -> Rc<Symbol> {
        Rc::new(Symbol {
            name,
            position,
            kind: SymbolKind::Function(Function { ty, scope }),
        })
    }

    pub fn is_variable(&self) -> bool {
        matches!(self.kind, SymbolKind::Variable(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self.kind, SymbolKind::Function(_))
    }

    pub fn is_global_var(&self) -> bool {
        matches!(&self.kind, SymbolKind::Variable(variable) if variable.is_global)
    }

    pub fn get_type(&self) -> &Type {
        match &self.kind {
            SymbolKind::Variable(variable) => &variable.ty,
            SymbolKind::Function(function) => &function.ty,
        }
    }

    pub fn get_associated_scope(&self) -> Option<ScopeRef> {
        match &self.kind {
            SymbolKind::Function(function) => Some(Rc::clone(&function.scope)),
            SymbolKind::Variable(_) => None,
        }
    }
}
