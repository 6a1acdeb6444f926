//! Lexical scopes and the scope stack used to resolve names.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::Position;

use super::symbol::Symbol;

pub type ScopeRef = Rc<RefCell<Scope>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    /// Parameters and the top-level statements of one function body
    Function,
    /// A block or the declaration part of a `for`
    Local,
}

/// A name-to-symbol mapping for one lexical region.
#[derive(Debug)]
pub struct Scope {
    kind: ScopeKind,
    symbols: HashMap<String, Rc<Symbol>>,
}

impl Scope {
    pub fn new(kind: ScopeKind) -> Self {
        Scope {
            kind,
            symbols: HashMap::new(),
        }
    }

    pub fn new_ref(kind: ScopeKind) -> ScopeRef {
        Rc::new(RefCell::new(Scope::new(kind)))
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// Adds `symbol`, replacing any symbol of the same name.
    pub fn declare(&mut self, symbol: Rc<Symbol>) {
        self.symbols.insert(symbol.name.clone(), symbol);
    }

    pub fn lookup(&self, name: &str) -> Option<Rc<Symbol>> {
        self.symbols.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// The stack of currently open scopes, innermost last.
///
/// `opened` and `closed` count every push and pop over the stack's lifetime.
#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<ScopeRef>,
    opened: usize,
    closed: usize,
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack {
            scopes: vec![],
            opened: 0,
            closed: 0,
        }
    }

    pub fn open(&mut self, scope: ScopeRef) {
        self.scopes.push(scope);
        self.opened += 1;
    }

    /// Pops the innermost scope.
    pub fn close(&mut self) -> Option<ScopeRef> {
        let scope = self.scopes.pop();
        if scope.is_some() {
            self.closed += 1;
        }
        scope
    }

    /// Resolves `name` as seen from `position`, innermost scope first.
    ///
    /// Outside the global scope a symbol is only visible from its own
    /// declaration onwards, so a use before a local declaration falls through
    /// to any outer symbol of the same name.
    pub fn lookup(&self, name: &str, position: &Position) -> Option<Rc<Symbol>> {
        self.scopes.iter().rev().find_map(|scope| {
            let scope = scope.borrow();
            let is_global = scope.kind() == ScopeKind::Global;
            scope
                .lookup(name)
                .filter(|symbol| is_global || symbol.position.precedes(position))
        })
    }

    /// Resolves `name` in the innermost scope only, ignoring declaration order.
    pub fn lookup_local(&self, name: &str) -> Option<Rc<Symbol>> {
        self.scopes
            .last()
            .and_then(|scope| scope.borrow().lookup(name))
    }

    /// Declares `symbol` in the innermost scope. Returns false with no scope open.
    pub fn declare(&mut self, symbol: Rc<Symbol>) -> bool {
        match self.scopes.last() {
            Some(scope) => {
                scope.borrow_mut().declare(symbol);
                true
            }
            None => false,
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn opened(&self) -> usize {
        self.opened
    }

    pub fn closed(&self) -> usize {
        self.closed
    }
}
