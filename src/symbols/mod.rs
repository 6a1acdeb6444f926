//! Types, symbols and scopes.
//!
//! These are the collaborators the semantic passes are written against:
//!
//! - `types` - the semantic type representation with its equality and
//!   compatibility predicates
//! - `symbol` - declared variables and functions
//! - `scope` - lexical scopes and the scope stack with innermost-first lookup

pub mod scope;
pub mod symbol;
pub mod types;

#[cfg(test)]
mod tests;
