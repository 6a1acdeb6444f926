//! Semantic analysis module.
//!
//! Two passes run over the parsed tree:
//!
//! - `symbol_pass` creates every scope and symbol and attaches them to the
//!   tree, reporting redeclarations
//! - `type_checker` resolves every name, computes and attaches the type of
//!   every expression and reports type errors
//!
//! Neither pass stops at a violation; both report to a shared
//! [`Diagnostics`](crate::errors::diagnostics::Diagnostics) sink and keep
//! walking.

pub mod symbol_pass;
pub mod type_checker;

#[cfg(test)]
mod tests;
