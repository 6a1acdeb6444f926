//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the front end and
//! the semantic passes. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing and semantic analysis
//! - The diagnostic sink the semantic passes report into
//! - Helpful error messages and suggestions

pub mod diagnostics;
pub mod errors;
