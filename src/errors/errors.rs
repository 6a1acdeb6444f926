use std::fmt::Display;

use thiserror::Error;

use crate::{symbols::types::Type, Position};

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::DeclConflict { .. } => "DeclConflict",
            ErrorImpl::SymbolNotFound { .. } => "SymbolNotFound",
            ErrorImpl::NotVariable { .. } => "NotVariable",
            ErrorImpl::NotMethod { .. } => "NotMethod",
            ErrorImpl::BadArgCount { .. } => "BadArgCount",
            ErrorImpl::UnexpectedType { .. } => "UnexpectedType",
            ErrorImpl::BadIndex => "BadIndex",
            ErrorImpl::BadTestExpr => "BadTestExpr",
            ErrorImpl::NotArray => "NotArray",
            ErrorImpl::ZeroLengthedArray => "ZeroLengthedArray",
            ErrorImpl::NotConstInit => "NotConstInit",
            ErrorImpl::Incompatible { .. } => "Incompatible",
            ErrorImpl::UnresolvedTree { .. } => "UnresolvedTree",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::DeclConflict { name } => {
                ErrorTip::Suggestion(format!("`{}` is already declared in this scope", name))
            }
            ErrorImpl::SymbolNotFound { name } => {
                ErrorTip::Suggestion(format!("`{}` is not declared", name))
            }
            ErrorImpl::NotVariable { name } => {
                ErrorTip::Suggestion(format!("`{}` cannot be used as this kind of variable", name))
            }
            ErrorImpl::NotMethod { name } => {
                ErrorTip::Suggestion(format!("`{}` is not a function", name))
            }
            ErrorImpl::BadArgCount {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` expects {} arguments, received {}",
                function, expected, received
            )),
            ErrorImpl::UnexpectedType { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::BadIndex => ErrorTip::Suggestion(String::from(
                "The number of indices does not match the array's dimensions",
            )),
            ErrorImpl::BadTestExpr => {
                ErrorTip::Suggestion(String::from("Test expressions must be of type `int`"))
            }
            ErrorImpl::NotArray => ErrorTip::Suggestion(String::from(
                "Arrays take `{ ... }` initializers and scalars take plain expressions",
            )),
            ErrorImpl::ZeroLengthedArray => {
                ErrorTip::Suggestion(String::from("Array dimensions must be positive"))
            }
            ErrorImpl::NotConstInit => ErrorTip::Suggestion(String::from(
                "Global initializers must be integer literals",
            )),
            ErrorImpl::Incompatible { expected, received } => ErrorTip::Suggestion(format!(
                "Cannot use `{}` where `{}` is expected",
                received, expected
            )),
            ErrorImpl::UnresolvedTree { node } => ErrorTip::Suggestion(format!(
                "{} was not resolved by the symbol pass",
                node
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("{name:?} is already declared in this scope")]
    DeclConflict { name: String },
    #[error("symbol {name:?} not found")]
    SymbolNotFound { name: String },
    #[error("{name:?} is not a variable")]
    NotVariable { name: String },
    #[error("{name:?} is not a function")]
    NotMethod { name: String },
    #[error("bad argument count for {function:?}: expected {expected}, received {received}")]
    BadArgCount {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("unexpected type: expected {expected}, received {received}")]
    UnexpectedType { expected: Type, received: Type },
    #[error("bad array index")]
    BadIndex,
    #[error("test expression must be an integer")]
    BadTestExpr,
    #[error("initializer does not match the array-ness of the declaration")]
    NotArray,
    #[error("array dimension must be positive")]
    ZeroLengthedArray,
    #[error("global initializer is not a constant")]
    NotConstInit,
    #[error("incompatible types: expected {expected}, received {received}")]
    Incompatible { expected: Type, received: Type },
    #[error("unresolved {node}")]
    UnresolvedTree { node: String },
}
