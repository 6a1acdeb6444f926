//! Semantic types.
//!
//! The language has one scalar type, `int`. Arrays have a fixed shape and
//! functions are typed by their parameter list and result. `Error` is the
//! absorbing type given to anything that has already been diagnosed.

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Int,
    Error,
    Array(ArrayType),
    Function(FunctionType),
}

/// An array of `element` with one extent per dimension.
///
/// A leading extent of 0 marks an unsized parameter dimension (`int a[][3]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayType {
    pub element: Box<Type>,
    pub dims: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionType {
    pub params: Vec<Type>,
    pub result: Box<Type>,
}

impl Type {
    pub fn array(element: Type, dims: Vec<i64>) -> Type {
        Type::Array(ArrayType {
            element: Box::new(element),
            dims,
        })
    }

    pub fn function(params: Vec<Type>, result: Type) -> Type {
        Type::Function(FunctionType {
            params,
            result: Box::new(result),
        })
    }

    /// Structural equality.
    ///
    /// Unlike `==`, an unsized leading array dimension matches any extent.
    pub fn equal(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Int, Type::Int) | (Type::Error, Type::Error) => true,
            (Type::Array(left), Type::Array(right)) => left.equal(right),
            (Type::Function(left), Type::Function(right)) => {
                left.params.len() == right.params.len()
                    && left
                        .params
                        .iter()
                        .zip(right.params.iter())
                        .all(|(l, r)| l.equal(r))
                    && left.result.equal(&right.result)
            }
            _ => false,
        }
    }

    /// Whether a value of this type may be assigned, passed or returned where
    /// `target` is expected. `Error` is compatible with everything.
    pub fn compatible(&self, target: &Type) -> bool {
        self.is_error() || target.is_error() || self.equal(target)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array(_))
    }

    pub fn as_array(&self) -> Option<&ArrayType> {
        match self {
            Type::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionType> {
        match self {
            Type::Function(function) => Some(function),
            _ => None,
        }
    }
}

impl ArrayType {
    pub fn dim_count(&self) -> usize {
        self.dims.len()
    }

    pub fn element_type(&self) -> &Type {
        &self.element
    }

    fn equal(&self, other: &ArrayType) -> bool {
        self.element.equal(&other.element)
            && self.dims.len() == other.dims.len()
            && self
                .dims
                .iter()
                .zip(other.dims.iter())
                .enumerate()
                .all(|(index, (l, r))| l == r || (index == 0 && (*l == 0 || *r == 0)))
    }
}

impl FunctionType {
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn result_type(&self) -> &Type {
        &self.result
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Error => write!(f, "error"),
            Type::Array(array) => {
                write!(f, "{}", array.element)?;
                for dim in array.dims.iter() {
                    if *dim == 0 {
                        write!(f, "[]")?;
                    } else {
                        write!(f, "[{}]", dim)?;
                    }
                }
                Ok(())
            }
            Type::Function(function) => {
                let params = function
                    .params
                    .iter()
                    .map(|param| param.to_string())
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "{}({})", function.result, params)
            }
        }
    }
}
