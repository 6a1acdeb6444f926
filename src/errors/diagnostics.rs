//! The diagnostic sink shared by the semantic passes.
//!
//! Passes report violations through [`Diagnostics::issue`] and keep walking;
//! nothing here ever aborts the caller. Diagnostics are kept in the order they
//! were issued so the driver can surface them together after a run.

use std::slice::Iter;

use tracing::trace;

use crate::Position;

use super::errors::{Error, ErrorImpl};

#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics { errors: vec![] }
    }

    /// Records one diagnostic at `position`.
    pub fn issue(&mut self, position: Position, error: ErrorImpl) {
        trace!(offset = position.0, file = %position.1, "{}", error);
        self.errors.push(Error::new(error, position));
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Error> {
        self.errors.iter()
    }

    /// Number of diagnostics whose error name equals `name`.
    pub fn count(&self, name: &str) -> usize {
        self.errors
            .iter()
            .filter(|error| error.get_error_name() == name)
            .count()
    }

    pub fn into_vec(self) -> Vec<Error> {
        self.errors
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Error;
    type IntoIter = Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
