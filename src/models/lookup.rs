use crate::error::{Error, Result};

/// Outcome of an id lookup. Absence is a normal result, not an error.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Lookup<U> {
        match self {
            Lookup::Found(value) => Lookup::Found(f(value)),
            Lookup::NotFound => Lookup::NotFound,
        }
    }

    /// Converts absence into `Error::NotFound` for layers that report it over HTTP.
    pub fn found_or(self, message: impl Into<String>) -> Result<T> {
        match self {
            Lookup::Found(value) => Ok(value),
            Lookup::NotFound => Err(Error::NotFound(message.into())),
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::NotFound,
        }
    }
}
