//! Flattening of arbitrarily nested sequences.
//!
//! # Examples
//!
//! ```
//! use strnorm::utils::{Nested, flatten};
//!
//! let input = vec![
//!     Nested::list([Nested::Scalar(1), Nested::Scalar(2)]),
//!     Nested::list([Nested::Scalar(3), Nested::list([Nested::Scalar(4), Nested::Scalar(5)])]),
//!     Nested::Null,
//!     Nested::Scalar(6),
//! ];
//! assert_eq!(flatten(&input, Vec::new()), vec![1, 2, 3, 4, 5, 6]);
//! ```

use serde_json::Value;

use crate::config;
use crate::{NormError, Result};

/// One element of a nested sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Nested<T> {
    Scalar(T),
    /// An absent element; skipped when flattening
    Null,
    List(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Nested<T>>,
    {
        Nested::List(items.into_iter().collect())
    }
}

impl Nested<Value> {
    /// Arrays become lists, `null` becomes [`Nested::Null`], anything else
    /// (including objects) is a scalar.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Array(items) => Nested::List(items.into_iter().map(Nested::from_json).collect()),
            Value::Null => Nested::Null,
            other => Nested::Scalar(other),
        }
    }
}

/// Appends every non-null scalar in `input` to `output`, depth first and in
/// order, and returns `output`.
///
/// `input` must be finite; there is no depth limit. See [`flatten_checked`]
/// for a bounded variant.
pub fn flatten<T: Clone>(input: &[Nested<T>], mut output: Vec<T>) -> Vec<T> {
    for element in input {
        match element {
            Nested::Scalar(value) => output.push(value.clone()),
            Nested::List(items) => output = flatten(items, output),
            Nested::Null => {}
        }
    }
    output
}

/// Like [`flatten`], but fails with `InvalidInput` when lists nest more than
/// `max_depth` levels below `input`.
pub fn flatten_checked<T: Clone>(
    input: &[Nested<T>],
    output: Vec<T>,
    max_depth: usize,
) -> Result<Vec<T>> {
    flatten_at_depth(input, output, 0, max_depth)
}

/// [`flatten_checked`] with the configured `max_flatten_depth`.
pub fn flatten_bounded<T: Clone>(input: &[Nested<T>], output: Vec<T>) -> Result<Vec<T>> {
    flatten_checked(input, output, config::get().max_flatten_depth)
}

fn flatten_at_depth<T: Clone>(
    input: &[Nested<T>],
    mut output: Vec<T>,
    depth: usize,
    max_depth: usize,
) -> Result<Vec<T>> {
    for element in input {
        match element {
            Nested::Scalar(value) => output.push(value.clone()),
            Nested::List(items) => {
                if depth >= max_depth {
                    return Err(NormError::invalid_input(format!(
                        "nesting deeper than {} levels",
                        max_depth
                    )));
                }
                output = flatten_at_depth(items, output, depth + 1, max_depth)?;
            }
            Nested::Null => {}
        }
    }
    Ok(output)
}
