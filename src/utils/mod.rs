// Utility functions and helpers
//
// This module provides helpers that are independent of text encoding,
// currently the nested sequence flattener.

pub mod flatten;

pub use flatten::{Nested, flatten, flatten_bounded, flatten_checked};
