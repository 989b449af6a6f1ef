//! State model for the interpreter
//!
//! This module provides the data the interpreter mutates while it runs:
//! - [`value`]: runtime value representation (Number, Text, List, Resource)
//! - [`slots`]: the sparse slot register file, defaulting to zero
//! - [`stack`]: loop frames and call frames
//!
//! The working register itself is a single [`value::Value`] owned by the
//! interpreter.

pub mod slots;
pub mod stack;
pub mod value;
