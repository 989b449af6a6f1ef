//! qualm interpreter execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: the interpreter, its run loop and operator table
//! - [`errors`]: runtime error types
//! - [`config`]: run configuration and I/O streams
//! - [`loops`], [`jumps`], [`conditions`]: control flow
//! - [`builtins`], [`ops`]: the remaining operators
//!
//! # Execution Model
//!
//! There is no separate parse phase. The interpreter dispatches on the
//! character under the cursor, and each operator reads its own operands
//! directly from the source that follows it. When history recording is on, a
//! snapshot is taken after every operator to enable time-travel debugging.

pub mod builtins;
pub mod conditions;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod jumps;
pub mod loops;
pub mod ops;

pub use config::{ExitMode, RunConfig, Streams};
pub use engine::{Interpreter, StepOutcome};
pub use errors::RuntimeError;
