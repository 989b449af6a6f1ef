//! # Introduction
//!
//! qualm is a tiny esoteric language where every character is an operator.
//! This crate interprets it directly from source, and can record a snapshot
//! of the full interpreter state after every operator so the run can be
//! navigated forward and backward through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Cursor → Interpreter → (Snapshots → TUI)
//! ```
//!
//! 1. [`parser`]: the program cursor and the literal parsers operators use
//!    to read their operands.
//! 2. [`interpreter`]: dispatches on the character under the cursor through
//!    an operator table, runs loops and function calls, and reports errors.
//! 3. [`memory`]: dynamically typed [`memory::value::Value`]s, the sparse
//!    [`memory::slots::SlotFile`], and loop and call frames.
//! 4. [`resource`]: files and TCP listeners programs can read and write.
//! 5. [`snapshot`]: snapshot history with a configurable memory limit and a
//!    [`snapshot::MockTerminal`] that captures output.
//! 6. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use qualm::interpreter::{Interpreter, RunConfig, Streams};
//! use qualm::snapshot::MockTerminal;
//!
//! let terminal = MockTerminal::new();
//! let streams = Streams {
//!     input: Box::new(std::io::empty()),
//!     output: Box::new(terminal.clone()),
//!     error: Box::new(terminal.clone()),
//! };
//! let mut interpreter = Interpreter::with_streams("v'hi:!", streams, RunConfig::embedded());
//! interpreter.run().unwrap();
//! assert_eq!(terminal.contents(), "hi");
//! ```

pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod resource;
pub mod snapshot;
pub mod ui;
