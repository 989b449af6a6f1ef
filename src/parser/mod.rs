//! Fused cursor and literal parser
//!
//! There is no tokenizer and no AST: the program text is executed in place.
//! This module holds the pieces that read it:
//! - [`cursor`]: the single position that is both instruction pointer and
//!   parse position, plus the forward scans used to skip loop and function bodies
//! - [`literals`]: number, string, slot and delimiter operands
//!
//! # Literal Syntax
//!
//! ```text
//! number    := 'w' | '-'? digits ('.' digits)? | '-'? '.' digits
//! string    := '\'' (char | '\\' escape)* ':'
//! slot      := ('w' | digit) digit*
//! delimiter := char | '\\' ('n' | 'r' | 't' | '\\')
//! ```

pub mod cursor;
pub mod literals;

pub use cursor::Cursor;
pub use literals::{NumberToken, SlotToken};
