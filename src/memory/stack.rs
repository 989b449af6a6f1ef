//! Loop and call frames
//!
//! - [`LoopFrame`]: where a loop's condition, body and closing brace sit
//! - [`CallFrame`]: return position plus the caller's loop stack
//!
//! Positions are indices into the program text. A loop frame learns its body
//! and end positions lazily, the first time execution reaches them.

/// Bookkeeping for one active loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopFrame {
    /// Position of the `{` that opens the condition; the re-entry point
    pub condition: usize,
    /// Position of the `{` that opens the body, once reached
    pub body: Option<usize>,
    /// Position of the matching `}`, once reached
    pub end: Option<usize>,
}

impl LoopFrame {
    pub fn new(condition: usize) -> Self {
        LoopFrame {
            condition,
            body: None,
            end: None,
        }
    }
}

/// Saved state for one function invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFrame {
    /// Position of the `~` that made the call
    pub return_position: usize,
    /// The caller's loop stack, restored on return
    pub saved_loops: Vec<LoopFrame>,
}
