//! Function definition, call and return (`(`, `~`, `)`).
//!
//! A function is identified by the position of its opening `(`. Defining one
//! records that position, skips the body, and leaves the position in the
//! register so it can be stored in a slot and called later with `~`.
//!
//! A call saves the caller's loop stack in its [`CallFrame`] and starts the
//! callee with an empty one, so loops never leak across a call boundary.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::stack::CallFrame;
use crate::memory::value::Value;

impl Interpreter {
    pub(crate) fn op_function_open(&mut self) -> Result<(), RuntimeError> {
        let entry = self.cursor.position();
        self.functions.insert(entry);
        self.cursor.skip_function_body()?;
        self.register = Value::int(entry as i64);
        Ok(())
    }

    pub(crate) fn op_call(&mut self) -> Result<(), RuntimeError> {
        let entry = self
            .register
            .as_number()
            .and_then(|n| n.truncate())
            .and_then(|n| usize::try_from(n).ok())
            .filter(|entry| self.functions.contains(entry))
            .ok_or(RuntimeError::InvalidFunction)?;

        self.calls.push(CallFrame {
            return_position: self.cursor.position(),
            saved_loops: std::mem::take(&mut self.loops),
        });
        self.cursor.jump_to(entry);
        Ok(())
    }

    pub(crate) fn op_function_close(&mut self) -> Result<(), RuntimeError> {
        let position = self.cursor.position();
        let frame = self
            .calls
            .pop()
            .ok_or(RuntimeError::UnopenedFunction { position })?;
        self.loops = frame.saved_loops;
        self.cursor.jump_to(frame.return_position);
        Ok(())
    }
}
