//! Loop execution (`{cond{body}`).
//!
//! Adds `impl Interpreter` methods for the two loop characters. A loop is
//! written `{` condition `{` body `}`, and both braces that open it dispatch
//! to [`Interpreter::op_loop_open`]. The frame on top of the loop stack tells
//! the two apart:
//!
//! - the first `{` reached after a condition evaluated true is the body
//!   marker; it records the body position and does nothing else
//! - any other `{` is a condition: it pushes a frame unless it is the
//!   condition of the frame already on top (a re-entry from `}`), then
//!   evaluates the condition
//!
//! `}` records the end position and lands the cursor back on the condition.
//! A failing condition pops the frame and leaves the loop, jumping straight
//! to the recorded end when the body has run before and scanning forward
//! when it has not.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::stack::LoopFrame;

impl Interpreter {
    pub(crate) fn op_loop_open(&mut self) -> Result<(), RuntimeError> {
        let position = self.cursor.position();

        if let Some(frame) = self.loops.last_mut() {
            if frame.body.is_none() || frame.body == Some(position) {
                frame.body = Some(position);
                return Ok(());
            }
        }

        let reentry = self
            .loops
            .last()
            .is_some_and(|frame| frame.condition == position);
        if !reentry {
            self.loops.push(LoopFrame::new(position));
        }

        if self.evaluate_condition()? {
            return Ok(());
        }

        let Some(frame) = self.loops.pop() else {
            return Err(RuntimeError::NotInLoop);
        };
        match (frame.body, frame.end) {
            (Some(_), Some(end)) => self.cursor.jump_to(end),
            _ => self.cursor.skip_loop_body()?,
        }
        Ok(())
    }

    pub(crate) fn op_loop_close(&mut self) -> Result<(), RuntimeError> {
        let position = self.cursor.position();
        let frame = self.loops.last_mut().ok_or(RuntimeError::NotInLoop)?;
        frame.end = Some(position);
        let condition = frame.condition;
        self.cursor.land_on(condition);
        Ok(())
    }
}
