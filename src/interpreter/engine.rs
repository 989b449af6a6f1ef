// Execution engine for the qualm interpreter

use crate::interpreter::config::{ExitMode, RunConfig, Streams};
use crate::interpreter::constants::{EXIT_FAILURE, STRING_OPEN, WHITESPACE};
use crate::interpreter::errors::RuntimeError;
use crate::memory::{
    slots::{SlotFile, SlotId},
    stack::{CallFrame, LoopFrame},
    value::Value,
};
use crate::parser::{Cursor, NumberToken, SlotToken};
use crate::snapshot::{Snapshot, SnapshotManager};
use rustc_hash::{FxHashMap, FxHashSet};
use std::io::Write;

/// Handler bound to a single operator character
pub type Operator = fn(&mut Interpreter) -> Result<(), RuntimeError>;

/// What a single call to [`Interpreter::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// An operator ran (or whitespace was skipped)
    Continued,
    /// The cursor is past the end of the program
    Finished,
}

/// The qualm interpreter
///
/// There is no separate parse phase: the [`Cursor`] is both the instruction
/// pointer and the position operands are read from.
pub struct Interpreter {
    pub(crate) cursor: Cursor,

    /// The working register `w`
    pub(crate) register: Value,

    pub(crate) slots: SlotFile,

    /// Active loop frames, innermost last
    pub(crate) loops: Vec<LoopFrame>,

    /// Pending function returns, innermost last
    pub(crate) calls: Vec<CallFrame>,

    /// Entry positions of every function definition seen so far
    pub(crate) functions: FxHashSet<usize>,

    operators: FxHashMap<char, Operator>,

    pub(crate) streams: Streams,

    config: RunConfig,

    /// Set once a fatal error has been reported
    halted: bool,

    last_error: Option<RuntimeError>,

    /// Number of operators executed
    steps: usize,

    /// Bytes written to the default output sink
    output_len: usize,

    /// Snapshot manager for reverse execution
    snapshot_manager: SnapshotManager,

    /// Index of the snapshot currently shown when stepping through history
    history_position: usize,
}

impl Interpreter {
    /// Create an interpreter over the process's standard streams
    pub fn new(source: &str, config: RunConfig) -> Self {
        Interpreter::with_streams(source, Streams::stdio(), config)
    }

    /// Create an interpreter over explicit streams
    pub fn with_streams(source: &str, streams: Streams, config: RunConfig) -> Self {
        Interpreter {
            cursor: Cursor::new(source),
            register: Value::default(),
            slots: SlotFile::new(),
            loops: Vec::new(),
            calls: Vec::new(),
            functions: FxHashSet::default(),
            operators: operator_table(),
            streams,
            snapshot_manager: SnapshotManager::new(config.history_limit),
            config,
            halted: false,
            last_error: None,
            steps: 0,
            output_len: 0,
            history_position: 0,
        }
    }

    /// Run the program from the current position to the end.
    ///
    /// A fatal error is written to the error sink and halts the interpreter.
    /// In [`ExitMode::TopLevel`] the process then exits; otherwise the error is
    /// returned.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        if let Some(error) = self.halted.then(|| self.last_error.clone()).flatten() {
            return Err(error);
        }

        if self.config.record_history && self.snapshot_manager.is_empty() {
            if let Err(e) = self.take_snapshot() {
                return self.halt(e);
            }
        }

        loop {
            match self.step() {
                Ok(StepOutcome::Continued) => {}
                Ok(StepOutcome::Finished) => break,
                Err(e) => return self.halt(e),
            }
        }

        if let Err(e) = self.streams.output.flush() {
            return self.halt(e.into());
        }
        Ok(())
    }

    /// Execute the operator under the cursor and move onto the next one.
    ///
    /// Errors are returned without being reported; [`run`](Self::run) is the
    /// one place that reports and halts.
    pub fn step(&mut self) -> Result<StepOutcome, RuntimeError> {
        let Some(ch) = self.cursor.current() else {
            return Ok(StepOutcome::Finished);
        };

        if WHITESPACE.contains(&ch) {
            self.cursor.advance();
            return Ok(StepOutcome::Continued);
        }

        if let Some(limit) = self.config.step_limit {
            if self.steps >= limit {
                return Err(RuntimeError::StepLimitExceeded { limit });
            }
        }

        let operator = self
            .operators
            .get(&ch)
            .copied()
            .ok_or(RuntimeError::UnexpectedCharacter {
                found: ch,
                position: self.cursor.position(),
            })?;
        operator(self)?;

        self.cursor.advance();
        self.steps += 1;

        if self.config.record_history {
            self.take_snapshot()?;
        }
        Ok(StepOutcome::Continued)
    }

    /// Report a fatal error once and stop.
    fn halt(&mut self, error: RuntimeError) -> Result<(), RuntimeError> {
        // The error line is the report; failures to write it have nowhere to go.
        let _ = self.streams.output.flush();
        let _ = writeln!(self.streams.error, "{}", error);
        let _ = self.streams.error.flush();

        self.halted = true;
        self.last_error = Some(error.clone());

        if self.config.exit_mode == ExitMode::TopLevel {
            std::process::exit(EXIT_FAILURE);
        }
        Err(error)
    }

    /// Handler bound to `ch`, if any
    pub(crate) fn operator(&self, ch: char) -> Option<Operator> {
        self.operators.get(&ch).copied()
    }

    // ========== Operand helpers shared by the operators ==========

    /// Read a number operand, resolving `w` to the register.
    pub(crate) fn number_operand(&mut self) -> Result<Value, RuntimeError> {
        Ok(match self.cursor.number()? {
            NumberToken::Literal(x) => Value::float(x),
            NumberToken::Register => self.register.clone(),
        })
    }

    /// Read a string literal operand, opening quote included.
    pub(crate) fn string_operand(&mut self) -> Result<Value, RuntimeError> {
        let quote = self.cursor.eat()?;
        debug_assert_eq!(quote, STRING_OPEN);
        Ok(Value::Text(self.cursor.string()?))
    }

    /// Read a slot operand.
    ///
    /// `w` stands for the register's rendered text, which must be all digits
    /// and is extended by any digits that follow it in the source.
    pub(crate) fn slot_operand(&mut self) -> Result<SlotId, RuntimeError> {
        let key = match self.cursor.slot()? {
            SlotToken::Digits(digits) => digits,
            SlotToken::Register => {
                let prefix = self.register.to_string();
                if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_digit()) {
                    return Err(RuntimeError::InvalidSlot { found: prefix });
                }
                prefix + &self.cursor.digits()
            }
        };
        key.parse::<SlotId>()
            .map_err(|_| RuntimeError::InvalidSlot { found: key })
    }

    /// Read a slot reference introduced by `<`, returning the slot's value.
    pub(crate) fn slot_reference(&mut self) -> Result<Value, RuntimeError> {
        self.cursor.eat()?;
        let slot = self.slot_operand()?;
        Ok(self.slots.get(slot))
    }

    /// Write to the default output sink.
    pub(crate) fn write_output(&mut self, text: &str) -> Result<(), RuntimeError> {
        self.streams.output.write_all(text.as_bytes())?;
        self.output_len += text.len();
        Ok(())
    }

    // ========== History ==========

    /// Take a snapshot of the current execution state
    fn take_snapshot(&mut self) -> Result<(), RuntimeError> {
        let snapshot = Snapshot {
            step: self.steps,
            position: self.cursor.position(),
            register: self.register.clone(),
            slots: self.slots.clone(),
            loops: self.loops.clone(),
            calls: self.calls.clone(),
            output_len: self.output_len,
        };

        self.snapshot_manager
            .push(snapshot)
            .map_err(|_| RuntimeError::SnapshotLimitExceeded {
                current: self.snapshot_manager.memory_usage(),
                limit: self.snapshot_manager.memory_limit(),
            })?;

        self.history_position = self.snapshot_manager.len() - 1;
        Ok(())
    }

    /// Restore execution state from a snapshot
    fn restore_snapshot(&mut self, index: usize) -> Result<(), RuntimeError> {
        let snapshot = self.snapshot_manager.get(index).cloned().ok_or_else(|| {
            RuntimeError::HistoryOperationFailed {
                message: format!("Snapshot {} not found in history", index),
            }
        })?;

        self.cursor.restore(snapshot.position);
        self.register = snapshot.register;
        self.slots = snapshot.slots;
        self.loops = snapshot.loops;
        self.calls = snapshot.calls;
        self.steps = snapshot.step;
        self.output_len = snapshot.output_len;
        self.history_position = index;
        Ok(())
    }

    /// Step backward in execution (restore previous snapshot)
    pub fn step_backward(&mut self) -> Result<(), RuntimeError> {
        if self.history_position == 0 {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "Already at the beginning of execution".to_string(),
            });
        }
        self.restore_snapshot(self.history_position - 1)
    }

    /// Step forward in execution (restore next snapshot)
    pub fn step_forward(&mut self) -> Result<(), RuntimeError> {
        if self.history_position + 1 >= self.snapshot_manager.len() {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "No more snapshots available (execution finished)".to_string(),
            });
        }
        self.restore_snapshot(self.history_position + 1)
    }

    /// Rewind to the beginning of execution history
    pub fn rewind_to_start(&mut self) -> Result<(), RuntimeError> {
        if self.snapshot_manager.is_empty() {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "No snapshots available".to_string(),
            });
        }
        self.restore_snapshot(0)
    }

    /// Jump to the last recorded snapshot
    pub fn fast_forward_to_end(&mut self) -> Result<(), RuntimeError> {
        match self.snapshot_manager.len() {
            0 => Err(RuntimeError::HistoryOperationFailed {
                message: "No snapshots available".to_string(),
            }),
            len => self.restore_snapshot(len - 1),
        }
    }

    // ========== Getter methods for UI and tests ==========

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn source(&self) -> &[char] {
        self.cursor.source()
    }

    pub fn register(&self) -> &Value {
        &self.register
    }

    pub fn slots(&self) -> &SlotFile {
        &self.slots
    }

    pub fn loops(&self) -> &[LoopFrame] {
        &self.loops
    }

    pub fn calls(&self) -> &[CallFrame] {
        &self.calls
    }

    /// Entry positions of known functions, in source order
    pub fn functions(&self) -> Vec<usize> {
        let mut entries: Vec<usize> = self.functions.iter().copied().collect();
        entries.sort_unstable();
        entries
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Bytes written to the default output sink at the current point in history
    pub fn output_len(&self) -> usize {
        self.output_len
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// The error that halted the interpreter, if any
    pub fn last_error(&self) -> Option<&RuntimeError> {
        self.last_error.as_ref()
    }

    pub fn history_position(&self) -> usize {
        self.history_position
    }

    pub fn total_snapshots(&self) -> usize {
        self.snapshot_manager.len()
    }

    pub fn snapshot(&self, index: usize) -> Option<&Snapshot> {
        self.snapshot_manager.get(index)
    }

    pub fn history_memory_usage(&self) -> usize {
        self.snapshot_manager.memory_usage()
    }
}

/// Map every operator character to its handler
fn operator_table() -> FxHashMap<char, Operator> {
    let mut table: FxHashMap<char, Operator> = FxHashMap::default();

    // I/O and resources
    table.insert('!', Interpreter::op_output);
    table.insert('.', Interpreter::op_input);
    table.insert('&', Interpreter::op_open);

    // Register and slots
    table.insert('w', Interpreter::op_register);
    table.insert('s', Interpreter::op_swap);
    table.insert('>', Interpreter::op_store);
    table.insert('<', Interpreter::op_load_slot);
    table.insert('v', Interpreter::op_load_literal);

    // Arithmetic
    table.insert('+', Interpreter::op_add);
    table.insert('-', Interpreter::op_subtract);
    table.insert('*', Interpreter::op_multiply);
    table.insert('/', Interpreter::op_divide);
    table.insert('%', Interpreter::op_modulo);

    // Conversions
    table.insert('i', Interpreter::op_to_integer);
    table.insert('f', Interpreter::op_to_float);
    table.insert('c', Interpreter::op_to_character);
    table.insert('o', Interpreter::op_to_ordinal);

    // Text and lists
    table.insert('|', Interpreter::op_split);
    table.insert('@', Interpreter::op_index_of);
    table.insert('$', Interpreter::op_index_at);

    // Control flow
    table.insert('{', Interpreter::op_loop_open);
    table.insert('}', Interpreter::op_loop_close);
    table.insert('(', Interpreter::op_function_open);
    table.insert(')', Interpreter::op_function_close);
    table.insert('~', Interpreter::op_call);

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::MockTerminal;
    use std::io::Cursor as InputCursor;

    fn interpreter(source: &str, config: RunConfig) -> (Interpreter, MockTerminal) {
        let terminal = MockTerminal::new();
        let streams = Streams {
            input: Box::new(InputCursor::new(Vec::new())),
            output: Box::new(terminal.clone()),
            error: Box::new(terminal.clone()),
        };
        (
            Interpreter::with_streams(source, streams, config),
            terminal,
        )
    }

    #[test]
    fn test_step_skips_whitespace_without_counting() {
        let (mut interp, _) = interpreter(" \n\tv1", RunConfig::embedded());
        interp.run().unwrap();
        assert_eq!(interp.steps(), 1);
        assert_eq!(interp.register(), &Value::float(1.0));
    }

    #[test]
    fn test_slot_operand_from_register() {
        let (mut interp, _) = interpreter("v1i>w2", RunConfig::embedded());
        interp.run().unwrap();
        assert_eq!(interp.slots().get(12), Value::int(1));
    }

    #[test]
    fn test_slot_operand_rejects_float_register() {
        let (mut interp, terminal) = interpreter("v1>w", RunConfig::embedded());
        assert_eq!(
            interp.run(),
            Err(RuntimeError::InvalidSlot {
                found: "1.0".to_string()
            })
        );
        assert_eq!(terminal.contents(), "Expected slot (number 0-9), got `1.0`.\n");
    }

    #[test]
    fn test_halted_interpreter_does_not_resume() {
        let (mut interp, terminal) = interpreter("#v1", RunConfig::embedded());
        assert!(interp.run().is_err());
        assert!(interp.is_halted());
        assert!(interp.run().is_err());
        assert_eq!(terminal.contents(), "Got unexpected `#` at 0.\n");
        assert_eq!(interp.register(), &Value::default());
    }

    /// Accepts writes but refuses to flush, like a closed pipe
    struct UnflushableSink;

    impl Write for UnflushableSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe"))
        }
    }

    #[test]
    fn test_failed_final_flush_is_reported_and_halts() {
        let errors = MockTerminal::new();
        let streams = Streams {
            input: Box::new(InputCursor::new(Vec::new())),
            output: Box::new(UnflushableSink),
            error: Box::new(errors.clone()),
        };
        let mut interp = Interpreter::with_streams("v1!", streams, RunConfig::embedded());

        let expected = RuntimeError::Io {
            message: "pipe".to_string(),
        };
        assert_eq!(interp.run(), Err(expected.clone()));
        assert!(interp.is_halted());
        assert_eq!(interp.last_error(), Some(&expected));
        assert_eq!(errors.contents(), "I/O error: pipe\n");

        // reported once only
        assert_eq!(interp.run(), Err(expected));
        assert_eq!(errors.contents(), "I/O error: pipe\n");
    }

    #[test]
    fn test_history_restores_state() {
        let (mut interp, _) = interpreter("v1>0v2", RunConfig::debugger(1024 * 1024));
        interp.run().unwrap();
        // initial state plus one snapshot per operator
        assert_eq!(interp.total_snapshots(), 4);

        interp.rewind_to_start().unwrap();
        assert_eq!(interp.register(), &Value::default());
        assert!(interp.step_backward().is_err());

        interp.step_forward().unwrap();
        interp.step_forward().unwrap();
        assert_eq!(interp.register(), &Value::float(1.0));
        assert_eq!(interp.slots().get(0), Value::float(1.0));

        interp.fast_forward_to_end().unwrap();
        assert_eq!(interp.register(), &Value::float(2.0));
        assert!(interp.step_forward().is_err());
    }
}
