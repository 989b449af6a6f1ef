// Snapshot management for reverse execution

use crate::memory::{
    slots::SlotFile,
    stack::{CallFrame, LoopFrame},
    value::Value,
};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;

/// Mock terminal for capturing program output
///
/// Clones share one buffer, so a clone handed to the interpreter as an output
/// sink can be read back by whoever kept the original.
#[derive(Debug, Clone, Default)]
pub struct MockTerminal {
    buffer: Rc<RefCell<String>>,
}

impl MockTerminal {
    pub fn new() -> Self {
        MockTerminal::default()
    }

    /// Everything written so far
    pub fn contents(&self) -> String {
        self.buffer.borrow().clone()
    }

    /// Length in bytes of everything written so far
    pub fn len(&self) -> usize {
        self.buffer.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.borrow().is_empty()
    }

    /// Lines of the first `upto` bytes of output
    pub fn get_output(&self, upto: usize) -> Vec<String> {
        let buffer = self.buffer.borrow();
        let mut end = upto.min(buffer.len());
        while !buffer.is_char_boundary(end) {
            end -= 1;
        }

        let mut result: Vec<String> = buffer[..end].split('\n').map(|s| s.to_string()).collect();
        // Remove trailing empty string if text ended with newline
        if result.last().is_some_and(|s| s.is_empty()) {
            result.pop();
        }
        result
    }
}

impl io::Write for MockTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .borrow_mut()
            .push_str(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Output sink that captures into a [`MockTerminal`] and forwards every write
/// to a live stream as well
///
/// The debugger records output for replay while the program still runs in
/// the user's terminal, so prompts are visible before `.` blocks on input.
pub struct TeeTerminal<W: io::Write> {
    terminal: MockTerminal,
    echo: W,
}

impl<W: io::Write> TeeTerminal<W> {
    pub fn new(terminal: MockTerminal, echo: W) -> Self {
        TeeTerminal { terminal, echo }
    }
}

impl<W: io::Write> io::Write for TeeTerminal<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.echo.write_all(buf)?;
        io::Write::write(&mut self.terminal, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.echo.flush()
    }
}

/// Snapshot of execution state
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Number of operators executed when the snapshot was taken
    pub step: usize,
    pub position: usize,
    pub register: Value,
    pub slots: SlotFile,
    pub loops: Vec<LoopFrame>,
    pub calls: Vec<CallFrame>,
    /// Bytes of default output written so far
    pub output_len: usize,
}

impl Snapshot {
    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // This is a rough estimate
        // Slots: assume 64 bytes per written slot plus any text they hold
        let slot_size: usize = self
            .slots
            .sorted()
            .iter()
            .map(|(_, value)| 64 + value_size(value))
            .sum();

        let loop_size = self.loops.len() * std::mem::size_of::<LoopFrame>();
        let call_size: usize = self
            .calls
            .iter()
            .map(|frame| 16 + frame.saved_loops.len() * std::mem::size_of::<LoopFrame>())
            .sum();

        64 + value_size(&self.register) + slot_size + loop_size + call_size
    }
}

fn value_size(value: &Value) -> usize {
    match value {
        Value::Text(s) => s.len(),
        Value::List(items) => items.iter().map(|item| 24 + value_size(item)).sum(),
        Value::Number(_) | Value::Resource(_) => 16,
    }
}

/// Manages execution history for reverse execution
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), String> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(format!(
                "Snapshot memory limit exceeded: {} + {} > {}",
                self.current_memory, snapshot_size, self.max_memory
            ));
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}
