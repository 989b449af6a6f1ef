//! Run configuration and default streams
//!
//! Everything that changes how a run behaves is passed in explicitly through
//! [`RunConfig`]; there is no process-wide mutable state.

use super::constants::DEFAULT_HISTORY_LIMIT;
use std::io::{self, BufRead, BufReader, Write};

/// What happens after a fatal error has been reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitMode {
    /// Terminate the whole process with a non-zero status
    TopLevel,
    /// Set the halted flag and return control to the caller
    Embedded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub exit_mode: ExitMode,
    /// Maximum number of operators to execute, `None` for unbounded
    pub step_limit: Option<usize>,
    /// Capture a snapshot after every step for the debugger
    pub record_history: bool,
    /// Memory budget for recorded snapshots, in bytes
    pub history_limit: usize,
}

impl RunConfig {
    /// Configuration for running inside a host program or a test
    pub fn embedded() -> Self {
        RunConfig {
            exit_mode: ExitMode::Embedded,
            step_limit: None,
            record_history: false,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Configuration for the command-line runner
    pub fn top_level() -> Self {
        RunConfig {
            exit_mode: ExitMode::TopLevel,
            ..RunConfig::embedded()
        }
    }

    /// Configuration for the step debugger: embedded, recording history
    pub fn debugger(history_limit: usize) -> Self {
        RunConfig {
            record_history: true,
            history_limit,
            ..RunConfig::embedded()
        }
    }

    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = Some(limit);
        self
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig::embedded()
    }
}

/// The default input, output and error streams of a run
pub struct Streams {
    pub input: Box<dyn BufRead>,
    pub output: Box<dyn Write>,
    pub error: Box<dyn Write>,
}

impl Streams {
    /// Standard input, output and error of the process
    pub fn stdio() -> Self {
        Streams {
            input: Box::new(BufReader::new(io::stdin())),
            output: Box::new(io::stdout()),
            error: Box::new(io::stderr()),
        }
    }
}
