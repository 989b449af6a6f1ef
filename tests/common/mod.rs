#![allow(dead_code)]

use qualm::interpreter::{Interpreter, RunConfig, RuntimeError, Streams};
use qualm::snapshot::MockTerminal;
use std::io::Cursor;

/// Operators executed before a test program is considered stuck
pub const TEST_STEP_LIMIT: usize = 100_000;

/// Output and error text of a run, captured together as a user would see it
pub struct Run {
    pub result: Result<(), RuntimeError>,
    pub output: String,
    pub interpreter: Interpreter,
}

pub fn run(source: &str) -> Run {
    run_with_input(source, "")
}

pub fn run_with_input(source: &str, input: &str) -> Run {
    run_with_config(source, input, RunConfig::embedded().with_step_limit(TEST_STEP_LIMIT))
}

pub fn run_with_config(source: &str, input: &str, config: RunConfig) -> Run {
    let terminal = MockTerminal::new();
    let streams = Streams {
        input: Box::new(Cursor::new(input.as_bytes().to_vec())),
        output: Box::new(terminal.clone()),
        error: Box::new(terminal.clone()),
    };
    let mut interpreter = Interpreter::with_streams(source, streams, config);
    let result = interpreter.run();
    Run {
        result,
        output: terminal.contents(),
        interpreter,
    }
}

/// Output of a program that must finish without errors
pub fn output_of(source: &str) -> String {
    let run = run(source);
    assert!(run.result.is_ok(), "Execution failed: {:?}", run.result);
    run.output
}
