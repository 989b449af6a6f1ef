mod common;
use common::*;
use qualm::interpreter::{RunConfig, RuntimeError};

/// Run a program that must fail; returns the error and everything printed
fn failure(source: &str) -> (RuntimeError, String) {
    let run = run(source);
    let error = run.result.expect_err("program should have failed");
    assert!(run.interpreter.is_halted());
    (error, run.output)
}

#[test]
fn test_unexpected_character() {
    let (error, output) = failure("v1!#v2!");
    assert_eq!(
        error,
        RuntimeError::UnexpectedCharacter {
            found: '#',
            position: 3
        }
    );
    // output before the error is kept, nothing after it runs
    assert_eq!(output, "1.0Got unexpected `#` at 3.\n");
}

#[test]
fn test_error_reported_once() {
    let run = run("v'a:-1");
    assert_eq!(run.output.matches('\n').count(), 1);
    assert_eq!(run.output, "Unsupported operand types for -: text and number.\n");
}

#[test]
fn test_number_errors() {
    assert_eq!(failure("vx").1, "Got `x`, expected numeric.\n");
    assert_eq!(failure("v1.2.3").1, "Cannot have multiple decimal points.\n");
}

#[test]
fn test_slot_errors() {
    assert_eq!(failure(">x").1, "Expected slot (number 0-9), got `x`.\n");
    assert_eq!(failure("v'ab:>w").1, "Expected slot (number 0-9), got `ab`.\n");
}

#[test]
fn test_condition_errors() {
    assert_eq!(failure("{1<2{}").1, "Expected `=`, got <\n");
    assert_eq!(
        failure("{1?2{}").1,
        "Expected comparison operator, got `?`.\n"
    );
}

#[test]
fn test_control_flow_errors() {
    assert_eq!(failure("v1}").1, "Not in a loop.\n");
    assert_eq!(
        failure("v1)").1,
        "Cannot close unopened function at position: 2\n"
    );
    assert_eq!(failure("v5~").1, "Invalid function\n");
    assert_eq!(failure("(v1").0, RuntimeError::Eof);
}

#[test]
fn test_lookup_errors() {
    assert_eq!(failure("v'abc:@'z:").1, "substring not found\n");
    assert_eq!(failure("v'a b:| @'z:").1, "'z' is not in list\n");
    assert_eq!(failure("v'abc:$3").1, "string index out of range\n");
    assert_eq!(failure("v'a b:| $2").1, "list index out of range\n");
    assert_eq!(
        failure("v'abc:@!").1,
        "Invalid item to get index of at position 6.\n"
    );
}

#[test]
fn test_bad_delimiter_escape() {
    assert_eq!(
        failure("v'a:|\\q").1,
        "Bad escape character for delimiter\n"
    );
}

#[test]
fn test_division_by_zero() {
    assert_eq!(failure("v1/0").1, "Division by zero.\n");
    assert_eq!(failure("v1%0").1, "Division by zero.\n");
}

#[test]
fn test_resource_errors() {
    assert_eq!(failure("v1!&0").1, "Cannot write to non-file handle.\n");
    assert_eq!(failure(".&<4").1, "Cannot read from non-file handle.\n");
    assert_eq!(
        failure("v'/nonexistent/qualm/input.txt:&").1,
        "File `/nonexistent/qualm/input.txt` does not exist.\n"
    );
}

#[test]
fn test_step_limit() {
    let config = RunConfig::embedded().with_step_limit(50);
    let run = run_with_config("{1=1{}", "", config);
    assert_eq!(run.result, Err(RuntimeError::StepLimitExceeded { limit: 50 }));
    assert_eq!(run.output, "Step limit of 50 exceeded.\n");
    assert_eq!(run.interpreter.steps(), 50);
}

#[test]
fn test_halted_interpreter_stays_halted() {
    let mut run = run("v1}");
    assert!(run.interpreter.run().is_err());
    // the error was only reported by the first run
    assert_eq!(run.output, "Not in a loop.\n");
}
