// Time-travel history recorded for the step debugger

mod common;
use common::*;
use qualm::interpreter::{RunConfig, RuntimeError};
use qualm::memory::value::Value;

fn recorded(source: &str) -> Run {
    run_with_config(source, "", RunConfig::debugger(16 * 1024 * 1024))
}

#[test]
fn test_snapshot_per_operator() {
    let run = recorded("v1 >0\nv2");
    assert!(run.result.is_ok());
    // whitespace is skipped without a snapshot of its own
    assert_eq!(run.interpreter.total_snapshots(), 4);
    assert_eq!(run.interpreter.history_position(), 3);
}

#[test]
fn test_step_backward_restores_output_length() {
    let mut run = recorded("v'ab:!v'cd:!");
    assert_eq!(run.output, "abcd");
    let interp = &mut run.interpreter;

    interp.rewind_to_start().unwrap();
    assert_eq!(interp.output_len(), 0);
    assert_eq!(interp.position(), 0);

    interp.step_forward().unwrap();
    interp.step_forward().unwrap();
    assert_eq!(interp.output_len(), 2);
    assert_eq!(interp.register(), &Value::text("ab"));

    interp.step_backward().unwrap();
    assert_eq!(interp.output_len(), 0);
}

#[test]
fn test_history_tracks_loop_frames() {
    let mut run = recorded("v0i>0{<0<=0{<0+1i>0}");
    assert!(run.result.is_ok());
    let interp = &mut run.interpreter;

    // snapshots: start, v, i, >, { (cond), { (body), <, +, i, >, }, { (cond fails)
    assert_eq!(interp.total_snapshots(), 12);
    interp.rewind_to_start().unwrap();
    for _ in 0..5 {
        interp.step_forward().unwrap();
    }
    assert_eq!(interp.loops().len(), 1);
    assert_eq!(interp.loops()[0].condition, 5);
    assert_eq!(interp.loops()[0].body, Some(11));

    interp.fast_forward_to_end().unwrap();
    assert!(interp.loops().is_empty());
    assert_eq!(interp.slots().get(0), Value::int(1));
}

#[test]
fn test_history_tracks_call_frames() {
    let mut run = recorded("(v1)~");
    assert!(run.result.is_ok());
    let interp = &mut run.interpreter;

    interp.rewind_to_start().unwrap();
    interp.step_forward().unwrap(); // (
    interp.step_forward().unwrap(); // ~
    assert_eq!(interp.calls().len(), 1);
    assert_eq!(interp.calls()[0].return_position, 4);
    interp.step_forward().unwrap(); // v1
    interp.step_forward().unwrap(); // )
    assert!(interp.calls().is_empty());
}

#[test]
fn test_history_kept_after_error() {
    let run = recorded("v1!v'x:-1");
    assert!(matches!(run.result, Err(RuntimeError::TypeError { .. })));
    assert_eq!(run.interpreter.total_snapshots(), 4);
    assert_eq!(
        run.interpreter.last_error().map(|e| e.to_string()),
        Some("Unsupported operand types for -: text and number.".to_string())
    );
}

#[test]
fn test_history_memory_limit() {
    let run = run_with_config("{1=1{}", "", RunConfig::debugger(4096));
    assert!(matches!(
        run.result,
        Err(RuntimeError::SnapshotLimitExceeded { .. })
    ));
    assert!(run.interpreter.history_memory_usage() <= 4096);
}
