mod common;
use common::*;

#[test]
fn test_zero_iteration_loop() {
    assert_eq!(output_of("v5i>0{<0<=1{v'no:!}v'yes:!"), "yes");
}

#[test]
fn test_loop_with_string_condition() {
    assert_eq!(output_of("v':>0{<0!='aaa:{<0+'a:>0}<0!"), "aaa");
}

#[test]
fn test_nested_loops_draw_triangle() {
    let program = "v1i>0{<0<=3{v1i>1{<1<=<0{v'*:!<1+1i>1}v'\\n:!<0+1i>0}";
    assert_eq!(output_of(program), "*\n**\n***\n");
}

#[test]
fn test_loop_body_skipped_with_nested_loop() {
    assert_eq!(output_of("{1=2{{1=1{v'x:!}v'y:!}v'z:!"), "z");
}

#[test]
fn test_function_stored_in_slot() {
    let program = "(v'called :!)>9v'start :!<9~<9~v'end:!";
    assert_eq!(output_of(program), "start called called end");
}

#[test]
fn test_function_with_loop_called_from_loop() {
    let program = "(v0i>5{<5<=2{<5!<5+1i>5})>0v0i>1{<1<=1{v'[:!<0~v']:!<1+1i>1}";
    assert_eq!(output_of(program), "[012][012]");
}

#[test]
fn test_function_calling_function() {
    let program = "(v'inner:!)>1(v'<:!<1~v'>:!)>2<2~";
    assert_eq!(output_of(program), "<inner>");
}

#[test]
fn test_recursion() {
    // print slot 0, decrement it, and recurse while it is still positive
    let program = "(<0!<0-1i>0{<0>=1{<1~})>1v3i>0<1~";
    assert_eq!(output_of(program), "321");
}
