mod common;
use common::*;

use core_state::Mode;
use pretty_assertions::assert_eq;

#[test]
fn move_then_delete_char() {
    assert_scenario("hello", 0, "lx", "hllo", 1);
}

#[test]
fn delete_word() {
    assert_scenario("hello world", 0, "dw", "world", 0);
}

#[test]
fn delete_middle_line() {
    assert_scenario("line1\nline2\nline3", 7, "dd", "line1\nline3", 6);
}

#[test]
fn delete_inner_and_around_parens() {
    assert_scenario("foo(bar)baz", 5, "di(", "foo()baz", 4);
    assert_scenario("foo(bar)baz", 5, "da(", "foobaz", 3);
}

#[test]
fn insert_then_escape_retreats() {
    let h = run_scenario("hello", 0, "iX<Esc>");
    assert_eq!(h.text(), "Xhello");
    assert_eq!(h.cursor(), 0);
    assert_eq!(h.mode(), Mode::Normal);
}

#[test]
fn dot_repeats_delete_word() {
    assert_scenario("one two three four", 0, "dw.", "three four", 0);
}

#[test]
fn counted_x_removes_min_of_count_and_remaining() {
    assert_scenario("hello", 1, "3x", "ho", 1);
    let h = run_scenario("hello", 2, "10x");
    assert_eq!(h.text(), "he");
    assert_eq!(h.cursor(), 1);
    assert_eq!(h.unnamed().unwrap().content, "llo");
}

#[test]
fn zero_extends_a_count_but_alone_is_line_start() {
    let text: Vec<String> = (1..=120).map(|i| format!("l{i}")).collect();
    let h = run_scenario(&text.join("\n"), 0, "100G");
    assert_eq!(h.state.buffer().line_of(h.cursor()), 99);

    assert_scenario("abcdef", 4, "0", "abcdef", 0);
    // `d0` deletes back to the line start rather than reading a count.
    assert_scenario("abcdef", 4, "d0", "ef", 0);
}

#[test]
fn escape_cancels_pending_operator() {
    assert_scenario("abc", 0, "d<Esc>x", "bc", 0);
    assert_scenario("abc", 0, "3<Esc>x", "bc", 0);
}

#[test]
fn unknown_key_clears_pending_state() {
    let mut h = Harness::new("abc def", 0);
    h.keys("2dQ");
    assert_eq!(h.unhandled, 1);
    assert!(h.translator.is_idle());
    h.keys("x");
    assert_eq!(h.text(), "bc def");
}

#[test]
fn motion_miss_is_a_no_op() {
    assert_scenario("abc", 1, "fz", "abc", 1);
    assert_scenario("abc", 1, "dfz", "abc", 1);
    assert_scenario("abc", 1, "%", "abc", 1);
    assert_scenario("one\ntwo", 5, "j", "one\ntwo", 5);
}

#[test]
fn final_line_break_does_not_add_a_line() {
    assert_scenario("ab\ncd\n", 0, "jj", "ab\ncd\n", 3);
    assert_scenario("ab\ncd\n", 0, "G", "ab\ncd\n", 3);
    assert_scenario("abc\n", 1, "G", "abc\n", 1);
    assert_scenario("ab\ncd\n", 1, "jkj", "ab\ncd\n", 4);
    assert_scenario("ab\ncd\n", 4, "dj", "ab\ncd\n", 4);
    assert_scenario("ab\ncd\n", 0, "3dd", "", 0);
}
