mod common;
use common::*;

use core_state::{InsertRun, Mode};
use pretty_assertions::assert_eq;

#[test]
fn insert_entry_points() {
    assert_scenario("hello", 0, "A!<Esc>", "hello!", 5);
    assert_scenario("  foo", 4, "Ibar<Esc>", "  barfoo", 4);
    assert_scenario("ab", 0, "ox<Esc>", "ab\nx", 3);
    assert_scenario("ab", 1, "Ox<Esc>", "x\nab", 0);
    assert_scenario("hi", 1, "a<Esc>", "hi", 1);
    assert_scenario("", 0, "aq<Esc>", "q", 0);
}

#[test]
fn append_on_empty_line_stays_on_line() {
    assert_scenario("a\n\nb", 2, "ax<Esc>", "a\nx\nb", 2);
}

#[test]
fn escape_after_line_break_does_not_retreat() {
    let h = run_scenario("ab", 1, "i<CR><Esc>");
    assert_eq!(h.text(), "a\nb");
    assert_eq!(h.cursor(), 2);
}

#[test]
fn counted_inserts_repeat_typed_text() {
    assert_scenario("", 0, "3ia<Esc>", "aaa", 2);
    assert_scenario("x", 0, "2ofoo<Esc>", "x\nfoo\nfoo", 8);
    assert_scenario("ab", 1, "2a-<Esc>", "ab--", 3);
}

#[test]
fn backspace_and_tab_in_insert() {
    assert_scenario("ab", 0, "A<BS><BS>c<Esc>", "c", 0);
    assert_scenario("x", 0, "i<Tab><Esc>", "\tx", 0);
    assert_scenario("ab", 0, "i<BS><Esc>", "ab", 0);
}

#[test]
fn insert_arrows_move_without_leaving_insert() {
    let h = run_scenario("abc", 0, "i<Right>X");
    assert_eq!(h.mode(), Mode::Insert);
    assert_eq!(h.text(), "aXbc");
    let h = run_scenario("ab\ncd", 0, "A<Down>!<Esc>");
    assert_eq!(h.text(), "ab\ncd!");
}

#[test]
fn insert_session_is_one_undo_step() {
    let mut h = Harness::new("", 0);
    h.keys("ifoo<CR>bar<Esc>");
    assert_eq!(h.text(), "foo\nbar");
    assert_eq!(h.state.undo_depth(), 1);
    assert_eq!(h.state.insert_run(), InsertRun::Inactive);
    h.keys("u");
    assert_eq!(h.text(), "");
    h.keys("<C-r>");
    assert_eq!(h.text(), "foo\nbar");
}

#[test]
fn empty_insert_session_leaves_no_history() {
    let h = run_scenario("abc", 1, "i<Esc>a<Esc>");
    assert_eq!(h.state.undo_depth(), 0);
}

#[test]
fn change_and_typing_undo_together() {
    let h = run_scenario("one two", 0, "cwxyz<Esc>u");
    assert_eq!(h.text(), "one two");
    assert_eq!(h.state.undo_depth(), 0);
}

#[test]
fn undo_after_insert_restores_entry_cursor() {
    assert_scenario("hello", 0, "aX<Esc>u", "hello", 0);
    assert_scenario("hello", 0, "AX<Esc>u", "hello", 0);
    assert_scenario("  hello", 5, "IX<Esc>u", "  hello", 5);
    assert_scenario("hello", 2, "a<Right>X<Esc>u", "hello", 2);
    assert_scenario("one two", 5, "cwX<Esc>u", "one two", 5);
}

#[test]
fn undo_redo_counts_and_redo_invalidation() {
    assert_scenario("abc", 0, "xxuu", "abc", 0);
    assert_scenario("abc", 0, "xxuu<C-r>", "bc", 0);
    assert_scenario("abcd", 0, "xxx2u", "bcd", 0);
    // A new edit drops the redo history.
    assert_scenario("abc", 0, "xux<C-r>", "bc", 0);
    assert_scenario("abc", 0, "u<C-r>", "abc", 0);
}

#[test]
fn undo_history_is_capped() {
    let mut h = Harness::with_options("abcdefg", 0, core_state::SharedRegisters::new(), 3);
    h.keys("xxxxx");
    assert_eq!(h.text(), "fg");
    h.keys("10u");
    assert_eq!(h.text(), "cdefg");
    assert_eq!(h.state.undo_depth(), 0);
}

#[test]
fn dot_repeats_inserts() {
    assert_scenario("", 0, "ifoo<Esc>.", "fofooo", 4);
    assert_scenario("a\nb", 0, "A;<Esc>j.", "a;\nb;", 4);
    assert_scenario("", 0, "3ia<Esc>.", "aaaaaa", 4);
    assert_scenario("x", 0, "oy<Esc>.", "x\ny\ny", 4);
}

#[test]
fn dot_repeats_change_with_typed_text() {
    assert_scenario("aa bb", 0, "ciwX<Esc>w.", "X X", 2);
    assert_scenario("one two three", 0, "cwZ <Esc>w.", "Z Z three", 3);
}

#[test]
fn dot_count_overrides_recorded_count() {
    assert_scenario("a b c d e f", 0, "dw3.", "e f", 0);
    assert_scenario("a b c d e f", 0, "2dw.", "e f", 0);
}

#[test]
fn dot_repeats_other_changes() {
    assert_scenario("abc", 0, "x.", "c", 0);
    assert_scenario("1\n2\n3", 0, "dd.", "3", 0);
    assert_scenario("abc", 0, "rzl.", "zzc", 1);
    assert_scenario("ab", 0, "ylp.", "aaab", 2);
    assert_scenario("a\nb\nc\nd", 0, "J.", "a b c\nd", 3);
}

#[test]
fn yanks_and_motions_are_not_recorded() {
    assert_scenario("abcd", 0, "xyw.", "cd", 0);
    assert_scenario("abc", 0, ".", "abc", 0);
}

#[test]
fn dot_then_undo_restores_one_step() {
    assert_scenario("one two three", 0, "dw.u", "two three", 0);
}
