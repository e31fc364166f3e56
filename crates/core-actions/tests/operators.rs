mod common;
use common::*;

use core_state::Mode;
use pretty_assertions::assert_eq;

#[test]
fn delete_to_line_end() {
    assert_scenario("hello world", 6, "D", "hello ", 5);
    assert_scenario("hello world", 6, "d$", "hello ", 5);
    assert_scenario("ab\ncd", 0, "D", "\ncd", 0);
}

#[test]
fn inclusive_and_exclusive_motions() {
    assert_scenario("one two", 0, "de", " two", 0);
    assert_scenario("hello world", 0, "dfo", " world", 0);
    assert_scenario("hello world", 0, "dto", "o world", 0);
    assert_scenario("hello world", 10, "dFo", "hello wd", 7);
    assert_scenario("a(b)c", 1, "d%", "ac", 1);
}

#[test]
fn counts_multiply() {
    assert_scenario("a b c d e f", 0, "2dw", "c d e f", 0);
    assert_scenario("a b c d e f", 0, "d2w", "c d e f", 0);
    assert_scenario("a b c d e f", 0, "2d2w", "e f", 0);
}

#[test]
fn last_word_delete_stays_on_line() {
    assert_scenario("one two", 4, "dw", "one ", 3);
    assert_scenario("foo bar\n  baz", 4, "dw", "foo \n  baz", 3);
    assert_scenario("ab\ncd", 1, "x", "a\ncd", 0);
}

#[test]
fn linewise_motions() {
    assert_scenario("a\nb\nc", 0, "dj", "c", 0);
    assert_scenario("a\nb\nc", 4, "dk", "a", 0);
    assert_scenario("a\nb\nc", 2, "dG", "a", 0);
    assert_scenario("a\nb\nc", 2, "dgg", "c", 0);
    assert_scenario("a\nb\nc", 2, "5dd", "a", 0);
    assert_scenario("solo", 2, "dd", "", 0);
}

#[test]
fn dd_lands_on_first_non_blank() {
    assert_scenario("one\n  two\nthree", 0, "dd", "  two\nthree", 2);
}

#[test]
fn paragraph_delete() {
    assert_scenario("a\nb\n\nc", 0, "d}", "\nc", 0);
}

#[test]
fn yank_keeps_cursor_and_fills_register() {
    let h = run_scenario("foo bar", 4, "yb");
    assert_eq!(h.text(), "foo bar");
    assert_eq!(h.cursor(), 4);
    let reg = h.unnamed().unwrap();
    assert_eq!(reg.content, "foo ");
    assert!(!reg.linewise);

    let h = run_scenario("one\ntwo", 5, "yy");
    let reg = h.unnamed().unwrap();
    assert_eq!(reg.content, "two\n");
    assert!(reg.linewise);
    assert_eq!(h.cursor(), 5);
}

#[test]
fn deleted_lines_are_linewise() {
    let h = run_scenario("a\nb\nc", 0, "2dd");
    let reg = h.unnamed().unwrap();
    assert_eq!(reg.content, "a\nb\n");
    assert!(reg.linewise);
}

#[test]
fn named_register_prefix_redirects_one_operation() {
    let h = run_scenario("foo bar", 0, "\"ayww\"aP");
    assert_eq!(h.text(), "foo foo bar");
    assert_eq!(h.cursor(), 7);
    assert_eq!(h.register('a').unwrap().content, "foo ");
    assert_eq!(h.unnamed().unwrap().content, "foo ");

    // The prefix is consumed: the next delete leaves `a` alone.
    let h = run_scenario("foo bar", 0, "\"ayiwx");
    assert_eq!(h.register('a').unwrap().content, "foo");
    assert_eq!(h.unnamed().unwrap().content, "f");
}

#[test]
fn uppercase_register_appends() {
    let h = run_scenario("foo bar", 0, "\"ayww\"Ayw");
    assert_eq!(h.register('a').unwrap().content, "foo bar");
}

#[test]
fn change_text_objects() {
    let h = run_scenario("foo(bar)baz", 5, "ci(X<Esc>");
    assert_eq!(h.text(), "foo(X)baz");
    assert_eq!(h.mode(), Mode::Normal);
    assert_eq!(h.cursor(), 4);
    assert_scenario("one two three", 5, "ciwNEW<Esc>", "one NEW three", 6);
    assert_scenario("say \"hi there\" now", 6, "ci\"yo<Esc>", "say \"yo\" now", 6);
    assert_scenario("x = f(a, b)", 7, "cibq<Esc>", "x = f(q)", 6);
}

#[test]
fn change_empty_pair_enters_insert() {
    assert_scenario("f()", 1, "ci(z<Esc>", "f(z)", 2);
}

#[test]
fn change_line_keeps_the_line() {
    assert_scenario("  foo\nbar", 2, "ccx<Esc>", "x\nbar", 0);
    assert_scenario("  foo\nbar", 2, "Sx<Esc>", "x\nbar", 0);
}

#[test]
fn change_shorthands() {
    assert_scenario("hello world", 6, "CX<Esc>", "hello X", 6);
    assert_scenario("hello", 0, "sJ<Esc>", "Jello", 0);
    assert_scenario("foo bar", 0, "cwX<Esc>", "Xbar", 0);
}

#[test]
fn text_object_miss_does_nothing() {
    let h = run_scenario("foo bar", 2, "di(");
    assert_eq!(h.text(), "foo bar");
    assert!(h.unnamed().is_none());
    let h = run_scenario("foo bar", 2, "ci(");
    assert_eq!(h.mode(), Mode::Normal);
}

#[test]
fn find_repeat_with_semicolon_and_comma() {
    assert_scenario("a-b-c-d", 0, "f-;x", "a-bc-d", 3);
    assert_scenario("a-b-c-d", 0, "f-;;,x", "a-bc-d", 3);
    // `;` after `t-` skips the match right next to the cursor.
    assert_scenario("a-b-c-d", 0, "t-;;x", "a-b--d", 4);
}

#[test]
fn x_and_capital_x() {
    assert_scenario("abc", 2, "X", "ac", 1);
    assert_scenario("abc", 0, "X", "abc", 0);
    assert_scenario("", 0, "x", "", 0);
    let h = run_scenario("abc", 0, "2x");
    assert_eq!(h.unnamed().unwrap().content, "ab");
}

#[test]
fn charwise_paste() {
    let mut h = Harness::new("abc", 0);
    h.set_register('"', "XY", false);
    h.keys("p");
    assert_eq!(h.text(), "aXYbc");
    assert_eq!(h.cursor(), 2);
    h.keys("u3P");
    assert_eq!(h.text(), "XYXYXYabc");
    assert_eq!(h.cursor(), 5);
}

#[test]
fn paste_on_empty_line_splices_at_cursor() {
    let mut h = Harness::new("\nx", 0);
    h.set_register('"', "Q", false);
    h.keys("p");
    assert_eq!(h.text(), "Q\nx");
    assert_eq!(h.cursor(), 0);
}

#[test]
fn linewise_paste_below_and_above() {
    assert_scenario("a\nb", 0, "yyp", "a\na\nb", 2);
    assert_scenario("a\nb", 2, "yyp", "a\nb\nb", 4);
    assert_scenario("one\ntwo\nthree", 4, "ddP", "one\ntwo\nthree", 4);
    assert_scenario("a\nb", 2, "yy2P", "a\nb\nb\nb", 2);
}

#[test]
fn paste_from_empty_register_is_a_no_op() {
    let h = run_scenario("abc", 1, "p\"qp");
    assert_eq!(h.text(), "abc");
    assert_eq!(h.state.undo_depth(), 0);
}

#[test]
fn replace_char() {
    assert_scenario("hello", 0, "3rx", "xxxlo", 2);
    assert_scenario("hello", 0, "9rx", "hello", 0);
    assert_scenario("ab", 0, "r<CR>", "\nb", 1);
}

#[test]
fn join_lines() {
    assert_scenario("abc\n   def", 0, "J", "abc def", 3);
    assert_scenario("a\nb\nc\nd", 0, "3J", "a b c\nd", 3);
    assert_scenario("abc\n\nx", 0, "J", "abc\nx", 2);
    assert_scenario("solo", 1, "J", "solo", 1);
}
