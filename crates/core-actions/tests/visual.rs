mod common;
use common::*;

use core_state::{Mode, SelectionKind};
use pretty_assertions::assert_eq;

#[test]
fn selection_tracks_anchor_and_cursor() {
    let h = run_scenario("hello", 0, "vl");
    assert_eq!(h.mode(), Mode::Visual);
    let sel = h.state.selection.active.unwrap();
    assert_eq!((sel.anchor, sel.start, sel.end), (0, 0, 2));
    assert_eq!(sel.kind, SelectionKind::Characterwise);

    let h = run_scenario("hello", 3, "vhh");
    let sel = h.state.selection.active.unwrap();
    assert_eq!((sel.start, sel.end), (1, 4));
}

#[test]
fn visual_delete_and_yank() {
    let h = run_scenario("hello world", 0, "vlld");
    assert_eq!(h.text(), "lo world");
    assert_eq!(h.mode(), Mode::Normal);
    assert_eq!(h.cursor(), 0);
    assert_eq!(h.unnamed().unwrap().content, "hel");

    let h = run_scenario("hello world", 10, "vbby");
    assert_eq!(h.text(), "hello world");
    assert_eq!(h.cursor(), 0);
    assert_eq!(h.unnamed().unwrap().content, "hello world");
    assert!(h.state.selection.active.is_none());
}

#[test]
fn visual_x_deletes_and_s_changes() {
    assert_scenario("abcd", 1, "vlx", "ad", 1);
    assert_scenario("abcd", 1, "vlsZ<Esc>", "aZd", 1);
}

#[test]
fn linewise_visual() {
    let h = run_scenario("a\nb\nc", 2, "V");
    let sel = h.state.selection.active.unwrap();
    assert_eq!((sel.start, sel.end, sel.kind), (2, 3, SelectionKind::Linewise));

    assert_scenario("a\nb\nc", 2, "Vd", "a\nc", 2);
    assert_scenario("a\nb\nc", 0, "Vjd", "c", 0);
    assert_scenario("a\nb", 0, "VcX<Esc>", "X\nb", 0);

    let h = run_scenario("a\nb\nc", 4, "Vky");
    let reg = h.unnamed().unwrap();
    assert_eq!(reg.content, "b\nc\n");
    assert!(reg.linewise);
    assert_eq!(h.cursor(), 2);
}

#[test]
fn visual_text_objects() {
    assert_scenario("foo(bar)baz", 5, "vi(d", "foo()baz", 4);
    let h = run_scenario("foo bar", 5, "viw");
    let sel = h.state.selection.active.unwrap();
    assert_eq!((sel.start, sel.end), (4, 7));
    assert_eq!(h.cursor(), 6);
    // Linewise selection drops to characterwise for an object.
    let h = run_scenario("x (a b) y", 3, "Va(");
    assert_eq!(h.mode(), Mode::Visual);
    let sel = h.state.selection.active.unwrap();
    assert_eq!((sel.start, sel.end), (2, 7));
}

#[test]
fn swap_anchor() {
    let h = run_scenario("hello", 1, "vllo");
    assert_eq!(h.cursor(), 1);
    assert_eq!(h.state.selection.anchor, Some(3));
    let mut h = h;
    h.keys("d");
    assert_eq!(h.text(), "ho");
}

#[test]
fn visual_register_prefix() {
    let h = run_scenario("foo bar", 0, "viw\"ay");
    assert_eq!(h.register('a').unwrap().content, "foo");
}

#[test]
fn toggling_visual_modes() {
    assert_eq!(run_scenario("ab", 0, "v<Esc>").mode(), Mode::Normal);
    assert_eq!(run_scenario("ab", 0, "vv").mode(), Mode::Normal);
    assert_eq!(run_scenario("ab", 0, "VV").mode(), Mode::Normal);
    assert_eq!(run_scenario("ab", 0, "vV").mode(), Mode::VisualLine);
    let h = run_scenario("ab\ncd", 1, "vjVv");
    assert_eq!(h.mode(), Mode::Visual);
    assert_eq!(h.state.selection.anchor, Some(1));
    let h = run_scenario("ab", 0, "v<Esc>");
    assert!(h.state.selection.active.is_none());
}

#[test]
fn visual_operations_are_not_dot_repeated() {
    assert_scenario("abcdef", 0, "xvld.", "ef", 0);
}
