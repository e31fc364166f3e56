//! Cursor movement semantics.
//!
//! Motions resolve through `motion_resolver` with a context built from the
//! current mode: Insert may land one past the last char, every other mode
//! stays on a char. Misses leave the cursor (and the wanted column) alone.

use super::DispatchResult;
use crate::motion_resolver::{MotionContext, resolve_motion};
use crate::repeat::RepeatTracker;
use crate::text_object::resolve_text_object;
use crate::{MotionKind, TextObject};
use core_state::{EditorState, Mode};

pub(crate) fn handle_motion(
    motion: MotionKind,
    count: u32,
    state: &mut EditorState,
    repeat: &mut RepeatTracker,
) -> DispatchResult {
    let mode = state.mode();
    // A failed find still becomes the `;` / `,` target.
    if let MotionKind::Find(spec) = motion {
        state.last_find = Some(spec);
    }
    let ctx = MotionContext {
        wanted_column: state.wanted_column,
        last_find: state.last_find,
        limit: state.max_cursor(),
        past_end: mode == Mode::Insert,
        for_operator: false,
    };
    let before = state.cursor;
    let Some(resolved) = resolve_motion(state.buffer(), before, motion, count, &ctx) else {
        tracing::trace!(target: "actions.dispatch", ?motion, count, "motion_miss");
        return DispatchResult::clean();
    };
    state.cursor = resolved.target;
    state.wanted_column = resolved.wanted_column;
    tracing::trace!(target: "actions.dispatch", ?motion, count, from = before, to = state.cursor, "motion");
    if mode == Mode::Insert && state.cursor != before {
        repeat.reset_inserted();
    }
    if mode.is_visual() {
        state.refresh_selection();
    }
    if state.cursor != before {
        DispatchResult::dirty()
    } else {
        DispatchResult::clean()
    }
}

/// Visual `i(`, `aw`, ...: select the object, anchor at its start and cursor
/// on its last char. Linewise Visual drops to characterwise.
pub(crate) fn select_text_object(object: TextObject, count: u32, state: &mut EditorState) -> DispatchResult {
    if !state.mode().is_visual() {
        return DispatchResult::clean();
    }
    let Some(range) = resolve_text_object(state.buffer(), state.cursor, object, count) else {
        return DispatchResult::clean();
    };
    if range.is_empty() {
        return DispatchResult::clean();
    }
    state.selection.anchor = Some(range.start);
    state.cursor = range.end - 1;
    state.wanted_column = None;
    if state.mode() == Mode::VisualLine {
        state.set_mode(Mode::Visual);
    } else {
        state.refresh_selection();
    }
    DispatchResult::dirty()
}

/// Visual `o`: jump to the other end of the selection.
pub(crate) fn swap_anchor(state: &mut EditorState) -> DispatchResult {
    let Some(anchor) = state.selection.anchor else {
        return DispatchResult::clean();
    };
    state.selection.anchor = Some(state.cursor);
    state.cursor = anchor.min(state.max_cursor());
    state.wanted_column = None;
    state.refresh_selection();
    DispatchResult::dirty()
}
