//! Undo / Redo dispatch over the snapshot stacks in `EditorState`.

use super::DispatchResult;
use core_state::{EditorState, Mode};

pub(crate) fn handle_undo(count: u32, state: &mut EditorState) -> DispatchResult {
    step(count, state, "undo", EditorState::undo)
}

pub(crate) fn handle_redo(count: u32, state: &mut EditorState) -> DispatchResult {
    step(count, state, "redo", EditorState::redo)
}

fn step(count: u32, state: &mut EditorState, op: &'static str, apply: fn(&mut EditorState) -> bool) -> DispatchResult {
    if state.mode() != Mode::Normal {
        return DispatchResult::clean();
    }
    let mut applied = 0u32;
    while applied < count.max(1) && apply(state) {
        applied += 1;
    }
    tracing::trace!(target: "actions.dispatch", op, requested = count, applied, "history");
    if applied == 0 {
        return DispatchResult::clean();
    }
    state.clamp_cursor();
    state.wanted_column = None;
    DispatchResult::edited()
}
