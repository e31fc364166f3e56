//! Mode transitions.
//!
//! Entering Insert adjusts the cursor first (`a` steps past the cursor char,
//! `A` goes to the line end, `o`/`O` open a line) and opens a dot-repeat
//! capture. Leaving Insert applies the insert count, retreats the cursor onto
//! a char, closes the undo run and commits the captured change.

use super::DispatchResult;
use crate::repeat::{ChangeCommand, RepeatTracker};
use crate::{InsertKind, ModeChange};
use core_state::{EditorState, Mode};

pub(crate) fn enter_insert(
    kind: InsertKind,
    count: u32,
    state: &mut EditorState,
    repeat: &mut RepeatTracker,
) -> DispatchResult {
    if state.mode() != Mode::Normal {
        return DispatchResult::clean();
    }
    state.mark_insert_origin();
    let buf = state.buffer();
    let cursor = state.cursor;
    let line = buf.line_of(cursor);
    let mut result = DispatchResult::dirty();
    let target = match kind {
        InsertKind::Before => cursor,
        InsertKind::After => match buf.char_at(cursor) {
            Some(c) if c != '\n' => cursor + 1,
            _ => cursor,
        },
        InsertKind::LineStart => core_text::motion::first_non_blank(buf, line),
        InsertKind::LineEnd => buf.line_content_end(line),
        InsertKind::OpenBelow | InsertKind::OpenAbove => {
            let at = if kind == InsertKind::OpenBelow {
                buf.line_content_end(line)
            } else {
                buf.line_start(line)
            };
            state.push_discrete_edit_snapshot();
            state.edit(|b| b.insert_char(at, '\n'));
            state.adopt_insert_run();
            result = DispatchResult::edited();
            if kind == InsertKind::OpenBelow { at + 1 } else { at }
        }
    };
    state.set_mode(Mode::Insert);
    state.cursor = target;
    state.wanted_column = None;
    state.clamp_cursor();
    repeat.begin_insert(ChangeCommand::Insert(kind), count);
    tracing::trace!(target: "actions.dispatch", ?kind, count, cursor = state.cursor, "enter_insert");
    result
}

pub(crate) fn handle_mode_change(
    mc: ModeChange,
    state: &mut EditorState,
    repeat: &mut RepeatTracker,
) -> DispatchResult {
    match mc {
        ModeChange::LeaveInsert => leave_insert(state, repeat),
        ModeChange::EnterVisual => enter_visual(Mode::Visual, state),
        ModeChange::EnterVisualLine => enter_visual(Mode::VisualLine, state),
        ModeChange::ExitVisual => {
            if !state.mode().is_visual() {
                return DispatchResult::clean();
            }
            state.set_mode(Mode::Normal);
            state.clamp_cursor();
            DispatchResult::dirty()
        }
    }
}

fn enter_visual(mode: Mode, state: &mut EditorState) -> DispatchResult {
    if state.mode() == mode || state.mode() == Mode::Insert {
        return DispatchResult::clean();
    }
    state.set_mode(mode);
    DispatchResult::dirty()
}

fn leave_insert(state: &mut EditorState, repeat: &mut RepeatTracker) -> DispatchResult {
    if state.mode() != Mode::Insert {
        return DispatchResult::clean();
    }
    let mut result = DispatchResult::dirty();
    let repeat_insert = repeat.pending().and_then(|change| match change.command {
        ChangeCommand::Insert(kind) if change.count > 1 => Some((kind, change.count)),
        _ => None,
    });
    if let Some((kind, count)) = repeat_insert
        && !repeat.inserted().is_empty()
    {
        let text = repeat.inserted().to_string();
        let opens_lines = matches!(kind, InsertKind::OpenBelow | InsertKind::OpenAbove);
        for _ in 1..count {
            let (at, piece) = if opens_lines {
                let line = state.buffer().line_of(state.cursor);
                (state.buffer().line_content_end(line), format!("\n{text}"))
            } else {
                (state.cursor, text.clone())
            };
            state.note_insert_edit();
            state.edit(|b| b.insert(at, &piece));
            state.cursor = at + piece.chars().count();
        }
        result = DispatchResult::edited();
    }
    let cursor = state.cursor;
    if cursor > 0 && state.buffer().char_at(cursor - 1) != Some('\n') {
        state.cursor = cursor - 1;
    }
    state.end_insert_coalescing();
    state.set_mode(Mode::Normal);
    state.clamp_cursor();
    state.wanted_column = None;
    repeat.finish_insert();
    tracing::trace!(target: "actions.dispatch", cursor = state.cursor, "leave_insert");
    result
}
