//! Dispatcher applying `Action` to mutable editor state.
//!
//! Decomposed into focused sub-modules:
//! * `motion`   - cursor movement, Visual text-object selection, anchor swap
//! * `mode`     - mode transitions (Insert entry/exit, Visual toggles)
//! * `edit`     - Insert-mode text entry, `r`, `J`, paste
//! * `operator` - `d`/`y`/`c` over motions, text objects, lines and selections
//! * `undo`     - undo / redo dispatch
//!
//! `.` is handled here: the recorded change is turned back into an `Action`
//! and dispatched again, then any captured Insert text is spliced in.

use crate::repeat::{ChangeCommand, RepeatTracker};
use crate::{Action, EditKind, ModeChange};
use core_state::{EditorState, Mode, SharedRegisters};
use core_text::Buffer;

mod edit;
mod mode;
mod motion;
mod operator;
mod undo;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchResult {
    /// Cursor, mode, selection or text changed.
    pub dirty: bool,
    /// The buffer text was mutated.
    pub text_changed: bool,
}

impl DispatchResult {
    pub fn clean() -> Self {
        Self::default()
    }
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            text_changed: false,
        }
    }
    pub fn edited() -> Self {
        Self {
            dirty: true,
            text_changed: true,
        }
    }
    pub fn merge(self, other: Self) -> Self {
        Self {
            dirty: self.dirty || other.dirty,
            text_changed: self.text_changed || other.text_changed,
        }
    }
}

/// Apply an action to one session's state. Register reads and writes go through
/// the engine-wide `registers`; completed changes are recorded in `repeat`.
pub fn dispatch(
    action: Action,
    state: &mut EditorState,
    registers: &SharedRegisters,
    repeat: &mut RepeatTracker,
) -> DispatchResult {
    tracing::trace!(target: "actions.dispatch", action = ?action, mode = ?state.mode(), cursor = state.cursor, "dispatch");
    let result = match action {
        Action::Motion { motion, count } => motion::handle_motion(motion, count, state, repeat),
        Action::VisualTextObject { object, count } => motion::select_text_object(object, count, state),
        Action::SwapAnchor => motion::swap_anchor(state),
        Action::EnterInsert { kind, count } => mode::enter_insert(kind, count, state, repeat),
        Action::ModeChange(mc) => mode::handle_mode_change(mc, state, repeat),
        Action::Edit(kind) => edit::handle_edit(kind, state, repeat),
        Action::Paste {
            before,
            count,
            register,
        } => edit::paste(before, count, register, state, registers, repeat),
        Action::ApplyOperator {
            op,
            target,
            count,
            register,
        } => operator::apply_operator(op, target, count, register, state, registers, repeat),
        Action::VisualOperator { op, register } => operator::apply_visual(op, register, state, registers),
        Action::Undo { count } => undo::handle_undo(count, state),
        Action::Redo { count } => undo::handle_redo(count, state),
        Action::RepeatLastChange { count } => repeat_last_change(count, state, registers, repeat),
    };
    debug_assert!(state.cursor <= state.buffer().len_chars());
    result
}

fn repeat_last_change(
    count: Option<u32>,
    state: &mut EditorState,
    registers: &SharedRegisters,
    repeat: &mut RepeatTracker,
) -> DispatchResult {
    if state.mode() != Mode::Normal {
        return DispatchResult::clean();
    }
    let Some(change) = repeat.last().cloned() else {
        tracing::trace!(target: "actions.repeat", "nothing_to_repeat");
        return DispatchResult::clean();
    };
    let count = count.unwrap_or(change.count);
    tracing::debug!(target: "actions.repeat", command = ?change.command, count, "replay");
    let action = match change.command.clone() {
        ChangeCommand::Operator {
            op,
            target,
            register,
        } => Action::ApplyOperator {
            op,
            target,
            count,
            register,
        },
        ChangeCommand::Insert(kind) => Action::EnterInsert { kind, count },
        ChangeCommand::Replace(ch) => Action::Edit(EditKind::ReplaceChar { ch, count }),
        ChangeCommand::Paste { before, register } => Action::Paste {
            before,
            count,
            register,
        },
        ChangeCommand::Join => Action::Edit(EditKind::JoinLines { count }),
    };
    let mut result = dispatch(action, state, registers, repeat);
    if change.command.enters_insert() && state.mode() == Mode::Insert {
        if let Some(text) = change.inserted_text.filter(|t| !t.is_empty()) {
            result = result.merge(edit::handle_edit(EditKind::InsertText(text), state, repeat));
        }
        result = result.merge(mode::handle_mode_change(ModeChange::LeaveInsert, state, repeat));
    }
    result
}

/// Normal-mode landing spot on `line`: first non-blank, kept on a char.
pub(crate) fn first_non_blank_cursor(buf: &Buffer, line: usize) -> usize {
    let (start, end) = (buf.line_start(line), buf.line_content_end(line));
    let target = core_text::motion::first_non_blank(buf, line);
    if target == end && end > start { end - 1 } else { target }
}

/// Clamp, then step off a line break a charwise delete left the cursor on.
pub(crate) fn settle_cursor(state: &mut EditorState) {
    state.clamp_cursor();
    let cursor = state.cursor;
    let buf = state.buffer();
    if cursor > 0 && buf.char_at(cursor) == Some('\n') && buf.char_at(cursor - 1) != Some('\n') {
        state.cursor = cursor - 1;
    }
}
