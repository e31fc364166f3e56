//! Operator application (`d`, `y`, `c`).
//!
//! Targets resolve to an `OperatorSpan`; `apply_span` then performs the
//! register write and buffer mutation shared by Normal-mode operators and
//! Visual selections:
//! * delete: snapshot, write the register, remove, cursor to the span start
//!   (first non-blank of the landing line for linewise deletes).
//! * yank: register write only; the cursor stays put.
//! * change: delete without consuming a linewise span's final line break,
//!   then enter Insert. An empty span still enters Insert.

use super::{DispatchResult, first_non_blank_cursor, settle_cursor};
use crate::motion_resolver::{MotionContext, resolve_motion};
use crate::repeat::{ChangeCommand, RepeatTracker};
use crate::span_resolver::{OperatorSpan, count_lines_span, linewise_delete_range, motion_span};
use crate::text_object::resolve_text_object;
use crate::{MotionKind, OperatorKind, OperatorTarget};
use core_state::{EditorState, Mode, RegisterName, SelectionKind, SharedRegisters};

pub(crate) fn apply_operator(
    op: OperatorKind,
    target: OperatorTarget,
    count: u32,
    register: Option<RegisterName>,
    state: &mut EditorState,
    registers: &SharedRegisters,
    repeat: &mut RepeatTracker,
) -> DispatchResult {
    if state.mode() != Mode::Normal {
        return DispatchResult::clean();
    }
    let Some(span) = resolve_target(target, count, state) else {
        tracing::trace!(target: "actions.dispatch", op = %op.as_char(), ?target, count, "operator_target_miss");
        return DispatchResult::clean();
    };
    tracing::debug!(target: "actions.dispatch", op = %op.as_char(), ?target, count, start = span.range.start, end = span.range.end, linewise = span.linewise, "apply_operator");
    let result = apply_span(op, span, register, state, registers);
    let command = ChangeCommand::Operator {
        op,
        target,
        register,
    };
    match op {
        OperatorKind::Delete if result.text_changed => repeat.record(command, count),
        OperatorKind::Change => repeat.begin_insert(command, count),
        OperatorKind::Delete | OperatorKind::Yank => {}
    }
    result
}

fn resolve_target(target: OperatorTarget, count: u32, state: &mut EditorState) -> Option<OperatorSpan> {
    let cursor = state.cursor;
    match target {
        OperatorTarget::Line => Some(count_lines_span(state.buffer(), cursor, count)),
        OperatorTarget::Motion(motion) => {
            if let MotionKind::Find(spec) = motion {
                state.last_find = Some(spec);
            }
            let buf = state.buffer();
            let ctx = MotionContext::operator(buf, state.wanted_column, state.last_find);
            let resolved = resolve_motion(buf, cursor, motion, count, &ctx)?;
            Some(motion_span(buf, cursor, &resolved))
        }
        OperatorTarget::TextObject(object) => {
            resolve_text_object(state.buffer(), cursor, object, count).map(OperatorSpan::charwise)
        }
    }
}

/// Visual `d`/`y`/`c` over the active selection. Always leaves Visual mode.
pub(crate) fn apply_visual(
    op: OperatorKind,
    register: Option<RegisterName>,
    state: &mut EditorState,
    registers: &SharedRegisters,
) -> DispatchResult {
    let Some(selection) = state.selection.active.filter(|_| state.mode().is_visual()) else {
        return DispatchResult::clean();
    };
    let span = OperatorSpan {
        range: selection.range(),
        linewise: selection.kind == SelectionKind::Linewise,
    };
    tracing::debug!(target: "actions.dispatch", op = %op.as_char(), start = span.range.start, end = span.range.end, linewise = span.linewise, "apply_visual");
    state.set_mode(Mode::Normal);
    // Charwise edits and every yank start from the selection start.
    if op == OperatorKind::Yank || !span.linewise {
        state.cursor = span.range.start;
    }
    apply_span(op, span, register, state, registers).merge(DispatchResult::dirty())
}

fn apply_span(
    op: OperatorKind,
    span: OperatorSpan,
    register: Option<RegisterName>,
    state: &mut EditorState,
    registers: &SharedRegisters,
) -> DispatchResult {
    let buf = state.buffer();
    let text = buf.slice(span.range);
    match op {
        OperatorKind::Yank => {
            if span.range.is_empty() && !span.linewise {
                return DispatchResult::clean();
            }
            registers.write_yank(text, span.linewise, register);
            state.clamp_cursor();
            DispatchResult::clean()
        }
        OperatorKind::Delete => {
            let range = if span.linewise {
                linewise_delete_range(buf, span.range)
            } else {
                span.range
            };
            if range.is_empty() {
                return DispatchResult::clean();
            }
            registers.write_delete(text, span.linewise, register);
            state.delete_span_with_snapshot(range);
            state.cursor = if span.linewise {
                let buf = state.buffer();
                let landing = buf.line_of(span.range.start.min(buf.len_chars()));
                first_non_blank_cursor(buf, landing)
            } else {
                range.start
            };
            settle_cursor(state);
            state.wanted_column = None;
            DispatchResult::edited()
        }
        OperatorKind::Change => {
            state.mark_insert_origin();
            let removed = !span.range.is_empty();
            if removed {
                registers.write_delete(text, span.linewise, register);
                state.delete_span_with_snapshot(span.range);
            }
            state.set_mode(Mode::Insert);
            state.cursor = span.range.start;
            state.clamp_cursor();
            state.wanted_column = None;
            if removed {
                state.adopt_insert_run();
                DispatchResult::edited()
            } else {
                DispatchResult::dirty()
            }
        }
    }
}
