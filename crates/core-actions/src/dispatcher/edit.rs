//! Text edit action handling.
//!
//! Insert-mode entry (`InsertText`, `InsertNewline`, `Backspace`) joins the
//! session's undo run, taking the snapshot lazily at the first mutation, and
//! feeds the dot-repeat capture. `r`, `J` and paste are discrete Normal-mode
//! edits with their own snapshot.

use super::DispatchResult;
use crate::EditKind;
use crate::repeat::{ChangeCommand, RepeatTracker};
use core_state::{EditorState, Mode, RegisterName, SharedRegisters};
use core_text::TextRange;
use core_text::class::is_blank;

pub(crate) fn handle_edit(kind: EditKind, state: &mut EditorState, repeat: &mut RepeatTracker) -> DispatchResult {
    match kind {
        EditKind::InsertText(text) => insert_text(&text, state, repeat),
        EditKind::InsertNewline => insert_text("\n", state, repeat),
        EditKind::Backspace => backspace(state, repeat),
        EditKind::ReplaceChar { ch, count } => replace_char(ch, count, state, repeat),
        EditKind::JoinLines { count } => join_lines(count, state, repeat),
    }
}

fn insert_text(text: &str, state: &mut EditorState, repeat: &mut RepeatTracker) -> DispatchResult {
    if state.mode() != Mode::Insert || text.is_empty() {
        return DispatchResult::clean();
    }
    let at = state.cursor;
    state.begin_insert_coalescing();
    state.note_insert_edit();
    state.edit(|b| b.insert(at, text));
    state.cursor = at + text.chars().count();
    state.wanted_column = None;
    repeat.push_inserted(text);
    tracing::trace!(target: "actions.dispatch", op = "insert", text = ?text, at, to = state.cursor, "edit");
    DispatchResult::edited()
}

fn backspace(state: &mut EditorState, repeat: &mut RepeatTracker) -> DispatchResult {
    if state.mode() != Mode::Insert || state.cursor == 0 {
        return DispatchResult::clean();
    }
    let at = state.cursor;
    state.begin_insert_coalescing();
    state.note_insert_edit();
    state.edit(|b| b.remove(TextRange::new(at - 1, at)));
    state.cursor = at - 1;
    state.wanted_column = None;
    repeat.pop_inserted();
    tracing::trace!(target: "actions.dispatch", op = "backspace", at, "edit");
    DispatchResult::edited()
}

/// `{count}r{char}`: needs `count` chars left on the line. A line break
/// replaces the whole run with a single break.
fn replace_char(ch: char, count: u32, state: &mut EditorState, repeat: &mut RepeatTracker) -> DispatchResult {
    if state.mode() != Mode::Normal {
        return DispatchResult::clean();
    }
    let cursor = state.cursor;
    let count = count.max(1) as usize;
    let (_, line_end) = state.buffer().line_bounds_at(cursor);
    if cursor >= line_end || line_end - cursor < count {
        return DispatchResult::clean();
    }
    let replacement: String = if ch == '\n' {
        "\n".to_string()
    } else {
        std::iter::repeat_n(ch, count).collect()
    };
    state.push_discrete_edit_snapshot();
    state.edit(|b| {
        b.remove(TextRange::new(cursor, cursor + count));
        b.insert(cursor, &replacement);
    });
    state.cursor = if ch == '\n' { cursor + 1 } else { cursor + count - 1 };
    state.clamp_cursor();
    repeat.record(ChangeCommand::Replace(ch), count as u32);
    tracing::trace!(target: "actions.dispatch", op = "replace", ch = %ch.escape_debug(), count, "edit");
    DispatchResult::edited()
}

/// `{count}J`: join `max(count - 1, 1)` following lines onto the cursor line,
/// dropping their indent and separating with one space.
fn join_lines(count: u32, state: &mut EditorState, repeat: &mut RepeatTracker) -> DispatchResult {
    if state.mode() != Mode::Normal {
        return DispatchResult::clean();
    }
    let line = state.buffer().line_of(state.cursor);
    if line >= state.buffer().last_line() {
        return DispatchResult::clean();
    }
    let joins = count.saturating_sub(1).max(1);
    state.push_discrete_edit_snapshot();
    let mut join_point = state.cursor;
    for _ in 0..joins {
        let buf = state.buffer();
        if line >= buf.last_line() {
            break;
        }
        let line_start = buf.line_start(line);
        let eol = buf.line_content_end(line);
        let next_end = buf.line_content_end(line + 1);
        let mut next = eol + 1;
        while next < next_end && buf.char_at(next).is_some_and(is_blank) {
            next += 1;
        }
        let needs_space = eol > line_start
            && next < next_end
            && !buf.char_at(eol - 1).is_some_and(is_blank);
        state.edit(|b| {
            b.remove(TextRange::new(eol, next));
            if needs_space {
                b.insert_char(eol, ' ');
            }
        });
        join_point = if needs_space || eol == line_start { eol } else { eol.saturating_sub(1) };
    }
    state.cursor = join_point;
    state.clamp_cursor();
    state.wanted_column = None;
    repeat.record(ChangeCommand::Join, count);
    tracing::trace!(target: "actions.dispatch", op = "join", joins, cursor = state.cursor, "edit");
    DispatchResult::edited()
}

/// `p` / `P`. Linewise content opens new lines below / above the cursor line
/// and lands on the first pasted line; charwise content splices after / at the
/// cursor and lands on the last pasted char.
pub(crate) fn paste(
    before: bool,
    count: u32,
    register: Option<RegisterName>,
    state: &mut EditorState,
    registers: &SharedRegisters,
    repeat: &mut RepeatTracker,
) -> DispatchResult {
    if state.mode() != Mode::Normal {
        return DispatchResult::clean();
    }
    let Some(value) = registers.read(register).filter(|r| !r.content.is_empty()) else {
        tracing::trace!(target: "actions.dispatch", register = ?register.map(RegisterName::as_char), "paste_empty_register");
        return DispatchResult::clean();
    };
    let count = count.max(1) as usize;
    let buf = state.buffer();
    let cursor = state.cursor;
    let (at, text, landing) = if value.linewise {
        let block = value.content.repeat(count);
        let line = buf.line_of(cursor);
        if before {
            let start = buf.line_start(line);
            (start, block, start)
        } else if line < buf.last_line() {
            let start = buf.line_start(line + 1);
            (start, block, start)
        } else {
            // No line break after the last line: lead with one instead.
            let end = buf.len_chars();
            let body = block.strip_suffix('\n').unwrap_or(&block);
            (end, format!("\n{body}"), end + 1)
        }
    } else {
        let at = match buf.char_at(cursor) {
            Some(c) if !before && c != '\n' => cursor + 1,
            _ => cursor,
        };
        let text = value.content.repeat(count);
        let landing = at + text.chars().count() - 1;
        (at, text, landing)
    };
    state.push_discrete_edit_snapshot();
    state.edit(|b| b.insert(at, &text));
    state.cursor = landing;
    state.clamp_cursor();
    state.wanted_column = None;
    repeat.record(ChangeCommand::Paste { before, register }, count as u32);
    tracing::trace!(target: "actions.dispatch", op = "paste", before, linewise = value.linewise, at, cursor = state.cursor, "edit");
    DispatchResult::edited()
}
