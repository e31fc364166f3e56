//! Editing session state: buffer, cursor, mode, visual selection, undo history.
//!
//! Undo logic lives in `undo::UndoEngine`, isolating snapshot push/undo/redo and
//! Insert-run coalescing from the command dispatcher.
//!
//! Insert Coalescing:
//! - Everything typed between entering and leaving Insert mode is one undo unit.
//! - Plain `i`/`a`/`I`/`A` take the snapshot lazily at the first mutation, so an
//!   Insert session that changes nothing leaves no history entry.
//! - Commands that edit before entering Insert (`c`, `o`, `s`, ...) take the
//!   snapshot themselves and adopt the run so typing joins their unit.
//!
//! Registers are shared by every session of an engine and live behind
//! `registers::SharedRegisters`; the optional system clipboard is bridged on a
//! worker thread (`clipboard::ClipboardBridge`).

use core_text::motion::FindSpec;
use core_text::{Buffer, TextRange};
use serde::Serialize;

pub mod clipboard;
pub mod registers;
pub mod undo;

pub use clipboard::{ClipboardBridge, ClipboardError, ClipboardProvider, SystemClipboard};
pub use registers::{Register, RegisterName, Registers, SharedRegisters};
use undo::UndoEngine;
pub use undo::{InsertRun, UNDO_HISTORY_MAX};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    Visual,
    VisualLine,
}

impl Mode {
    pub fn is_visual(self) -> bool {
        matches!(self, Mode::Visual | Mode::VisualLine)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SelectionKind {
    Characterwise,
    Linewise,
}

/// Active Visual selection.
///
/// `start..end` is half-open in char offsets: characterwise selections cover
/// both the anchor and the cursor char, linewise selections cover every line
/// between them (excluding the final line's newline).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisualSelection {
    pub anchor: usize,
    pub start: usize,
    pub end: usize,
    pub kind: SelectionKind,
}

impl VisualSelection {
    pub fn range(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }

    /// Selection spans from `anchor` to `cursor` in `buffer`.
    pub fn compute(anchor: usize, cursor: usize, kind: SelectionKind, buffer: &Buffer) -> Self {
        let (lo, hi) = (anchor.min(cursor), anchor.max(cursor));
        let (start, end) = match kind {
            SelectionKind::Characterwise => (lo, (hi + 1).min(buffer.len_chars())),
            SelectionKind::Linewise => (
                buffer.line_start(buffer.line_of(lo)),
                buffer.line_content_end(buffer.line_of(hi)),
            ),
        };
        Self {
            anchor,
            start,
            end,
            kind,
        }
    }
}

/// Anchor set when Visual mode is entered; the span is rebuilt after every
/// cursor move while the anchor stays put.
#[derive(Debug, Default, Clone)]
pub struct SelectionModel {
    pub anchor: Option<usize>,
    pub active: Option<VisualSelection>,
}

impl SelectionModel {
    pub fn clear(&mut self) {
        self.anchor = None;
        self.active = None;
    }
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}

/// `wanted_column` value meaning "end of line" after `$`.
pub const STICKY_EOL: usize = usize::MAX;

#[derive(Debug)]
pub struct EditorState {
    buffer: Buffer,
    pub cursor: usize,
    mode: Mode,
    undo: UndoEngine,
    pub selection: SelectionModel,
    /// Column `j`/`k` try to land on.
    pub wanted_column: Option<usize>,
    /// Last `f`/`F`/`t`/`T` search for `;` and `,`.
    pub last_find: Option<FindSpec>,
    revision: u64,
}

impl EditorState {
    pub fn new(buffer: Buffer, mode: Mode, undo_levels: usize) -> Self {
        let mut state = Self {
            buffer,
            cursor: 0,
            mode: Mode::Normal,
            undo: UndoEngine::new(undo_levels),
            selection: SelectionModel::default(),
            wanted_column: None,
            last_find: None,
            revision: 0,
        };
        state.set_mode(mode);
        state
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Mutate the buffer; every call counts as a new revision.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut Buffer) -> R) -> R {
        self.revision += 1;
        f(&mut self.buffer)
    }

    /// Increments on every text mutation (edits, undo, redo, host sync).
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch modes, entering or leaving Visual selection tracking as needed.
    pub fn set_mode(&mut self, mode: Mode) {
        let was_visual = self.mode.is_visual();
        self.mode = mode;
        match mode {
            Mode::Visual | Mode::VisualLine => {
                if !was_visual || self.selection.anchor.is_none() {
                    self.selection.anchor = Some(self.cursor);
                }
                self.refresh_selection();
            }
            Mode::Normal | Mode::Insert => self.selection.clear(),
        }
    }

    /// Rebuild the Visual span from the anchor and the cursor.
    pub fn refresh_selection(&mut self) {
        let kind = match self.mode {
            Mode::Visual => SelectionKind::Characterwise,
            Mode::VisualLine => SelectionKind::Linewise,
            Mode::Normal | Mode::Insert => {
                self.selection.active = None;
                return;
            }
        };
        let anchor = self
            .selection
            .anchor
            .unwrap_or(self.cursor)
            .min(self.buffer.len_chars());
        self.selection.active = Some(VisualSelection::compute(
            anchor,
            self.cursor,
            kind,
            &self.buffer,
        ));
    }

    /// Largest cursor offset allowed in the current mode. Insert may sit one
    /// past the last char; every other mode stays on a char.
    pub fn max_cursor(&self) -> usize {
        let len = self.buffer.len_chars();
        match self.mode {
            Mode::Insert => len,
            _ => len.saturating_sub(1),
        }
    }

    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.max_cursor());
    }

    /// Replace the whole text from the host side. History is kept so an undo
    /// can step back over the sync.
    pub fn replace_text(&mut self, text: &str, cursor: usize) {
        self.undo.end_insert_coalescing();
        self.undo.push_snapshot(self.cursor, &self.buffer);
        self.revision += 1;
        self.buffer = Buffer::new(text);
        self.cursor = cursor;
        if self.mode.is_visual() {
            let len = self.buffer.len_chars();
            if let Some(anchor) = self.selection.anchor.as_mut() {
                *anchor = (*anchor).min(len.saturating_sub(1));
            }
        }
        self.clamp_cursor();
        self.refresh_selection();
    }

    pub fn push_discrete_edit_snapshot(&mut self) {
        self.undo.push_snapshot(self.cursor, &self.buffer);
    }

    /// Record the current cursor as the undo position of the Insert session
    /// about to start.
    pub fn mark_insert_origin(&mut self) {
        self.undo.set_insert_origin(self.cursor);
    }

    pub fn begin_insert_coalescing(&mut self) {
        self.undo.begin_insert_coalescing(self.cursor, &self.buffer);
    }

    pub fn adopt_insert_run(&mut self) {
        self.undo.adopt_insert_run();
    }

    pub fn note_insert_edit(&mut self) {
        self.undo.note_insert_edit();
    }

    pub fn end_insert_coalescing(&mut self) {
        self.undo.end_insert_coalescing();
    }

    /// Snapshot, then remove `range`, returning the removed text.
    pub fn delete_span_with_snapshot(&mut self, range: TextRange) -> String {
        self.push_discrete_edit_snapshot();
        self.edit(|buf| buf.remove(range))
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.undo.undo(&mut self.cursor, &mut self.buffer);
        if undone {
            self.revision += 1;
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.undo.redo(&mut self.cursor, &mut self.buffer);
        if redone {
            self.revision += 1;
        }
        redone
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.undo_depth()
    }
    pub fn redo_depth(&self) -> usize {
        self.undo.redo_depth()
    }
    pub fn insert_run(&self) -> InsertRun {
        self.undo.insert_run()
    }
}
