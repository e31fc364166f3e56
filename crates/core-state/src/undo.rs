use core_text::Buffer;
use tracing::trace;

/// Default number of snapshots retained in undo history.
pub const UNDO_HISTORY_MAX: usize = 100;

/// A full-state snapshot for undo/redo. Rope clones share structure, so a
/// snapshot costs O(log n) rather than a copy of the text.
#[derive(Clone, Debug)]
pub struct EditSnapshot {
    pub buffer: Buffer,
    pub cursor: usize,
}

/// Insert run state tracking: one undo unit per Insert session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertRun {
    Inactive,
    Active { edits: u32 },
}

#[derive(Debug)]
pub struct UndoEngine {
    undo_stack: Vec<EditSnapshot>,
    redo_stack: Vec<EditSnapshot>,
    insert_run: InsertRun,
    /// Cursor before the command that opened the Insert session moved it.
    insert_origin: Option<usize>,
    capacity: usize,
}

impl Default for UndoEngine {
    fn default() -> Self {
        Self::new(UNDO_HISTORY_MAX)
    }
}

impl UndoEngine {
    /// `capacity` is clamped to at least one snapshot.
    pub fn new(capacity: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            insert_run: InsertRun::Inactive,
            insert_origin: None,
            capacity: capacity.max(1),
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
    pub fn insert_run(&self) -> InsertRun {
        self.insert_run
    }
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record the pre-edit state. Any new edit invalidates the redo history.
    pub fn push_snapshot(&mut self, cursor: usize, buffer: &Buffer) {
        self.undo_stack.push(EditSnapshot {
            buffer: buffer.clone(),
            cursor,
        });
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), chars = buffer.len_chars(), "push_snapshot");
        if self.undo_stack.len() > self.capacity {
            let _ = self.undo_stack.remove(0);
            trace!(target: "state.undo", "undo_stack_trimmed");
        }
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
    }

    /// Remember where the cursor was before an Insert-entering command moved
    /// it; the lazy session snapshot restores that position.
    pub fn set_insert_origin(&mut self, cursor: usize) {
        if self.insert_run == InsertRun::Inactive {
            self.insert_origin = Some(cursor);
        }
    }

    /// Push a snapshot at the first edit of an Insert session; later edits in the
    /// same session are covered by it. The snapshot cursor is the session origin
    /// when one was set.
    pub fn begin_insert_coalescing(&mut self, cursor: usize, buffer: &Buffer) {
        if self.insert_run == InsertRun::Inactive {
            let origin = self.insert_origin.take().unwrap_or(cursor);
            self.push_snapshot(origin.min(buffer.len_chars()), buffer);
            self.insert_run = InsertRun::Active { edits: 0 };
        }
    }

    /// Mark an Insert session as already covered by a snapshot taken by the
    /// command that entered it (`c`, `o`, `s`, ...).
    pub fn adopt_insert_run(&mut self) {
        if self.insert_run == InsertRun::Inactive {
            self.insert_run = InsertRun::Active { edits: 0 };
            self.insert_origin = None;
        }
    }

    pub fn note_insert_edit(&mut self) {
        if let InsertRun::Active { edits } = &mut self.insert_run {
            *edits += 1;
        }
    }

    pub fn end_insert_coalescing(&mut self) {
        self.insert_run = InsertRun::Inactive;
        self.insert_origin = None;
    }

    pub fn undo(&mut self, cursor: &mut usize, buffer: &mut Buffer) -> bool {
        let Some(last) = self.undo_stack.pop() else {
            return false;
        };
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "undo_pop");
        self.redo_stack.push(EditSnapshot {
            buffer: buffer.clone(),
            cursor: *cursor,
        });
        *buffer = last.buffer;
        *cursor = last.cursor;
        true
    }

    pub fn redo(&mut self, cursor: &mut usize, buffer: &mut Buffer) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        trace!(target: "state.undo", redo_depth = self.redo_stack.len(), undo_depth = self.undo_stack.len(), "redo_pop");
        self.undo_stack.push(EditSnapshot {
            buffer: buffer.clone(),
            cursor: *cursor,
        });
        *buffer = next.buffer;
        *cursor = next.cursor;
        true
    }
}
