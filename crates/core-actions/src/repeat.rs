//! Dot-repeat bookkeeping.
//!
//! Non-insert changes are recorded the moment they complete. Changes that end
//! in Insert mode (`i`, `o`, `cw`, `S`, ...) are parked as pending while the
//! Insert session runs; the text typed in that session is captured and the
//! change is committed on `<Esc>`. Replays re-dispatch the recorded command
//! and therefore re-record themselves, so `3.` updates the stored count.

use crate::{InsertKind, OperatorKind, OperatorTarget};
use core_state::RegisterName;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeCommand {
    Operator {
        op: OperatorKind,
        target: OperatorTarget,
        register: Option<RegisterName>,
    },
    Insert(InsertKind),
    Replace(char),
    Paste {
        before: bool,
        register: Option<RegisterName>,
    },
    Join,
}

impl ChangeCommand {
    /// Commands whose replay splices captured Insert text.
    pub fn enters_insert(&self) -> bool {
        matches!(
            self,
            ChangeCommand::Insert(_)
                | ChangeCommand::Operator {
                    op: OperatorKind::Change,
                    ..
                }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastChange {
    pub command: ChangeCommand,
    pub count: u32,
    pub inserted_text: Option<String>,
}

#[derive(Debug, Default)]
pub struct RepeatTracker {
    last: Option<LastChange>,
    pending: Option<LastChange>,
    inserted: String,
}

impl RepeatTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a change that completed without entering Insert mode.
    pub fn record(&mut self, command: ChangeCommand, count: u32) {
        tracing::trace!(target: "actions.repeat", ?command, count, "record");
        self.pending = None;
        self.last = Some(LastChange {
            command,
            count,
            inserted_text: None,
        });
    }

    /// Park an Insert-producing change until the Insert session ends.
    pub fn begin_insert(&mut self, command: ChangeCommand, count: u32) {
        self.inserted.clear();
        self.pending = Some(LastChange {
            command,
            count,
            inserted_text: None,
        });
    }

    pub fn push_inserted(&mut self, text: &str) {
        self.inserted.push_str(text);
    }

    /// Backspace while typing: drop the last captured char, if any.
    pub fn pop_inserted(&mut self) {
        self.inserted.pop();
    }

    /// Cursor moved inside Insert mode: only text typed after the move replays.
    pub fn reset_inserted(&mut self) {
        self.inserted.clear();
    }

    pub fn inserted(&self) -> &str {
        &self.inserted
    }

    /// Commit the pending change with the captured text. No-op when the Insert
    /// session was not opened by a recordable command.
    pub fn finish_insert(&mut self) {
        if let Some(mut change) = self.pending.take() {
            change.inserted_text = Some(std::mem::take(&mut self.inserted));
            tracing::trace!(target: "actions.repeat", command = ?change.command, count = change.count, text = ?change.inserted_text, "record_insert");
            self.last = Some(change);
        }
        self.inserted.clear();
    }

    /// Pending Insert-producing change, if an Insert session is open.
    pub fn pending(&self) -> Option<&LastChange> {
        self.pending.as_ref()
    }

    pub fn last(&self) -> Option<&LastChange> {
        self.last.as_ref()
    }
}
