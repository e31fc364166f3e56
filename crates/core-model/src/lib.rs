//! Host-facing engine: a registry of independent editing sessions sharing one
//! register store.
//!
//! Each `Session` owns its buffer, cursor, mode, undo history, key translator
//! and dot-repeat record; nothing in one session is visible to another. The
//! host refers to sessions through opaque `SessionHandle`s and keeps its own
//! mapping from widgets to handles.
//!
//! Registers (including the optional system clipboard bridge) are engine-wide:
//! a yank in one session can be pasted in another.

use std::collections::HashMap;

use core_actions::{KeyTranslator, RepeatTracker, Translation, dispatch};
use core_config::Config;
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_state::{
    EditorState, Mode, Register, RegisterName, SharedRegisters, SystemClipboard, VisualSelection,
};
use core_text::Buffer;
use serde::Serialize;
use tracing::{debug, trace, warn};

/// Opaque identifier of one session inside an `Engine`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SessionHandle(u64);

impl SessionHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Everything the host needs to sync its widget after a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub text: String,
    pub cursor: usize,
    pub mode: Mode,
    pub visual_selection: Option<VisualSelection>,
    /// Bumped on every text mutation; equal revisions mean equal text.
    pub revision: u64,
}

#[derive(Debug)]
struct Session {
    state: EditorState,
    translator: KeyTranslator,
    repeat: RepeatTracker,
}

impl Session {
    fn new(text: &str, mode: Mode, cursor: usize, undo_levels: usize) -> Self {
        let mut state = EditorState::new(Buffer::new(text), Mode::Normal, undo_levels);
        state.cursor = cursor;
        state.clamp_cursor();
        // Entered after placing the cursor so a Visual anchor starts there.
        state.set_mode(mode);
        Self {
            state,
            translator: KeyTranslator::new(),
            repeat: RepeatTracker::new(),
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, registers: &SharedRegisters) -> bool {
        match self.translator.translate(self.state.mode(), key) {
            Translation::Action(action) => {
                let result = dispatch(action, &mut self.state, registers, &mut self.repeat);
                trace!(target: "model.engine", key = %key, dirty = result.dirty, text_changed = result.text_changed, "key_dispatched");
                true
            }
            Translation::Consumed => true,
            Translation::Unhandled => {
                trace!(target: "model.engine", key = %key, mode = ?self.state.mode(), "key_unhandled");
                false
            }
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            text: self.state.buffer().text(),
            cursor: self.state.cursor,
            mode: self.state.mode(),
            visual_selection: self.state.selection.active,
            revision: self.state.revision(),
        }
    }
}

pub struct Engine {
    sessions: HashMap<SessionHandle, Session>,
    next_id: u64,
    registers: SharedRegisters,
    undo_levels: usize,
}

impl Engine {
    /// Build an engine from `config`, starting the system clipboard bridge when
    /// it is enabled. A bridge that cannot start leaves `+` as a plain register.
    pub fn new(config: &Config) -> Self {
        let registers = if config.clipboard_enabled() {
            match SharedRegisters::with_clipboard(SystemClipboard::new, config.unnamedplus()) {
                Ok(registers) => registers,
                Err(err) => {
                    warn!(target: "model.engine", error = %err, "clipboard_bridge_unavailable");
                    SharedRegisters::new()
                }
            }
        } else {
            SharedRegisters::new()
        };
        Self::with_registers(config, registers)
    }

    /// Engine over a caller-provided register store (custom clipboard providers).
    pub fn with_registers(config: &Config, registers: SharedRegisters) -> Self {
        Self {
            sessions: HashMap::new(),
            next_id: 1,
            registers,
            undo_levels: config.undo_levels(),
        }
    }

    pub fn initialize_session(&mut self, text: &str, mode: Mode) -> SessionHandle {
        self.initialize_session_at(text, mode, 0)
    }

    /// Like `initialize_session` with the cursor starting at `cursor` (clamped).
    pub fn initialize_session_at(&mut self, text: &str, mode: Mode, cursor: usize) -> SessionHandle {
        let handle = SessionHandle(self.next_id);
        self.next_id += 1;
        let session = Session::new(text, mode, cursor, self.undo_levels);
        debug!(target: "model.engine", session = handle.0, ?mode, chars = text.chars().count(), cursor = session.state.cursor, "session_created");
        self.sessions.insert(handle, session);
        handle
    }

    /// Destroy a session. Returns false for an unknown handle.
    pub fn close_session(&mut self, handle: SessionHandle) -> bool {
        let closed = self.sessions.remove(&handle).is_some();
        debug!(target: "model.engine", session = handle.0, closed, "session_closed");
        closed
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Feed one key. Returns whether the key meant something in the current
    /// mode and pending state; unknown handles report false.
    pub fn submit_key(&mut self, handle: SessionHandle, code: KeyCode, mods: KeyModifiers) -> bool {
        let Some(session) = self.sessions.get_mut(&handle) else {
            warn!(target: "model.engine", session = handle.0, "unknown_session");
            return false;
        };
        session.handle_key(&KeyEvent::new(code, mods), &self.registers)
    }

    pub fn submit_event(&mut self, handle: SessionHandle, key: &KeyEvent) -> bool {
        self.submit_key(handle, key.code, key.mods)
    }

    pub fn snapshot(&self, handle: SessionHandle) -> Option<Snapshot> {
        let snapshot = self.sessions.get(&handle).map(Session::snapshot);
        if snapshot.is_none() {
            warn!(target: "model.engine", session = handle.0, "unknown_session");
        }
        snapshot
    }

    /// Replace a session's text after an edit made outside the engine. Pending
    /// keys are dropped; undo history is kept.
    pub fn sync_text(&mut self, handle: SessionHandle, text: &str, cursor: usize) -> bool {
        let Some(session) = self.sessions.get_mut(&handle) else {
            warn!(target: "model.engine", session = handle.0, "unknown_session");
            return false;
        };
        session.translator.reset();
        session.repeat.reset_inserted();
        session.state.replace_text(text, cursor);
        debug!(target: "model.engine", session = handle.0, chars = text.chars().count(), cursor = session.state.cursor, "text_synced");
        true
    }

    /// Register contents by name (`"`, `a`-`z`, `A`-`Z`, `+`, `*`).
    pub fn get_register(&self, name: char) -> Option<Register> {
        self.registers.get(RegisterName::from_char(name)?)
    }

    /// Overwrite a register. Returns false for an invalid name. Writing `+`
    /// also queues a system clipboard write.
    pub fn set_register(&self, name: char, content: &str, linewise: bool) -> bool {
        let Some(name) = RegisterName::from_char(name) else {
            warn!(target: "model.engine", register = %name, "invalid_register");
            return false;
        };
        self.registers.set(name, Register::new(content, linewise));
        true
    }

    pub fn registers(&self) -> &SharedRegisters {
        &self.registers
    }
}
