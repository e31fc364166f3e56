#![allow(dead_code)] // Shared across many integration tests; each test binary uses a subset of helpers.

use core_actions::{DispatchResult, KeyTranslator, RepeatTracker, Translation, dispatch};
use core_events::parse_keys;
use core_state::{EditorState, Mode, Register, RegisterName, SharedRegisters, UNDO_HISTORY_MAX};
use core_text::Buffer;

/// One editing session driven by key scripts, wired like the engine wires it.
pub struct Harness {
    pub state: EditorState,
    pub translator: KeyTranslator,
    pub repeat: RepeatTracker,
    pub registers: SharedRegisters,
    pub last: DispatchResult,
    /// Keys reported as unhandled so far.
    pub unhandled: usize,
}

impl Harness {
    pub fn new(text: &str, cursor: usize) -> Self {
        Self::with_options(text, cursor, SharedRegisters::new(), UNDO_HISTORY_MAX)
    }

    pub fn with_options(text: &str, cursor: usize, registers: SharedRegisters, undo_levels: usize) -> Self {
        let mut state = EditorState::new(Buffer::new(text), Mode::Normal, undo_levels);
        state.cursor = cursor;
        state.clamp_cursor();
        Self {
            state,
            translator: KeyTranslator::new(),
            repeat: RepeatTracker::new(),
            registers,
            last: DispatchResult::clean(),
            unhandled: 0,
        }
    }

    /// Feed a key script (`"d2w"`, `"ifoo<Esc>"`).
    pub fn keys(&mut self, script: &str) -> &mut Self {
        for key in parse_keys(script).expect("valid key script") {
            match self.translator.translate(self.state.mode(), &key) {
                Translation::Action(action) => {
                    self.last = dispatch(action, &mut self.state, &self.registers, &mut self.repeat);
                }
                Translation::Consumed => {}
                Translation::Unhandled => self.unhandled += 1,
            }
        }
        self
    }

    pub fn text(&self) -> String {
        self.state.buffer().text()
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn unnamed(&self) -> Option<Register> {
        self.registers.get(RegisterName::Unnamed)
    }

    pub fn register(&self, name: char) -> Option<Register> {
        self.registers.get(RegisterName::from_char(name).expect("register name"))
    }

    pub fn set_register(&self, name: char, content: &str, linewise: bool) {
        self.registers.set(
            RegisterName::from_char(name).expect("register name"),
            Register::new(content, linewise),
        );
    }
}

/// Run `keys` against `initial` with the cursor at `cursor`.
pub fn run_scenario(initial: &str, cursor: usize, keys: &str) -> Harness {
    let mut h = Harness::new(initial, cursor);
    h.keys(keys);
    h
}

/// Assert the final text and cursor of a scenario.
pub fn assert_scenario(initial: &str, cursor: usize, keys: &str, text: &str, final_cursor: usize) {
    let h = run_scenario(initial, cursor, keys);
    assert_eq!(h.text(), text, "text after {keys:?} on {initial:?}");
    assert_eq!(h.cursor(), final_cursor, "cursor after {keys:?} on {initial:?}");
}
