#![allow(dead_code)] // Each test binary uses a subset of helpers.

use std::sync::{Arc, Mutex};

use core_config::Config;
use core_events::parse_keys;
use core_model::{Engine, SessionHandle, Snapshot};
use core_state::{ClipboardError, ClipboardProvider, SharedRegisters};

/// Engine with default config and no system clipboard.
pub fn engine() -> Engine {
    Engine::with_registers(&Config::default(), SharedRegisters::new())
}

/// Feed a key script; returns how many keys were reported handled.
pub fn type_keys(engine: &mut Engine, handle: SessionHandle, script: &str) -> usize {
    parse_keys(script)
        .expect("valid key script")
        .iter()
        .filter(|key| engine.submit_event(handle, key))
        .count()
}

pub fn snapshot(engine: &Engine, handle: SessionHandle) -> Snapshot {
    engine.snapshot(handle).expect("live session")
}

/// In-memory clipboard whose contents the test can read and replace.
pub struct FakeClipboard {
    pub contents: Arc<Mutex<String>>,
}

impl ClipboardProvider for FakeClipboard {
    fn get_text(&mut self) -> Result<String, ClipboardError> {
        Ok(self.contents.lock().unwrap().clone())
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        *self.contents.lock().unwrap() = text.to_string();
        Ok(())
    }
}

/// Engine bridged to a `FakeClipboard` holding `initial`.
pub fn engine_with_clipboard(initial: &str, unnamedplus: bool) -> (Engine, Arc<Mutex<String>>) {
    let contents = Arc::new(Mutex::new(initial.to_string()));
    let shared = Arc::clone(&contents);
    let registers =
        SharedRegisters::with_clipboard(move || Ok(FakeClipboard { contents: shared }), unnamedplus)
            .expect("clipboard worker");
    (Engine::with_registers(&Config::default(), registers), contents)
}
