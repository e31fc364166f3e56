//! System clipboard bridge.
//!
//! Clipboard access can block (X11 selection owners, Wayland round trips), so
//! the provider lives on a dedicated worker thread and key handling never
//! waits on it. Writes to the `+` register are queued to the worker; reads
//! return the cached register value and queue a refresh whose result lands in
//! the register store for later pastes. Failures are logged and leave the
//! cached value unchanged.

use std::sync::{Arc, Mutex};
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use thiserror::Error;
use tracing::{debug, warn};

use crate::registers::{Register, RegisterName, Registers, SharedRegisters};

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard read failed: {0}")]
    Read(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
    #[error("failed to start clipboard worker")]
    Spawn(#[from] std::io::Error),
}

/// Text clipboard backend. Implementations run on the bridge worker thread only.
pub trait ClipboardProvider {
    fn get_text(&mut self) -> Result<String, ClipboardError>;
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Platform clipboard via `arboard`.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let inner = arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn get_text(&mut self) -> Result<String, ClipboardError> {
        self.inner
            .get_text()
            .map_err(|e| ClipboardError::Read(e.to_string()))
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_text(text.to_owned())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

enum ClipboardRequest {
    Store(String),
    Refresh,
    Sync(Sender<()>),
}

/// Handle to the clipboard worker. The worker exits once every handle is dropped.
#[derive(Clone)]
pub struct ClipboardBridge {
    tx: Sender<ClipboardRequest>,
}

impl ClipboardBridge {
    /// Start the worker. `factory` runs on the worker thread; when it fails the
    /// bridge keeps running and every request is a no-op.
    pub(crate) fn spawn<P, F>(factory: F, store: Arc<Mutex<Registers>>) -> Result<Self, ClipboardError>
    where
        P: ClipboardProvider + 'static,
        F: FnOnce() -> Result<P, ClipboardError> + Send + 'static,
    {
        let (tx, rx) = crossbeam_channel::unbounded();
        thread::Builder::new()
            .name("keymode-clipboard".to_string())
            .spawn(move || {
                let provider = match factory() {
                    Ok(provider) => Some(provider),
                    Err(err) => {
                        warn!(target: "state.clipboard", error = %err, "clipboard_provider_unavailable");
                        None
                    }
                };
                run_worker(provider, &rx, &store);
            })?;
        Ok(Self { tx })
    }

    pub fn store(&self, text: String) {
        self.send(ClipboardRequest::Store(text));
    }

    pub fn refresh(&self) {
        self.send(ClipboardRequest::Refresh);
    }

    /// Wait until every request queued before this call has been handled.
    pub fn sync(&self) -> bool {
        let (done_tx, done_rx) = crossbeam_channel::bounded(1);
        if self.tx.send(ClipboardRequest::Sync(done_tx)).is_err() {
            return false;
        }
        done_rx.recv().is_ok()
    }

    fn send(&self, req: ClipboardRequest) {
        if self.tx.send(req).is_err() {
            warn!(target: "state.clipboard", "clipboard_worker_gone");
        }
    }
}

fn run_worker<P: ClipboardProvider>(
    mut provider: Option<P>,
    rx: &Receiver<ClipboardRequest>,
    store: &Mutex<Registers>,
) {
    for req in rx.iter() {
        match req {
            ClipboardRequest::Store(text) => {
                let Some(p) = provider.as_mut() else { continue };
                match p.set_text(&text) {
                    Ok(()) => debug!(target: "state.clipboard", chars = text.chars().count(), "clipboard_stored"),
                    Err(err) => warn!(target: "state.clipboard", error = %err, "clipboard_store_failed"),
                }
            }
            ClipboardRequest::Refresh => {
                let Some(p) = provider.as_mut() else { continue };
                match p.get_text() {
                    Ok(text) => {
                        let linewise = text.ends_with('\n');
                        SharedRegisters::lock_store(store)
                            .set(RegisterName::Clipboard, Register::new(text, linewise));
                        debug!(target: "state.clipboard", linewise, "clipboard_refreshed");
                    }
                    Err(err) => warn!(target: "state.clipboard", error = %err, "clipboard_read_failed"),
                }
            }
            ClipboardRequest::Sync(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!(target: "state.clipboard", "clipboard_worker_stopped");
}
