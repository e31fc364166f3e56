//! Register store shared by every session of an engine.
//!
//! Slots: the default register (`"`), named registers `a`-`z` (`A`-`Z` append
//! to the same slot), and the clipboard register (`+`, alias `*`). Every yank
//! or delete lands in the default register plus any explicitly selected slot.
//! Linewise content always ends with a newline.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};

use crate::clipboard::{ClipboardBridge, ClipboardError, ClipboardProvider};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Register {
    pub content: String,
    pub linewise: bool,
}

impl Register {
    pub fn new(content: impl Into<String>, linewise: bool) -> Self {
        let mut content = content.into();
        if linewise && !content.ends_with('\n') {
            content.push('\n');
        }
        Self { content, linewise }
    }

    pub fn charwise(content: impl Into<String>) -> Self {
        Self::new(content, false)
    }

    pub fn linewise(content: impl Into<String>) -> Self {
        Self::new(content, true)
    }

    /// Append `other`, becoming linewise if either side is.
    fn append(&mut self, other: Register) {
        if other.linewise && !self.linewise && !self.content.is_empty() && !self.content.ends_with('\n') {
            self.content.push('\n');
        }
        self.content.push_str(&other.content);
        self.linewise |= other.linewise;
        if self.linewise && !self.content.ends_with('\n') {
            self.content.push('\n');
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterName {
    /// `"`
    Unnamed,
    /// `a`-`z`; `append` is set for the uppercase spelling.
    Named { slot: char, append: bool },
    /// `+` or `*`
    Clipboard,
}

impl RegisterName {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '"' => Some(Self::Unnamed),
            '+' | '*' => Some(Self::Clipboard),
            'a'..='z' => Some(Self::Named {
                slot: c,
                append: false,
            }),
            'A'..='Z' => Some(Self::Named {
                slot: c.to_ascii_lowercase(),
                append: true,
            }),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Unnamed => '"',
            Self::Clipboard => '+',
            Self::Named { slot, append: false } => slot,
            Self::Named { slot, append: true } => slot.to_ascii_uppercase(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Registers {
    unnamed: Option<Register>,
    named: [Option<Register>; 26],
    clipboard: Option<Register>,
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    fn named_index(slot: char) -> usize {
        usize::from(slot as u8 - b'a')
    }

    pub fn get(&self, name: RegisterName) -> Option<&Register> {
        match name {
            RegisterName::Unnamed => self.unnamed.as_ref(),
            RegisterName::Named { slot, .. } => self.named[Self::named_index(slot)].as_ref(),
            RegisterName::Clipboard => self.clipboard.as_ref(),
        }
    }

    /// Store into a single slot, honoring uppercase append.
    pub fn set(&mut self, name: RegisterName, value: Register) {
        match name {
            RegisterName::Unnamed => self.unnamed = Some(value),
            RegisterName::Clipboard => self.clipboard = Some(value),
            RegisterName::Named { slot, append } => {
                let entry = &mut self.named[Self::named_index(slot)];
                match entry {
                    Some(existing) if append => existing.append(value),
                    _ => *entry = Some(value),
                }
            }
        }
    }

    /// Record the payload of a yank or delete: the default register always
    /// receives it; `target` (when given) receives it too. Returns the value
    /// written to the clipboard slot, if any.
    pub fn record(&mut self, target: Option<RegisterName>, value: Register) -> Option<Register> {
        let mut clipboard_write = None;
        if let Some(name) = target.filter(|n| *n != RegisterName::Unnamed) {
            self.set(name, value.clone());
            if name == RegisterName::Clipboard {
                clipboard_write = Some(value.clone());
            }
            if let RegisterName::Named { append: true, .. } = name {
                // The default register mirrors the full appended content.
                let merged = self.get(name).cloned().unwrap_or_else(|| value.clone());
                self.unnamed = Some(merged);
                return clipboard_write;
            }
        }
        self.unnamed = Some(value);
        clipboard_write
    }
}

/// Cheap-to-clone handle to an engine's register store and clipboard bridge.
#[derive(Clone, Default)]
pub struct SharedRegisters {
    inner: Arc<Mutex<Registers>>,
    bridge: Option<ClipboardBridge>,
    /// Mirror default-register writes to the clipboard as well.
    unnamedplus: bool,
}

impl std::fmt::Debug for SharedRegisters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRegisters")
            .field("clipboard", &self.bridge.is_some())
            .field("unnamedplus", &self.unnamedplus)
            .finish()
    }
}

impl SharedRegisters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a clipboard provider built on the bridge worker thread by `factory`.
    pub fn with_clipboard<P, F>(factory: F, unnamedplus: bool) -> Result<Self, ClipboardError>
    where
        P: ClipboardProvider + 'static,
        F: FnOnce() -> Result<P, ClipboardError> + Send + 'static,
    {
        let inner = Arc::new(Mutex::new(Registers::new()));
        let bridge = ClipboardBridge::spawn(factory, Arc::clone(&inner))?;
        Ok(Self {
            inner,
            bridge: Some(bridge),
            unnamedplus,
        })
    }

    pub(crate) fn lock_store(store: &Mutex<Registers>) -> MutexGuard<'_, Registers> {
        store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, Registers> {
        Self::lock_store(&self.inner)
    }

    pub fn has_clipboard(&self) -> bool {
        self.bridge.is_some()
    }

    /// Record a yank payload.
    pub fn write_yank(&self, text: impl Into<String>, linewise: bool, target: Option<RegisterName>) {
        let value = Register::new(text, linewise);
        trace!(target: "state.registers", kind = "yank", chars = value.content.chars().count(), linewise, register = ?target.map(RegisterName::as_char), "register_write");
        self.record(target, value);
    }

    /// Record a delete or change payload.
    pub fn write_delete(&self, text: impl Into<String>, linewise: bool, target: Option<RegisterName>) {
        let value = Register::new(text, linewise);
        trace!(target: "state.registers", kind = "delete", chars = value.content.chars().count(), linewise, register = ?target.map(RegisterName::as_char), "register_write");
        self.record(target, value);
    }

    fn record(&self, target: Option<RegisterName>, value: Register) {
        let mirror_default = self.unnamedplus && target.is_none();
        let mirrored = {
            let mut store = self.lock();
            let written = store.record(target, value.clone());
            if mirror_default {
                store.set(RegisterName::Clipboard, value.clone());
                Some(value)
            } else {
                written
            }
        };
        if let Some(value) = mirrored {
            self.push_to_clipboard(value.content);
        }
    }

    /// Value to paste from `name` (the default register when `None`). Reading
    /// the clipboard register returns the cached value and asks the bridge to
    /// refresh it for subsequent reads.
    pub fn read(&self, name: Option<RegisterName>) -> Option<Register> {
        let name = match name {
            Some(name) => name,
            None if self.unnamedplus && self.bridge.is_some() => RegisterName::Clipboard,
            None => RegisterName::Unnamed,
        };
        if name == RegisterName::Clipboard
            && let Some(bridge) = &self.bridge
        {
            bridge.refresh();
        }
        let value = self.lock().get(name).cloned();
        match (value, name) {
            // Clipboard not populated yet; fall back to what we last yanked.
            (None, RegisterName::Clipboard) if self.unnamedplus => {
                self.lock().get(RegisterName::Unnamed).cloned()
            }
            (value, _) => value,
        }
    }

    /// Host-side read; no clipboard refresh is triggered.
    pub fn get(&self, name: RegisterName) -> Option<Register> {
        self.lock().get(name).cloned()
    }

    /// Host-side write into a single slot.
    pub fn set(&self, name: RegisterName, value: Register) {
        debug!(target: "state.registers", register = %name.as_char(), linewise = value.linewise, "register_set");
        let to_clipboard = (name == RegisterName::Clipboard).then(|| value.content.clone());
        self.lock().set(name, value);
        if let Some(text) = to_clipboard {
            self.push_to_clipboard(text);
        }
    }

    fn push_to_clipboard(&self, text: String) {
        if let Some(bridge) = &self.bridge {
            bridge.store(text);
        }
    }

    /// Block until the clipboard worker has drained its queue. Returns false when
    /// there is no clipboard or the worker has stopped.
    pub fn sync_clipboard(&self) -> bool {
        self.bridge.as_ref().is_some_and(ClipboardBridge::sync)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn named(c: char) -> RegisterName {
        RegisterName::from_char(c).unwrap()
    }

    #[test]
    fn parses_register_names() {
        assert_eq!(RegisterName::from_char('"'), Some(RegisterName::Unnamed));
        assert_eq!(RegisterName::from_char('*'), Some(RegisterName::Clipboard));
        assert_eq!(
            RegisterName::from_char('Q'),
            Some(RegisterName::Named {
                slot: 'q',
                append: true
            })
        );
        assert_eq!(RegisterName::from_char('1'), None);
        assert_eq!(named('Q').as_char(), 'Q');
    }

    #[test]
    fn linewise_content_gets_trailing_newline() {
        assert_eq!(Register::linewise("abc").content, "abc\n");
        assert_eq!(Register::linewise("abc\n").content, "abc\n");
        assert_eq!(Register::charwise("abc").content, "abc");
    }

    #[test]
    fn default_register_always_written() {
        let regs = SharedRegisters::new();
        regs.write_yank("one", false, Some(named('a')));
        regs.write_delete("two", false, None);
        assert_eq!(regs.get(named('a')).unwrap().content, "one");
        assert_eq!(regs.get(RegisterName::Unnamed).unwrap().content, "two");
    }

    #[test]
    fn uppercase_appends_to_named_slot() {
        let regs = SharedRegisters::new();
        regs.write_yank("foo", false, Some(named('a')));
        regs.write_yank("bar", false, Some(named('A')));
        assert_eq!(regs.get(named('a')).unwrap().content, "foobar");
        assert_eq!(regs.get(RegisterName::Unnamed).unwrap().content, "foobar");
    }

    #[test]
    fn appending_linewise_to_charwise_separates_lines() {
        let regs = SharedRegisters::new();
        regs.write_yank("foo", false, Some(named('a')));
        regs.write_yank("bar", true, Some(named('A')));
        let value = regs.get(named('a')).unwrap();
        assert_eq!(value, Register::linewise("foo\nbar\n"));
    }

    #[test]
    fn append_to_empty_slot_sets_it() {
        let regs = SharedRegisters::new();
        regs.write_yank("x", false, Some(named('B')));
        assert_eq!(regs.get(named('b')).unwrap().content, "x");
    }

    #[test]
    fn clipboard_slot_without_bridge_acts_as_plain_register() {
        let regs = SharedRegisters::new();
        regs.write_yank("clip", false, Some(RegisterName::Clipboard));
        assert_eq!(regs.read(Some(RegisterName::Clipboard)).unwrap().content, "clip");
        assert!(!regs.sync_clipboard());
    }

    #[test]
    fn unset_register_reads_none() {
        let regs = SharedRegisters::new();
        assert_eq!(regs.read(None), None);
        assert_eq!(regs.read(Some(named('z'))), None);
    }
}
