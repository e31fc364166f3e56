//! Rope-based flat text buffer addressed by a single char offset.
//!
//! Every offset in this crate counts Unicode scalar values from the start of
//! the buffer. Lines are split on `\n` only (ropey is built without its
//! unicode/CR line features), so `line_content_end` always lands on either a
//! `\n` or the end of the buffer.

use ropey::Rope;
use std::fmt;
use std::ops::Range;

pub mod class;
pub mod motion;

pub use class::{CharClass, WordStyle};

/// A text buffer backed by a `ropey::Rope`.
#[derive(Clone, Default)]
pub struct Buffer {
    rope: Rope,
}

/// Half-open char range `[start, end)`, always normalized so `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    /// Construct a range from two endpoints in any order.
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Clamp both endpoints to `[0, max]`.
    pub fn clamp_to(self, max: usize) -> Self {
        Self {
            start: self.start.min(max),
            end: self.end.min(max),
        }
    }
}

impl Buffer {
    pub fn new(content: &str) -> Self {
        Self {
            rope: Rope::from_str(content),
        }
    }

    /// Total number of chars.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn char_at(&self, idx: usize) -> Option<char> {
        self.rope.get_char(idx)
    }

    /// Total number of lines. An empty buffer (and a buffer ending in `\n`)
    /// still counts its trailing empty line.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line index containing `idx` (offsets past the end map to the last line).
    pub fn line_of(&self, idx: usize) -> usize {
        self.rope.char_to_line(idx.min(self.len_chars()))
    }

    /// Offset of the first char of `line` (clamped to the last line).
    pub fn line_start(&self, line: usize) -> usize {
        let line = line.min(self.last_line());
        self.rope.line_to_char(line)
    }

    /// Offset one past the last content char of `line`: the position of its
    /// `\n`, or the buffer length on the final line.
    pub fn line_content_end(&self, line: usize) -> usize {
        let line = line.min(self.last_line());
        if line + 1 < self.line_count() {
            self.rope.line_to_char(line + 1) - 1
        } else {
            self.len_chars()
        }
    }

    /// Number of content chars on `line` (newline excluded).
    pub fn line_len(&self, line: usize) -> usize {
        self.line_content_end(line) - self.line_start(line)
    }

    /// `(line_start, line_content_end)` for the line containing `idx`.
    pub fn line_bounds_at(&self, idx: usize) -> (usize, usize) {
        let line = self.line_of(idx);
        (self.line_start(line), self.line_content_end(line))
    }

    pub fn last_line(&self) -> usize {
        self.line_count().saturating_sub(1)
    }

    /// Column of `idx` within its line.
    pub fn column_of(&self, idx: usize) -> usize {
        let idx = idx.min(self.len_chars());
        idx - self.line_start(self.line_of(idx))
    }

    /// True when `line` has no content chars.
    pub fn is_line_empty(&self, line: usize) -> bool {
        self.line_len(line) == 0
    }

    /// Copy out `[range.start, range.end)`, clamped to the buffer.
    pub fn slice(&self, range: TextRange) -> String {
        let r = range.clamp_to(self.len_chars());
        self.rope.slice(r.as_range()).to_string()
    }

    /// Insert `text` at `idx` (clamped to the buffer length).
    pub fn insert(&mut self, idx: usize, text: &str) {
        let idx = idx.min(self.len_chars());
        self.rope.insert(idx, text);
    }

    pub fn insert_char(&mut self, idx: usize, ch: char) {
        let idx = idx.min(self.len_chars());
        self.rope.insert_char(idx, ch);
    }

    /// Remove `range` (clamped) and return the removed text.
    pub fn remove(&mut self, range: TextRange) -> String {
        let r = range.clamp_to(self.len_chars());
        if r.is_empty() {
            return String::new();
        }
        let removed = self.rope.slice(r.as_range()).to_string();
        self.rope.remove(r.as_range());
        removed
    }

    /// Full buffer contents.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}

impl From<&str> for Buffer {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("chars", &self.len_chars())
            .field("lines", &self.line_count())
            .finish()
    }
}
