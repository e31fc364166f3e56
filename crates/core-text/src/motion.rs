//! Cursor motion primitives over a flat char-offset buffer.
//!
//! These operate purely on a `Buffer` + offset pair and are free of editor
//! state (counts, wanted column, mode clamping live in `core-actions`).
//! Forward motions may return `len_chars()` (one past the last char) so that
//! operators can reach the end of the buffer; Normal-mode callers clamp.

use crate::Buffer;
use crate::class::{CharClass, MATCH_PAIRS, PairSide, WordStyle, char_class, is_blank, pair_of};

fn class_at(buf: &Buffer, idx: usize, style: WordStyle) -> CharClass {
    buf.char_at(idx)
        .map(|c| char_class(c, style))
        .unwrap_or(CharClass::Whitespace)
}

fn is_space_at(buf: &Buffer, idx: usize) -> bool {
    buf.char_at(idx).is_some_and(char::is_whitespace)
}

/// First non-blank char of `line`, or its content end when the line is blank.
pub fn first_non_blank(buf: &Buffer, line: usize) -> usize {
    let start = buf.line_start(line);
    let end = buf.line_content_end(line);
    (start..end)
        .find(|&p| buf.char_at(p).is_some_and(|c| !is_blank(c)))
        .unwrap_or(end)
}

/// Start of the next word. Empty lines count as words.
pub fn word_forward(buf: &Buffer, pos: usize, style: WordStyle) -> usize {
    let len = buf.len_chars();
    if pos >= len {
        return len;
    }
    let mut p = pos;
    let start_class = class_at(buf, p, style);
    if start_class != CharClass::Whitespace {
        while p < len && class_at(buf, p, style) == start_class {
            p += 1;
        }
    }
    while p < len {
        match buf.char_at(p) {
            Some('\n') if buf.char_at(p + 1) == Some('\n') => return p + 1,
            Some(c) if c.is_whitespace() => p += 1,
            _ => break,
        }
    }
    p
}

/// Start of the current or previous word. Empty lines count as words.
pub fn word_backward(buf: &Buffer, pos: usize, style: WordStyle) -> usize {
    if pos == 0 {
        return 0;
    }
    let mut p = pos.min(buf.len_chars()) - 1;
    while is_space_at(buf, p) {
        if buf.char_at(p) == Some('\n') && (p == 0 || buf.char_at(p - 1) == Some('\n')) {
            return p;
        }
        if p == 0 {
            return 0;
        }
        p -= 1;
    }
    let cls = class_at(buf, p, style);
    while p > 0 && class_at(buf, p - 1, style) == cls {
        p -= 1;
    }
    p
}

/// Last char of the current or next word.
pub fn word_end(buf: &Buffer, pos: usize, style: WordStyle) -> usize {
    let len = buf.len_chars();
    if len == 0 {
        return 0;
    }
    let mut p = pos + 1;
    while p < len && is_space_at(buf, p) {
        p += 1;
    }
    if p >= len {
        return len - 1;
    }
    let cls = class_at(buf, p, style);
    while p + 1 < len && class_at(buf, p + 1, style) == cls {
        p += 1;
    }
    p
}

/// Last char of the previous word (`ge`).
pub fn word_end_backward(buf: &Buffer, pos: usize, style: WordStyle) -> usize {
    let len = buf.len_chars();
    if pos == 0 || len == 0 {
        return 0;
    }
    let mut p = pos.min(len - 1);
    let cls = class_at(buf, p, style);
    if cls != CharClass::Whitespace {
        while p > 0 && class_at(buf, p - 1, style) == cls {
            p -= 1;
        }
    }
    if p == 0 {
        return 0;
    }
    p -= 1;
    while p > 0 && is_space_at(buf, p) {
        p -= 1;
    }
    p
}

/// Start of the next empty line after the current paragraph, or the buffer end.
pub fn paragraph_forward(buf: &Buffer, pos: usize) -> usize {
    let last = buf.last_line();
    let mut line = buf.line_of(pos);
    while line <= last && buf.is_line_empty(line) {
        line += 1;
    }
    while line <= last && !buf.is_line_empty(line) {
        line += 1;
    }
    if line > last {
        buf.len_chars()
    } else {
        buf.line_start(line)
    }
}

/// Start of the previous empty line before the current paragraph, or 0.
pub fn paragraph_backward(buf: &Buffer, pos: usize) -> usize {
    let mut line = buf.line_of(pos);
    while buf.is_line_empty(line) {
        if line == 0 {
            return 0;
        }
        line -= 1;
    }
    while !buf.is_line_empty(line) {
        if line == 0 {
            return 0;
        }
        line -= 1;
    }
    buf.line_start(line)
}

/// Scan forward from `from` for the `close` that balances an already-open `open`.
pub fn find_close(buf: &Buffer, from: usize, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    for p in from..buf.len_chars() {
        match buf.char_at(p) {
            Some(c) if c == close => {
                if depth == 0 {
                    return Some(p);
                }
                depth -= 1;
            }
            Some(c) if c == open => depth += 1,
            _ => {}
        }
    }
    None
}

/// Scan backward over `[0, before)` for the unbalanced `open` enclosing `before`.
pub fn find_open(buf: &Buffer, before: usize, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    for p in (0..before.min(buf.len_chars())).rev() {
        match buf.char_at(p) {
            Some(c) if c == open => {
                if depth == 0 {
                    return Some(p);
                }
                depth -= 1;
            }
            Some(c) if c == close => depth += 1,
            _ => {}
        }
    }
    None
}

/// Partner of the bracket under the cursor (`%`). `None` when the char is not a bracket
/// or is unbalanced.
pub fn match_pair(buf: &Buffer, pos: usize) -> Option<usize> {
    let c = buf.char_at(pos)?;
    let (open, close, side) = pair_of(c, &MATCH_PAIRS)?;
    match side {
        PairSide::Open => find_close(buf, pos + 1, open, close),
        PairSide::Close => find_open(buf, pos, open, close),
    }
}

/// Parameters of a single-line character search (`f`/`F`/`t`/`T`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindSpec {
    pub ch: char,
    pub forward: bool,
    /// `t`/`T`: stop one char short of the match.
    pub till: bool,
}

impl FindSpec {
    pub fn reversed(self) -> Self {
        Self {
            forward: !self.forward,
            ..self
        }
    }
}

/// Locate the `count`-th occurrence of `spec.ch` on the current line.
///
/// `repeat` marks a `;`/`,` invocation: a till search then skips a match adjacent
/// to the cursor so repeating does not get stuck.
pub fn find_in_line(
    buf: &Buffer,
    pos: usize,
    spec: FindSpec,
    count: usize,
    repeat: bool,
) -> Option<usize> {
    let (start, end) = buf.line_bounds_at(pos);
    let count = count.max(1);
    let skip = usize::from(spec.till && repeat);
    let hit = if spec.forward {
        (pos + 1 + skip..end)
            .filter(|&p| buf.char_at(p) == Some(spec.ch))
            .nth(count - 1)?
    } else {
        (start..pos.saturating_sub(skip))
            .rev()
            .filter(|&p| buf.char_at(p) == Some(spec.ch))
            .nth(count - 1)?
    };
    Some(match (spec.till, spec.forward) {
        (false, _) => hit,
        (true, true) => hit - 1,
        (true, false) => hit + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn buf(s: &str) -> Buffer {
        Buffer::new(s)
    }

    #[test]
    fn word_forward_stops_on_punctuation() {
        let b = buf("foo(bar) baz");
        assert_eq!(word_forward(&b, 0, WordStyle::Word), 3);
        assert_eq!(word_forward(&b, 3, WordStyle::Word), 4);
        assert_eq!(word_forward(&b, 4, WordStyle::Word), 7);
        assert_eq!(word_forward(&b, 7, WordStyle::Word), 9);
        assert_eq!(word_forward(&b, 0, WordStyle::BigWord), 9);
    }

    #[test]
    fn word_forward_reaches_buffer_end() {
        let b = buf("one two");
        assert_eq!(word_forward(&b, 4, WordStyle::Word), 7);
    }

    #[test]
    fn word_forward_stops_on_empty_line() {
        let b = buf("ab\n\ncd");
        assert_eq!(word_forward(&b, 0, WordStyle::Word), 3);
        assert_eq!(word_forward(&b, 3, WordStyle::Word), 4);
    }

    #[test]
    fn word_backward_runs() {
        let b = buf("foo.bar baz");
        assert_eq!(word_backward(&b, 8, WordStyle::Word), 4);
        assert_eq!(word_backward(&b, 4, WordStyle::Word), 3);
        assert_eq!(word_backward(&b, 8, WordStyle::BigWord), 0);
        assert_eq!(word_backward(&b, 0, WordStyle::Word), 0);
    }

    #[test]
    fn word_backward_stops_on_empty_line() {
        let b = buf("ab\n\ncd");
        assert_eq!(word_backward(&b, 4, WordStyle::Word), 3);
        assert_eq!(word_backward(&b, 3, WordStyle::Word), 0);
    }

    #[test]
    fn word_end_and_back() {
        let b = buf("one two-three");
        assert_eq!(word_end(&b, 0, WordStyle::Word), 2);
        assert_eq!(word_end(&b, 2, WordStyle::Word), 6);
        assert_eq!(word_end(&b, 6, WordStyle::Word), 7);
        assert_eq!(word_end(&b, 2, WordStyle::BigWord), 12);
        assert_eq!(word_end_backward(&b, 5, WordStyle::Word), 2);
        assert_eq!(word_end_backward(&b, 9, WordStyle::Word), 7);
        assert_eq!(word_end_backward(&b, 1, WordStyle::Word), 0);
    }

    #[test]
    fn paragraphs() {
        let b = buf("a\nb\n\nc\n\nd");
        assert_eq!(paragraph_forward(&b, 0), 4);
        assert_eq!(paragraph_forward(&b, 4), 7);
        assert_eq!(paragraph_forward(&b, 8), b.len_chars());
        assert_eq!(paragraph_backward(&b, 8), 7);
        assert_eq!(paragraph_backward(&b, 7), 4);
        assert_eq!(paragraph_backward(&b, 2), 0);
    }

    #[test]
    fn match_pair_nested() {
        let b = buf("f(a[b](c))");
        assert_eq!(match_pair(&b, 1), Some(9));
        assert_eq!(match_pair(&b, 9), Some(1));
        assert_eq!(match_pair(&b, 3), Some(5));
        assert_eq!(match_pair(&b, 0), None);
        assert_eq!(match_pair(&buf("(("), 0), None);
    }

    #[test]
    fn find_and_till() {
        let b = buf("a,b,c\nx,y");
        let f = FindSpec {
            ch: ',',
            forward: true,
            till: false,
        };
        assert_eq!(find_in_line(&b, 0, f, 1, false), Some(1));
        assert_eq!(find_in_line(&b, 0, f, 2, false), Some(3));
        assert_eq!(find_in_line(&b, 0, f, 3, false), None);
        let t = FindSpec { till: true, ..f };
        assert_eq!(find_in_line(&b, 0, t, 2, false), Some(2));
        let back = FindSpec {
            ch: 'a',
            forward: false,
            till: true,
        };
        assert_eq!(find_in_line(&b, 4, back, 1, false), Some(1));
        assert_eq!(find_in_line(&b, 7, back, 1, false), None);
    }

    #[test]
    fn till_repeat_skips_adjacent_match() {
        let b = buf("a,b,c");
        let t = FindSpec {
            ch: ',',
            forward: true,
            till: true,
        };
        assert_eq!(find_in_line(&b, 0, t, 1, false), Some(0));
        assert_eq!(find_in_line(&b, 0, t, 1, true), Some(2));
    }

    #[test]
    fn first_non_blank_skips_indent() {
        let b = buf("  x\n   ");
        assert_eq!(first_non_blank(&b, 0), 2);
        assert_eq!(first_non_blank(&b, 1), 7);
    }
}
