//! Text object resolution (`iw`, `a(`, `i"`, ...).
//!
//! Quote objects are scoped to the cursor line and decided by parity: the
//! number of quote chars from the line start through the cursor tells whether
//! the cursor sits inside a pair. A cursor on a closing quote counts as inside
//! that pair. Bracket objects search backward for the innermost unbalanced
//! opener (the cursor may sit on either delimiter) and may span lines; a count
//! selects an outer enclosing pair.
//!
//! `inner` excludes the delimiters, `around` includes them. Misses return
//! `None`, which callers treat as a no-op.

use crate::{TextObject, TextObjectKind};
use core_text::class::{CharClass, char_class};
use core_text::motion::{find_close, find_open};
use core_text::{Buffer, TextRange, WordStyle};

pub fn resolve_text_object(buf: &Buffer, cursor: usize, object: TextObject, count: u32) -> Option<TextRange> {
    if cursor >= buf.len_chars() {
        return None;
    }
    let (open, close) = match object.kind {
        TextObjectKind::Quote(q) => quote_pair(buf, cursor, q)?,
        TextObjectKind::Bracket { open, close } => bracket_pair(buf, cursor, open, close, count)?,
        TextObjectKind::Word(style) => return word_object(buf, cursor, style, object.inner),
    };
    Some(if object.inner {
        TextRange::new(open + 1, close)
    } else {
        TextRange::new(open, close + 1)
    })
}

fn quote_pair(buf: &Buffer, cursor: usize, quote: char) -> Option<(usize, usize)> {
    let (start, end) = buf.line_bounds_at(cursor);
    if cursor >= end {
        return None;
    }
    let quotes: Vec<usize> = (start..end).filter(|&p| buf.char_at(p) == Some(quote)).collect();
    let through_cursor = quotes.iter().take_while(|&&p| p <= cursor).count();
    if through_cursor == 0 {
        return None;
    }
    let last = quotes[through_cursor - 1];
    if through_cursor % 2 == 1 {
        // Odd: `last` opens the pair around (or under) the cursor.
        let closer = *quotes.get(through_cursor)?;
        Some((last, closer))
    } else if last == cursor {
        // Even with the cursor on a quote: it closes the preceding opener.
        Some((quotes[through_cursor - 2], cursor))
    } else {
        None
    }
}

fn bracket_pair(buf: &Buffer, cursor: usize, open: char, close: char, count: u32) -> Option<(usize, usize)> {
    let mut opener = if buf.char_at(cursor) == Some(open) {
        cursor
    } else {
        find_open(buf, cursor, open, close)?
    };
    for _ in 1..count.max(1) {
        opener = find_open(buf, opener, open, close)?;
    }
    let closer = find_close(buf, opener + 1, open, close)?;
    Some((opener, closer))
}

/// `iw` selects the run under the cursor (word, punctuation, or blanks);
/// `aw` adds the trailing blanks, or the leading ones when none follow.
fn word_object(buf: &Buffer, cursor: usize, style: WordStyle, inner: bool) -> Option<TextRange> {
    let (line_start, line_end) = buf.line_bounds_at(cursor);
    if line_start == line_end {
        return None;
    }
    let cursor = cursor.min(line_end - 1);
    let class_at = |p: usize| buf.char_at(p).map(|c| char_class(c, style));
    let run = |from: usize, cls: CharClass| {
        let mut s = from;
        while s > line_start && class_at(s - 1) == Some(cls) {
            s -= 1;
        }
        let mut e = from;
        while e < line_end && class_at(e) == Some(cls) {
            e += 1;
        }
        (s, e)
    };
    let cls = class_at(cursor)?;
    let (start, end) = run(cursor, cls);
    if inner {
        return Some(TextRange::new(start, end));
    }
    if cls == CharClass::Whitespace {
        // Blanks plus the following word.
        if end < line_end {
            let next = class_at(end)?;
            let (_, word_end) = run(end, next);
            return Some(TextRange::new(start, word_end));
        }
        return Some(TextRange::new(start, end));
    }
    if end < line_end && class_at(end) == Some(CharClass::Whitespace) {
        let (_, blank_end) = run(end, CharClass::Whitespace);
        return Some(TextRange::new(start, blank_end));
    }
    if start > line_start && class_at(start - 1) == Some(CharClass::Whitespace) {
        let (blank_start, _) = run(start - 1, CharClass::Whitespace);
        return Some(TextRange::new(blank_start, end));
    }
    Some(TextRange::new(start, end))
}
