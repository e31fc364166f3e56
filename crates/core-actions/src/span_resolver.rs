//! Operator span resolver.
//!
//! Turns a resolved motion (or a doubled-operator line count) into the range
//! an operator acts on:
//! * Charwise motions cover `[min, max)` between cursor and target, extended by
//!   one char when the motion is inclusive (`e`, `$`, `f`, `%`, ...).
//! * Linewise motions (`j`, `k`, `gg`, `G`) and doubled operators cover whole
//!   lines. The span itself excludes the final line break; deletion widens it
//!   with `linewise_delete_range` so the lines disappear.

use crate::motion_resolver::ResolvedMotion;
use core_text::{Buffer, TextRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorSpan {
    pub range: TextRange,
    pub linewise: bool,
}

impl OperatorSpan {
    pub fn charwise(range: TextRange) -> Self {
        Self {
            range,
            linewise: false,
        }
    }
}

pub fn motion_span(buf: &Buffer, cursor: usize, resolved: &ResolvedMotion) -> OperatorSpan {
    if resolved.linewise {
        return line_span(buf, buf.line_of(cursor), buf.line_of(resolved.target));
    }
    let lo = cursor.min(resolved.target);
    let hi = cursor.max(resolved.target);
    let end = if resolved.inclusive { hi + 1 } else { hi };
    OperatorSpan::charwise(TextRange::new(lo, end.min(buf.len_chars())))
}

/// Lines `a..=b` (either order) without the final line break.
pub fn line_span(buf: &Buffer, a: usize, b: usize) -> OperatorSpan {
    let (first, last) = (a.min(b), a.max(b).min(buf.last_line()));
    OperatorSpan {
        range: TextRange::new(buf.line_start(first), buf.line_content_end(last)),
        linewise: true,
    }
}

/// `count` lines starting at the cursor line (`dd`, `3yy`).
pub fn count_lines_span(buf: &Buffer, cursor: usize, count: u32) -> OperatorSpan {
    let first = buf.line_of(cursor);
    let extra = count.max(1) as usize - 1;
    line_span(buf, first, first.saturating_add(extra))
}

/// Widen a linewise span to take one line break with it: the trailing one, or
/// the preceding one when the span ends at the buffer end.
pub fn linewise_delete_range(buf: &Buffer, range: TextRange) -> TextRange {
    if range.end < buf.len_chars() {
        TextRange::new(range.start, range.end + 1)
    } else if range.start > 0 {
        TextRange::new(range.start - 1, range.end)
    } else {
        range
    }
}
