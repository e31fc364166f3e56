//! Motion resolver: `(motion, count)` -> target offset.
//!
//! Counts apply sequentially, each iteration starting from the previous
//! landing point. The resolver never mutates editor state; it reports the
//! target plus the operator-facing flags (`inclusive`, `linewise`) and the
//! wanted column the caller should store afterwards.
//!
//! A `None` result is a resolution miss (find char absent, `%` off a bracket,
//! `j` on the last line): the caller treats it as a no-op.

use crate::MotionKind;
use core_state::STICKY_EOL;
use core_text::motion::{self, FindSpec};
use core_text::Buffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionContext {
    pub wanted_column: Option<usize>,
    pub last_find: Option<FindSpec>,
    /// Highest offset the motion may land on.
    pub limit: usize,
    /// Insert mode: `$` and vertical moves may land one past the last char.
    pub past_end: bool,
    /// Resolving an operator target rather than moving the cursor.
    pub for_operator: bool,
}

impl MotionContext {
    /// Context for an operator target: may reach the buffer end.
    pub fn operator(buffer: &Buffer, wanted_column: Option<usize>, last_find: Option<FindSpec>) -> Self {
        Self {
            wanted_column,
            last_find,
            limit: buffer.len_chars(),
            past_end: false,
            for_operator: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedMotion {
    pub target: usize,
    /// Operator range includes the char at the far end.
    pub inclusive: bool,
    /// Operator range covers whole lines.
    pub linewise: bool,
    /// Wanted column after the move (`None` clears it).
    pub wanted_column: Option<usize>,
}

impl ResolvedMotion {
    fn exclusive(target: usize) -> Self {
        Self {
            target,
            inclusive: false,
            linewise: false,
            wanted_column: None,
        }
    }

    fn inclusive(target: usize) -> Self {
        Self {
            inclusive: true,
            ..Self::exclusive(target)
        }
    }

    fn vertical(target: usize, wanted: usize) -> Self {
        Self {
            target,
            inclusive: false,
            linewise: true,
            wanted_column: Some(wanted),
        }
    }
}

pub fn resolve_motion(
    buf: &Buffer,
    cursor: usize,
    motion: MotionKind,
    count: u32,
    ctx: &MotionContext,
) -> Option<ResolvedMotion> {
    let count = count.max(1) as usize;
    let cursor = cursor.min(buf.len_chars());
    let line = buf.line_of(cursor);
    let repeat = |step: &dyn Fn(usize) -> usize| (0..count).fold(cursor, |p, _| step(p));

    let resolved = match motion {
        MotionKind::Left => ResolvedMotion::exclusive(cursor.saturating_sub(count)),
        MotionKind::Right => ResolvedMotion::exclusive(cursor.saturating_add(count)),
        MotionKind::Up | MotionKind::Down => {
            let last = last_reachable_line(buf, ctx);
            let target_line = if motion == MotionKind::Down {
                if line >= last {
                    return None;
                }
                (line + count).min(last)
            } else {
                if line == 0 {
                    return None;
                }
                line.saturating_sub(count)
            };
            let wanted = ctx.wanted_column.unwrap_or_else(|| buf.column_of(cursor));
            ResolvedMotion::vertical(column_in_line(buf, target_line, wanted, ctx.past_end), wanted)
        }
        MotionKind::BufferStart | MotionKind::BufferEnd => {
            let last = last_reachable_line(buf, ctx);
            let target_line = if count > 1 {
                (count - 1).min(last)
            } else if motion == MotionKind::BufferStart {
                0
            } else {
                last
            };
            let wanted = ctx.wanted_column.unwrap_or_else(|| buf.column_of(cursor));
            ResolvedMotion::vertical(column_in_line(buf, target_line, wanted, ctx.past_end), wanted)
        }
        MotionKind::LineStart => ResolvedMotion::exclusive(buf.line_start(line)),
        MotionKind::FirstNonBlank => {
            let (start, end) = (buf.line_start(line), buf.line_content_end(line));
            let mut target = motion::first_non_blank(buf, line);
            if target == end && end > start && !ctx.past_end && !ctx.for_operator {
                target = end - 1;
            }
            ResolvedMotion::exclusive(target)
        }
        MotionKind::LineEnd => {
            let target_line = (line + count - 1).min(last_reachable_line(buf, ctx).max(line));
            let (start, end) = (buf.line_start(target_line), buf.line_content_end(target_line));
            let mut resolved = if ctx.past_end {
                ResolvedMotion::exclusive(end)
            } else if end > start {
                ResolvedMotion::inclusive(end - 1)
            } else {
                ResolvedMotion::exclusive(start)
            };
            resolved.wanted_column = Some(STICKY_EOL);
            resolved
        }
        MotionKind::WordForward(style) => {
            let mut target = repeat(&|p| motion::word_forward(buf, p, style));
            if ctx.for_operator {
                target = stop_at_line_end(buf, cursor, target);
            }
            ResolvedMotion::exclusive(target)
        }
        MotionKind::WordBackward(style) => {
            ResolvedMotion::exclusive(repeat(&|p| motion::word_backward(buf, p, style)))
        }
        MotionKind::WordEnd(style) => {
            if buf.is_empty() {
                return None;
            }
            ResolvedMotion::inclusive(repeat(&|p| motion::word_end(buf, p, style)))
        }
        MotionKind::WordEndBackward(style) => {
            ResolvedMotion::inclusive(repeat(&|p| motion::word_end_backward(buf, p, style)))
        }
        MotionKind::ParagraphForward => {
            ResolvedMotion::exclusive(repeat(&|p| motion::paragraph_forward(buf, p)))
        }
        MotionKind::ParagraphBackward => {
            ResolvedMotion::exclusive(repeat(&|p| motion::paragraph_backward(buf, p)))
        }
        MotionKind::MatchPair => ResolvedMotion::inclusive(motion::match_pair(buf, cursor)?),
        MotionKind::Find(spec) => find(buf, cursor, spec, count, false)?,
        MotionKind::RepeatFind => find(buf, cursor, ctx.last_find?, count, true)?,
        MotionKind::RepeatFindReverse => find(buf, cursor, ctx.last_find?.reversed(), count, true)?,
    };
    Some(ResolvedMotion {
        target: resolved.target.min(ctx.limit),
        ..resolved
    })
}

fn find(buf: &Buffer, cursor: usize, spec: FindSpec, count: usize, repeat: bool) -> Option<ResolvedMotion> {
    let target = motion::find_in_line(buf, cursor, spec, count, repeat)?;
    // Backward finds exclude the cursor char; forward finds include the landing char.
    Some(if spec.forward {
        ResolvedMotion::inclusive(target)
    } else {
        ResolvedMotion::exclusive(target)
    })
}

/// Last line a vertical move may target. The empty line after a final `\n`
/// holds no char, so only Insert mode can stand on it.
fn last_reachable_line(buf: &Buffer, ctx: &MotionContext) -> usize {
    let last = buf.last_line();
    if !ctx.past_end && last > 0 && buf.is_line_empty(last) {
        last - 1
    } else {
        last
    }
}

/// Offset on `line` at `column`, clamped to the line's last char (or one past
/// it when `past_end`).
pub fn column_in_line(buf: &Buffer, line: usize, column: usize, past_end: bool) -> usize {
    let start = buf.line_start(line);
    let len = buf.line_len(line);
    let max_col = if past_end || len == 0 { len } else { len - 1 };
    start + column.min(max_col)
}

/// `dw`/`cw` whose last word ends a line stop at that line end instead of
/// eating the line break and the next line's indent.
fn stop_at_line_end(buf: &Buffer, cursor: usize, target: usize) -> usize {
    let target_line = buf.line_of(target);
    if target_line == 0 || target_line <= buf.line_of(cursor) || target >= buf.len_chars() {
        return target;
    }
    let line_start = buf.line_start(target_line);
    let only_blanks_before =
        (line_start..target).all(|p| buf.char_at(p).is_some_and(core_text::class::is_blank));
    if !only_blanks_before {
        return target;
    }
    let prev_end = buf.line_content_end(target_line - 1);
    if prev_end > cursor { prev_end } else { target }
}
