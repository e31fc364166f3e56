//! KeyTranslator: stateful key -> Action translation.
//!
//! State machine:
//! * Idle: optional `pending_count` accumulating prefix digits.
//! * Register prefix: `"` sets `awaiting_register`; the next key names the
//!   register, which is held until the next operator or paste consumes it.
//! * OperatorPending(op): operator captured; may accumulate a post-operator
//!   count (`post_op_count`). A leading `0` is NOT a count but the `LineStart`
//!   motion (`d0`), exactly like a bare `0` with no prefix count.
//! * Multi-key sequences (`g?`, `f?`/`t?`, `r?`, `i?`/`a?`) park in
//!   `pending_key` until their second key arrives.
//! * A completed command emits an `Action` carrying
//!   `count = prefix_count * post_op_count` (default 1, clamped to 999_999).
//!
//! Unknown keys clear every pending piece of state and report `Unhandled`.
//! Escape cancels pending state silently (and leaves Visual/Insert).

use crate::{
    Action, EditKind, InsertKind, MAX_COUNT, ModeChange, MotionKind, OperatorKind, OperatorTarget,
    TextObject, TextObjectKind,
};
use core_events::{KeyCode, KeyEvent, KeyModifiers};
use core_state::{Mode, RegisterName};
use core_text::WordStyle;
use core_text::class::{OBJECT_PAIRS, QUOTES, pair_of};
use core_text::motion::FindSpec;

/// Outcome of feeding one key to the translator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// A complete command ready for dispatch.
    Action(Action),
    /// Key accepted as part of an incomplete command (count, operator, prefix).
    Consumed,
    /// Key has no meaning here; pending state was cleared.
    Unhandled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingKey {
    G,
    Find { forward: bool, till: bool },
    Replace,
    TextObject { inner: bool },
}

#[derive(Debug, Default)]
pub struct KeyTranslator {
    /// Count prefix prior to an operator or motion (e.g. `12d` or `12w`).
    pending_count: Option<u32>,
    /// Pending operator kind (d,y,c) awaiting motion.
    pending_operator: Option<OperatorKind>,
    /// Count following an operator but before the motion (e.g. `d3w`).
    post_op_count: Option<u32>,
    /// Pending explicit register (after '"')
    pending_register: Option<RegisterName>,
    /// True if we just saw '"' and expect a register designator next.
    awaiting_register: bool,
    /// First half of a two-key command.
    pending_key: Option<PendingKey>,
}

impl KeyTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset transient state (counts/operators/register/sequences).
    pub fn reset(&mut self) {
        self.pending_count = None;
        self.pending_operator = None;
        self.post_op_count = None;
        self.pending_register = None;
        self.awaiting_register = false;
        self.pending_key = None;
    }

    pub fn is_idle(&self) -> bool {
        self.pending_count.is_none()
            && self.pending_operator.is_none()
            && self.post_op_count.is_none()
            && self.pending_register.is_none()
            && !self.awaiting_register
            && self.pending_key.is_none()
    }

    pub fn pending_operator(&self) -> Option<OperatorKind> {
        self.pending_operator
    }

    pub fn pending_count(&self) -> Option<u32> {
        self.pending_count
    }

    pub fn translate(&mut self, mode: Mode, key: &KeyEvent) -> Translation {
        tracing::trace!(target: "actions.translate", mode = ?mode, key = %key, idle = self.is_idle(), "translate_key_attempt");
        let out = match mode {
            Mode::Insert => translate_insert(key),
            Mode::Normal | Mode::Visual | Mode::VisualLine => self.translate_command(mode, key),
        };
        match &out {
            Translation::Unhandled => {
                tracing::trace!(target: "actions.translate", key = %key, "unhandled_key");
                self.reset();
            }
            Translation::Action(action) => {
                tracing::trace!(target: "actions.translate", action = ?action, "action");
                self.reset();
            }
            Translation::Consumed => {}
        }
        out
    }

    fn translate_command(&mut self, mode: Mode, key: &KeyEvent) -> Translation {
        if key.is_escape() {
            self.reset();
            if mode.is_visual() {
                return Translation::Action(Action::ModeChange(ModeChange::ExitVisual));
            }
            return Translation::Consumed;
        }
        if self.awaiting_register {
            self.awaiting_register = false;
            return match plain_char(key).and_then(RegisterName::from_char) {
                Some(name) => {
                    self.pending_register = Some(name);
                    Translation::Consumed
                }
                None => Translation::Unhandled,
            };
        }
        if let Some(pending) = self.pending_key.take() {
            return self.resolve_pending(mode, pending, key);
        }
        if key.is_ctrl() {
            return match key.code {
                KeyCode::Char('r') if self.pending_operator.is_none() => {
                    let (count, _) = self.take_count();
                    Translation::Action(Action::Redo { count })
                }
                _ => Translation::Unhandled,
            };
        }
        let c = match key.code {
            KeyCode::Char(c) if !key.mods.contains(KeyModifiers::ALT) => c,
            KeyCode::Left | KeyCode::Backspace => return self.complete_motion(MotionKind::Left),
            KeyCode::Right => return self.complete_motion(MotionKind::Right),
            KeyCode::Up => return self.complete_motion(MotionKind::Up),
            KeyCode::Down => return self.complete_motion(MotionKind::Down),
            KeyCode::Home => return self.complete_motion(MotionKind::LineStart),
            KeyCode::End => return self.complete_motion(MotionKind::LineEnd),
            _ => return Translation::Unhandled,
        };

        if let Some(digit) = c.to_digit(10) {
            let slot = if self.pending_operator.is_some() {
                &mut self.post_op_count
            } else {
                &mut self.pending_count
            };
            // A bare `0` is the LineStart motion, handled below.
            if digit != 0 || slot.is_some() {
                let value = slot
                    .unwrap_or(0)
                    .saturating_mul(10)
                    .saturating_add(digit)
                    .min(MAX_COUNT);
                *slot = Some(value);
                return Translation::Consumed;
            }
        }

        if let Some(motion) = simple_motion(c) {
            return self.complete_motion(motion);
        }
        match c {
            'g' => return self.park(PendingKey::G),
            'f' | 'F' | 't' | 'T' => {
                return self.park(PendingKey::Find {
                    forward: c.is_ascii_lowercase(),
                    till: c.eq_ignore_ascii_case(&'t'),
                });
            }
            _ => {}
        }

        if let Some(op) = self.pending_operator {
            return match c {
                _ if c == op.as_char() => {
                    let (count, _) = self.take_count();
                    self.operator_action(op, OperatorTarget::Line, count)
                }
                'i' | 'a' => self.park(PendingKey::TextObject { inner: c == 'i' }),
                _ => Translation::Unhandled,
            };
        }

        if mode.is_visual() {
            self.visual_key(mode, c)
        } else {
            self.normal_key(c)
        }
    }

    fn normal_key(&mut self, c: char) -> Translation {
        if let Some(op) = OperatorKind::from_char(c) {
            self.pending_operator = Some(op);
            self.post_op_count = None;
            return Translation::Consumed;
        }
        let (count, explicit) = self.take_count();
        let action = match c {
            'x' => return self.shorthand(OperatorKind::Delete, MotionKind::Right, count),
            'X' => return self.shorthand(OperatorKind::Delete, MotionKind::Left, count),
            'D' => return self.shorthand(OperatorKind::Delete, MotionKind::LineEnd, count),
            'C' => return self.shorthand(OperatorKind::Change, MotionKind::LineEnd, count),
            's' => return self.shorthand(OperatorKind::Change, MotionKind::Right, count),
            'S' => return self.operator_action(OperatorKind::Change, OperatorTarget::Line, count),
            'Y' => return self.operator_action(OperatorKind::Yank, OperatorTarget::Line, count),
            'i' => Action::EnterInsert {
                kind: InsertKind::Before,
                count,
            },
            'a' => Action::EnterInsert {
                kind: InsertKind::After,
                count,
            },
            'I' => Action::EnterInsert {
                kind: InsertKind::LineStart,
                count,
            },
            'A' => Action::EnterInsert {
                kind: InsertKind::LineEnd,
                count,
            },
            'o' => Action::EnterInsert {
                kind: InsertKind::OpenBelow,
                count,
            },
            'O' => Action::EnterInsert {
                kind: InsertKind::OpenAbove,
                count,
            },
            'v' => Action::ModeChange(ModeChange::EnterVisual),
            'V' => Action::ModeChange(ModeChange::EnterVisualLine),
            'p' | 'P' => Action::Paste {
                before: c == 'P',
                count,
                register: self.pending_register.take(),
            },
            'u' => Action::Undo { count },
            '.' => Action::RepeatLastChange {
                count: explicit.then_some(count),
            },
            'J' => Action::Edit(EditKind::JoinLines { count }),
            'r' => {
                self.pending_count = explicit.then_some(count);
                return self.park(PendingKey::Replace);
            }
            '"' => {
                self.pending_count = explicit.then_some(count);
                self.awaiting_register = true;
                return Translation::Consumed;
            }
            _ => return Translation::Unhandled,
        };
        Translation::Action(action)
    }

    fn visual_key(&mut self, mode: Mode, c: char) -> Translation {
        let register = self.pending_register;
        let action = match c {
            'd' | 'x' => Action::VisualOperator {
                op: OperatorKind::Delete,
                register,
            },
            'y' => Action::VisualOperator {
                op: OperatorKind::Yank,
                register,
            },
            'c' | 's' => Action::VisualOperator {
                op: OperatorKind::Change,
                register,
            },
            'o' => Action::SwapAnchor,
            'v' if mode == Mode::Visual => Action::ModeChange(ModeChange::ExitVisual),
            'v' => Action::ModeChange(ModeChange::EnterVisual),
            'V' if mode == Mode::VisualLine => Action::ModeChange(ModeChange::ExitVisual),
            'V' => Action::ModeChange(ModeChange::EnterVisualLine),
            'i' | 'a' => return self.park(PendingKey::TextObject { inner: c == 'i' }),
            '"' => {
                self.awaiting_register = true;
                return Translation::Consumed;
            }
            _ => return Translation::Unhandled,
        };
        Translation::Action(action)
    }

    fn resolve_pending(&mut self, mode: Mode, pending: PendingKey, key: &KeyEvent) -> Translation {
        let Some(c) = plain_char(key).or(match key.code {
            KeyCode::Enter => Some('\n'),
            KeyCode::Tab => Some('\t'),
            _ => None,
        }) else {
            return Translation::Unhandled;
        };
        match pending {
            PendingKey::G => match c {
                'g' => self.complete_motion(MotionKind::BufferStart),
                'e' => self.complete_motion(MotionKind::WordEndBackward(WordStyle::Word)),
                'E' => self.complete_motion(MotionKind::WordEndBackward(WordStyle::BigWord)),
                _ => Translation::Unhandled,
            },
            PendingKey::Find { .. } if c == '\n' => Translation::Unhandled,
            PendingKey::Find { forward, till } => {
                self.complete_motion(MotionKind::Find(FindSpec { ch: c, forward, till }))
            }
            PendingKey::Replace => {
                let (count, _) = self.take_count();
                Translation::Action(Action::Edit(EditKind::ReplaceChar { ch: c, count }))
            }
            PendingKey::TextObject { inner } => {
                let Some(kind) = object_kind(c) else {
                    return Translation::Unhandled;
                };
                let object = TextObject { kind, inner };
                let (count, _) = self.take_count();
                match self.pending_operator {
                    Some(op) => self.operator_action(op, OperatorTarget::TextObject(object), count),
                    None if mode.is_visual() => {
                        Translation::Action(Action::VisualTextObject { object, count })
                    }
                    None => Translation::Unhandled,
                }
            }
        }
    }

    fn park(&mut self, pending: PendingKey) -> Translation {
        self.pending_key = Some(pending);
        Translation::Consumed
    }

    /// Emit a motion, or an operator application when an operator is pending.
    fn complete_motion(&mut self, motion: MotionKind) -> Translation {
        let (count, _) = self.take_count();
        match self.pending_operator {
            Some(op) => self.operator_action(op, OperatorTarget::Motion(motion), count),
            None => Translation::Action(Action::Motion { motion, count }),
        }
    }

    fn shorthand(&mut self, op: OperatorKind, motion: MotionKind, count: u32) -> Translation {
        self.operator_action(op, OperatorTarget::Motion(motion), count)
    }

    fn operator_action(&mut self, op: OperatorKind, target: OperatorTarget, count: u32) -> Translation {
        Translation::Action(Action::ApplyOperator {
            op,
            target,
            count,
            register: self.pending_register.take(),
        })
    }

    /// Consume prefix and post-operator counts: `(product, explicit)`.
    fn take_count(&mut self) -> (u32, bool) {
        let explicit = self.pending_count.is_some() || self.post_op_count.is_some();
        let total = self
            .pending_count
            .take()
            .unwrap_or(1)
            .saturating_mul(self.post_op_count.take().unwrap_or(1))
            .min(MAX_COUNT);
        (total.max(1), explicit)
    }
}

fn translate_insert(key: &KeyEvent) -> Translation {
    if key.is_escape() {
        return Translation::Action(Action::ModeChange(ModeChange::LeaveInsert));
    }
    if key.is_ctrl() || key.mods.contains(KeyModifiers::ALT) {
        return Translation::Unhandled;
    }
    let action = match key.code {
        KeyCode::Char(c) => Action::Edit(EditKind::InsertText(c.to_string())),
        KeyCode::Tab => Action::Edit(EditKind::InsertText("\t".to_string())),
        KeyCode::Enter => Action::Edit(EditKind::InsertNewline),
        KeyCode::Backspace => Action::Edit(EditKind::Backspace),
        KeyCode::Left => insert_motion(MotionKind::Left),
        KeyCode::Right => insert_motion(MotionKind::Right),
        KeyCode::Up => insert_motion(MotionKind::Up),
        KeyCode::Down => insert_motion(MotionKind::Down),
        KeyCode::Home => insert_motion(MotionKind::LineStart),
        KeyCode::End => insert_motion(MotionKind::LineEnd),
        KeyCode::Esc => return Translation::Unhandled,
    };
    Translation::Action(action)
}

fn insert_motion(motion: MotionKind) -> Action {
    Action::Motion { motion, count: 1 }
}

/// Char of an unmodified (or shift-only) key.
fn plain_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c) if !key.is_ctrl() && !key.mods.contains(KeyModifiers::ALT) => Some(c),
        _ => None,
    }
}

/// Single-key motions shared by Normal, Visual, and operator-pending.
fn simple_motion(c: char) -> Option<MotionKind> {
    let motion = match c {
        'h' => MotionKind::Left,
        'l' | ' ' => MotionKind::Right,
        'j' => MotionKind::Down,
        'k' => MotionKind::Up,
        '0' => MotionKind::LineStart,
        '^' => MotionKind::FirstNonBlank,
        '$' => MotionKind::LineEnd,
        'w' => MotionKind::WordForward(WordStyle::Word),
        'W' => MotionKind::WordForward(WordStyle::BigWord),
        'b' => MotionKind::WordBackward(WordStyle::Word),
        'B' => MotionKind::WordBackward(WordStyle::BigWord),
        'e' => MotionKind::WordEnd(WordStyle::Word),
        'E' => MotionKind::WordEnd(WordStyle::BigWord),
        '{' => MotionKind::ParagraphBackward,
        '}' => MotionKind::ParagraphForward,
        '%' => MotionKind::MatchPair,
        'G' => MotionKind::BufferEnd,
        ';' => MotionKind::RepeatFind,
        ',' => MotionKind::RepeatFindReverse,
        _ => return None,
    };
    Some(motion)
}

fn object_kind(c: char) -> Option<TextObjectKind> {
    let kind = match c {
        'w' => TextObjectKind::Word(WordStyle::Word),
        'W' => TextObjectKind::Word(WordStyle::BigWord),
        'b' => return object_kind('('),
        'B' => return object_kind('{'),
        _ if QUOTES.contains(&c) => TextObjectKind::Quote(c),
        _ => {
            let (open, close, _) = pair_of(c, &OBJECT_PAIRS)?;
            TextObjectKind::Bracket { open, close }
        }
    };
    Some(kind)
}
