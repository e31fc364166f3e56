//! Modal command interpreter.
//!
//! Key tokens flow `KeyTranslator` -> `Action` -> `dispatcher::dispatch`. The
//! translator owns all multi-key bookkeeping (counts, register prefix, pending
//! operator, `g`/`f`/`r`/text-object sequences) and only emits an `Action`
//! once a command is structurally complete. The dispatcher resolves motions
//! and text objects against the buffer, applies operators, and reports what
//! changed. `RepeatTracker` records the last completed change for `.`.

use core_state::RegisterName;
use core_text::WordStyle;
use core_text::motion::FindSpec;

pub mod dispatcher;
pub mod key_translator;
pub mod motion_resolver;
pub mod repeat;
pub mod span_resolver;
pub mod text_object;

pub use dispatcher::{DispatchResult, dispatch};
pub use key_translator::{KeyTranslator, Translation};
pub use repeat::{ChangeCommand, LastChange, RepeatTracker};

/// Upper bound applied to every accumulated count.
pub const MAX_COUNT: u32 = 999_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    /// `0`
    LineStart,
    /// `^`
    FirstNonBlank,
    /// `$`
    LineEnd,
    /// `w` / `W`
    WordForward(WordStyle),
    /// `b` / `B`
    WordBackward(WordStyle),
    /// `e` / `E`
    WordEnd(WordStyle),
    /// `ge` / `gE`
    WordEndBackward(WordStyle),
    /// `{`
    ParagraphBackward,
    /// `}`
    ParagraphForward,
    /// `%`
    MatchPair,
    /// `gg`
    BufferStart,
    /// `G`
    BufferEnd,
    /// `f` / `F` / `t` / `T`
    Find(FindSpec),
    /// `;`
    RepeatFind,
    /// `,`
    RepeatFindReverse,
}

impl MotionKind {
    /// Vertical motions keep the wanted column and act on whole lines under an operator.
    pub fn is_linewise(self) -> bool {
        matches!(
            self,
            MotionKind::Up | MotionKind::Down | MotionKind::BufferStart | MotionKind::BufferEnd
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    Delete,
    Yank,
    Change,
}

impl OperatorKind {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'd' => Some(OperatorKind::Delete),
            'y' => Some(OperatorKind::Yank),
            'c' => Some(OperatorKind::Change),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            OperatorKind::Delete => 'd',
            OperatorKind::Yank => 'y',
            OperatorKind::Change => 'c',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextObjectKind {
    /// `"`, `'`, `` ` ``; scoped to the cursor line.
    Quote(char),
    /// `()`, `[]`, `{}`, `<>`; may span lines.
    Bracket { open: char, close: char },
    /// `w` / `W`
    Word(WordStyle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextObject {
    pub kind: TextObjectKind,
    /// `i` (true) excludes delimiters, `a` (false) includes them.
    pub inner: bool,
}

/// What an operator acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorTarget {
    Motion(MotionKind),
    TextObject(TextObject),
    /// Doubled operator (`dd`, `yy`, `cc`): whole lines.
    Line,
}

/// How a Normal-mode key enters Insert mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertKind {
    /// `i`
    Before,
    /// `a`
    After,
    /// `I`
    LineStart,
    /// `A`
    LineEnd,
    /// `o`
    OpenBelow,
    /// `O`
    OpenAbove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    LeaveInsert,
    EnterVisual,
    EnterVisualLine,
    ExitVisual,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditKind {
    /// Insert-mode text entry (a typed char or a replayed insert).
    InsertText(String),
    InsertNewline,
    Backspace,
    /// `r{char}`
    ReplaceChar { ch: char, count: u32 },
    /// `J`
    JoinLines { count: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Motion {
        motion: MotionKind,
        count: u32,
    },
    ApplyOperator {
        op: OperatorKind,
        target: OperatorTarget,
        count: u32,
        register: Option<RegisterName>,
    },
    VisualOperator {
        op: OperatorKind,
        register: Option<RegisterName>,
    },
    /// `i(`, `aw`, ... typed in Visual mode: select the object.
    VisualTextObject {
        object: TextObject,
        count: u32,
    },
    /// Visual `o`.
    SwapAnchor,
    EnterInsert {
        kind: InsertKind,
        count: u32,
    },
    ModeChange(ModeChange),
    Edit(EditKind),
    Paste {
        before: bool,
        count: u32,
        register: Option<RegisterName>,
    },
    Undo {
        count: u32,
    },
    Redo {
        count: u32,
    },
    /// `.`; an explicit count overrides the recorded one.
    RepeatLastChange {
        count: Option<u32>,
    },
}
